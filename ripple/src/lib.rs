// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! # Ripple
//!
//! Lazy, cold, push-based event streams.
//!
//! ## Overview
//!
//! A [`Stream`] is a recipe: building one does no work. Subscribing runs the
//! whole pipeline from its source for that subscriber alone, delivering zero
//! or more values followed by exactly one end, successful or failed. All
//! delivery happens on later turns of a [`Scheduler`], never inside the
//! subscribe call.
//!
//! - **Constructors** - [`Stream::of`], [`Stream::empty`], [`Stream::from_iter`],
//!   [`Stream::fail`], [`Stream::never`]
//! - **Combinators** - `map`, `filter`, `tap`, `scan`, `flat_map`, `ap`,
//!   `flatten`, `merge`, `concat`, `catch`, `reduce`
//! - **Timing** - `delay`, `debounce`, `throttle`, `throttle_latest`
//! - **Consuming** - [`Stream::each`], [`Stream::try_each`], `observe`,
//!   `collect_values`
//!
//! Every subscription returns a [`Disposer`]. Disposing it stops further
//! delivery and releases timers and inner subscriptions.
//!
//! ## Runtime Support
//!
//! - `runtime-tokio` (default) - [`TokioScheduler`] drives streams on Tokio
//! - `tracing` - structured logs of panics, disposal and dropped values
//!
//! ## Quick Start
//!
//! ```rust
//! use ripple::prelude::*;
//! use ripple::{Stream, TokioScheduler};
//! use std::time::Duration;
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> ripple::Result<()> {
//!     let totals = Stream::from_iter(vec![1, 2, 3, 4])
//!         .filter(|x| x % 2 == 0)
//!         .delay(Duration::from_millis(10))
//!         .scan(0, |acc, x| acc + x)
//!         .collect_values(TokioScheduler::new())
//!         .await?;
//!
//!     assert_eq!(totals, vec![2, 6]);
//!     Ok(())
//! }
//! ```

pub use ripple_core::{
    catch_fault, Disposer, Emitter, IntoStreamError, Observer, Result, Scheduler, SchedulerRef,
    Stream, StreamError, Task, Termination, TimerHandle,
};
pub use ripple_stream::Observation;

#[cfg(feature = "runtime-tokio")]
pub use ripple_runtime::TokioScheduler;

/// Every operator trait, for `use ripple::prelude::*`.
pub mod prelude {
    pub use ripple_stream::prelude::*;
    pub use ripple_stream_time::prelude::*;
}
