// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Time-based operators for ripple streams.
//!
//! Operators read the clock and arm timers through the subscriber's
//! [`Scheduler`](ripple_core::Scheduler), so the same pipeline runs on Tokio
//! or on a virtual clock in tests.
//!
//! # Overview
//!
//! - **[`DelayExt`]** - `.delay(duration)`, an independent timer per value
//! - **[`DebounceExt`]** - `.debounce(interval)`, rate limiting on emission time
//! - **[`ThrottleExt`]** - `.throttle(interval)` and `.throttle_latest(interval)`
//!
//! Failures always pass through immediately and disarm pending timers. A
//! successful end is held back by `delay` and `throttle` until their pending
//! values are delivered, so no value follows the end.
//!
//! # Example
//!
//! ```rust
//! use ripple_core::Stream;
//! use ripple_stream_time::prelude::*;
//! use ripple_test_utils::{Event, Recorder, VirtualScheduler};
//! use std::time::Duration;
//!
//! let scheduler = VirtualScheduler::new();
//! let recorder = Recorder::new();
//!
//! recorder.record(&Stream::of(42).delay(Duration::from_millis(100)), &scheduler);
//! scheduler.run_until_idle();
//! assert!(recorder.is_empty());
//!
//! scheduler.advance_by(Duration::from_millis(100));
//! assert_eq!(recorder.events(), vec![Event::Next(42), Event::End(None)]);
//! ```

mod debounce;
mod delay;
mod gate;
pub mod prelude;
mod throttle;

pub use debounce::DebounceExt;
pub use delay::DelayExt;
pub use throttle::ThrottleExt;
