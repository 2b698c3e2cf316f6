// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Combinators for ripple streams.
//!
//! Every operator is an extension trait on [`Stream`](ripple_core::Stream)
//! whose method wraps the source into a new stream. The wrapped emitter
//! subscribes to its source only when it is itself subscribed, so pipelines
//! stay lazy and cold.
//!
//! # Overview
//!
//! - **Transforming** - [`MapExt`], [`FilterExt`], [`TapExt`], [`ScanExt`]
//! - **Flattening** - [`FlatMapExt`] (`flat_map`, `ap`), [`FlattenExt`]
//! - **Combining** - [`MergeExt`], [`ConcatExt`]
//! - **Errors** - [`CatchExt`]
//! - **Aggregating** - [`ReduceExt`]
//! - **Consuming** - [`ObserveExt`]
//!
//! # Example
//!
//! ```rust
//! use ripple_core::Stream;
//! use ripple_stream::prelude::*;
//! use ripple_test_utils::{Event, Recorder, VirtualScheduler};
//!
//! let scheduler = VirtualScheduler::new();
//! let recorder = Recorder::new();
//!
//! let doubled_evens = Stream::from_iter(1..=6)
//!     .filter(|x| x % 2 == 0)
//!     .map(|x| x * 2);
//!
//! recorder.record(&doubled_evens, &scheduler);
//! scheduler.run_until_idle();
//!
//! assert_eq!(recorder.values(), vec![4, 8, 12]);
//! ```

#![allow(clippy::multiple_crate_versions, clippy::doc_markdown)]

pub mod catch;
pub mod concat;
mod fan_in;
pub mod filter;
pub mod flat_map;
pub mod map;
pub mod merge;
pub mod observe;
pub mod prelude;
pub mod reduce;
pub mod scan;
pub mod tap;

pub use catch::CatchExt;
pub use concat::ConcatExt;
pub use filter::FilterExt;
pub use flat_map::{FlatMapExt, FlattenExt};
pub use map::MapExt;
pub use merge::MergeExt;
pub use observe::{Observation, ObserveExt};
pub use reduce::ReduceExt;
pub use scan::ScanExt;
pub use tap::TapExt;
