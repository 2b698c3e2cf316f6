// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Test utilities and fixtures for the ripple stream library.
//!
//! This crate is designed for use in development and testing only, not for
//! production code.
//!
//! # Key Types
//!
//! - [`VirtualScheduler`] - a deterministic [`Scheduler`](ripple_core::Scheduler)
//!   with a manually advanced clock. Nothing runs until the test drives it.
//! - [`Recorder`] - subscribes to a stream and records every callback as an
//!   [`Event`], including repeated terminal signals.
//!
//! # Example
//!
//! ```rust
//! use ripple_core::Stream;
//! use ripple_test_utils::{Event, Recorder, VirtualScheduler};
//!
//! let scheduler = VirtualScheduler::new();
//! let recorder = Recorder::new();
//!
//! recorder.record(&Stream::from_iter(vec![1, 2]), &scheduler);
//! assert!(recorder.events().is_empty());
//!
//! scheduler.run_until_idle();
//! assert_eq!(
//!     recorder.events(),
//!     vec![Event::Next(1), Event::Next(2), Event::End(None)]
//! );
//! ```

#![allow(clippy::multiple_crate_versions, clippy::doc_markdown)]
pub mod helpers;
pub mod recorder;
pub mod virtual_scheduler;

pub use helpers::{failure, timed_source};
pub use recorder::{Event, Recorder};
pub use virtual_scheduler::VirtualScheduler;
