// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Core types of ripple, a lazy push-based event stream library.
//!
//! A [`Stream`] owns one [`Emitter`]. Subscribing hands it an [`Observer`]
//! (value callback, termination callback and the [`SchedulerRef`] to defer
//! work on) and returns a [`Disposer`] for best-effort cancellation.
//!
//! Operators live in `ripple-stream` and `ripple-stream-time`; a Tokio backed
//! scheduler lives in `ripple-runtime`.

#![allow(clippy::multiple_crate_versions, clippy::doc_markdown)]

#[macro_use]
pub mod logging;

pub mod constructors;
pub mod disposer;
pub mod error;
pub mod observer;
pub mod scheduler;
pub mod stream;

pub use self::disposer::Disposer;
pub use self::error::{catch_fault, IntoStreamError, Result, StreamError, Termination};
pub use self::observer::Observer;
pub use self::scheduler::{Scheduler, SchedulerRef, Task, TimerHandle};
pub use self::stream::{Emitter, Stream};
