// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Schedulers that run ripple subscriptions on an async runtime.

pub mod impls;

#[cfg(feature = "runtime-tokio")]
pub use impls::tokio::TokioScheduler;
