// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Error types for ripple event streams
//!
//! A subscription ends in exactly one of two ways: success (`None`) or failure
//! (`Some(StreamError)`). [`StreamError`] is the failure payload. The core treats
//! it opaquely; only `catch` style combinators look inside.
//!
//! # Examples
//!
//! ```
//! use ripple_core::{Result, StreamError};
//!
//! fn validate(x: i32) -> Result<i32> {
//!     if x < 0 {
//!         return Err(StreamError::failure("negative input"));
//!     }
//!     Ok(x)
//! }
//!
//! assert!(validate(-1).is_err());
//! ```

use std::any::Any;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;

/// Failure payload carried by a stream's terminal signal.
#[derive(Debug, Clone, thiserror::Error)]
pub enum StreamError {
    /// A failure described by a message
    ///
    /// Displays as the bare context, so `StreamError::failure("boom")`
    /// renders as `boom`.
    #[error("{context}")]
    Failure {
        /// Description of what went wrong
        context: String,
    },

    /// Error produced by user code
    #[error("User error: {0}")]
    User(#[source] Arc<dyn std::error::Error + Send + Sync>),

    /// A callback panicked while a value was being delivered
    #[error("Callback panicked: {message}")]
    Panic {
        /// The panic payload, when it was a string
        message: String,
    },

    /// The subscription was dropped before a terminal signal arrived
    #[error("Subscription interrupted before termination")]
    Interrupted,
}

impl StreamError {
    /// Create a failure with the given context
    pub fn failure(context: impl Into<String>) -> Self {
        Self::Failure {
            context: context.into(),
        }
    }

    /// Wrap a user error
    pub fn user_error(error: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::User(Arc::new(error))
    }

    /// Build a [`StreamError::Panic`] from a payload returned by `catch_unwind`
    pub fn from_panic(payload: Box<dyn Any + Send>) -> Self {
        let message = if let Some(s) = payload.downcast_ref::<&str>() {
            (*s).to_string()
        } else if let Some(s) = payload.downcast_ref::<String>() {
            s.clone()
        } else {
            "non-string panic payload".to_string()
        };
        Self::Panic { message }
    }

    /// Returns `true` if this error came from a panicking callback
    #[must_use]
    pub const fn is_panic(&self) -> bool {
        matches!(self, Self::Panic { .. })
    }
}

/// Specialized Result type for ripple operations
pub type Result<T> = std::result::Result<T, StreamError>;

/// Terminal signal of a subscription: `None` on success, `Some` on failure.
pub type Termination = Option<StreamError>;

/// Extension trait for converting errors into `StreamError`
pub trait IntoStreamError {
    /// Convert this error into a `StreamError`
    fn into_stream_error(self) -> StreamError;
}

impl<E: std::error::Error + Send + Sync + 'static> IntoStreamError for E {
    fn into_stream_error(self) -> StreamError {
        StreamError::user_error(self)
    }
}

/// Runs `f`, turning a panic into [`StreamError::Panic`].
///
/// User callbacks are invoked through this so that a fault inside them becomes
/// a failure termination instead of unwinding through the scheduler.
pub fn catch_fault<R>(f: impl FnOnce() -> Result<R>) -> Result<R> {
    match catch_unwind(AssertUnwindSafe(f)) {
        Ok(result) => result,
        Err(payload) => {
            let error = StreamError::from_panic(payload);
            crate::warn!("recovered from panicking callback: {}", error);
            Err(error)
        }
    }
}
