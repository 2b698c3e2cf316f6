// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Best-effort cancellation handle returned by every subscription.

use core::fmt;
use core::sync::atomic::{AtomicBool, Ordering};
use parking_lot::Mutex;
use std::sync::Arc;

type Action = Box<dyn FnOnce() + Send + 'static>;

/// Cancellation handle for one subscription.
///
/// A `Disposer` can be cloned to create multiple handles to the same
/// cancellation state. Calling [`dispose`](Disposer::dispose) on any clone runs
/// every registered action exactly once. Actions registered after disposal run
/// immediately.
///
/// Disposal is a request: callbacks that already fired cannot be un-fired, and
/// dropping a `Disposer` does not dispose it.
///
/// # Example
///
/// ```
/// use ripple_core::Disposer;
/// use std::sync::atomic::{AtomicUsize, Ordering};
/// use std::sync::Arc;
///
/// let calls = Arc::new(AtomicUsize::new(0));
/// let counter = Arc::clone(&calls);
///
/// let disposer = Disposer::from_fn(move || {
///     counter.fetch_add(1, Ordering::SeqCst);
/// });
///
/// disposer.dispose();
/// disposer.dispose();
/// assert_eq!(calls.load(Ordering::SeqCst), 1);
/// assert!(disposer.is_disposed());
/// ```
#[derive(Clone, Default)]
pub struct Disposer {
    inner: Arc<Inner>,
}

#[derive(Default)]
struct Inner {
    disposed: AtomicBool,
    actions: Mutex<Vec<Action>>,
}

impl Disposer {
    /// Create a disposer with no registered actions.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a disposer that runs `action` when disposed.
    pub fn from_fn(action: impl FnOnce() + Send + 'static) -> Self {
        let disposer = Self::new();
        disposer.add(action);
        disposer
    }

    /// Register an action to run on disposal.
    pub fn add(&self, action: impl FnOnce() + Send + 'static) {
        {
            let mut actions = self.inner.actions.lock();
            if !self.is_disposed() {
                actions.push(Box::new(action));
                return;
            }
        }
        action();
    }

    /// Dispose `other` together with this disposer.
    pub fn add_disposer(&self, other: Disposer) {
        if Arc::ptr_eq(&self.inner, &other.inner) {
            return;
        }
        self.add(move || other.dispose());
    }

    /// Request cancellation. Idempotent.
    pub fn dispose(&self) {
        // Flag first so that concurrent `add` calls run their action inline
        if self.inner.disposed.swap(true, Ordering::AcqRel) {
            return;
        }
        let actions = core::mem::take(&mut *self.inner.actions.lock());
        crate::trace!("disposing subscription ({} actions)", actions.len());
        for action in actions {
            action();
        }
    }

    /// Check if disposal has been requested (non-blocking).
    pub fn is_disposed(&self) -> bool {
        self.inner.disposed.load(Ordering::Acquire)
    }
}

impl fmt::Debug for Disposer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Disposer")
            .field("disposed", &self.is_disposed())
            .finish()
    }
}
