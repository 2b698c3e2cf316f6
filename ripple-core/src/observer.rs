// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! The consumer side of the subscription contract.

use crate::error::{catch_fault, Result, StreamError, Termination};
use crate::scheduler::SchedulerRef;
use core::fmt;
use std::sync::Arc;

type NextFn<T> = dyn Fn(T) -> Result<()> + Send + Sync + 'static;
type EndFn = dyn Fn(Termination) + Send + Sync + 'static;

/// Value and termination callbacks of one subscription.
///
/// `next` may be called zero or more times, followed by exactly one `end`.
/// An `Err` returned from [`next`](Observer::next) means the consumer failed
/// while handling the value; whoever invoked `next` turns it into its own
/// failure termination.
///
/// The observer also carries the [`SchedulerRef`] of its subscription, so that
/// sources and timed operators defer work on the scheduler chosen by the
/// top-level consumer.
pub struct Observer<T> {
    next: Arc<NextFn<T>>,
    end: Arc<EndFn>,
    scheduler: SchedulerRef,
}

impl<T> Clone for Observer<T> {
    fn clone(&self) -> Self {
        Self {
            next: Arc::clone(&self.next),
            end: Arc::clone(&self.end),
            scheduler: self.scheduler.clone(),
        }
    }
}

impl<T: 'static> Observer<T> {
    /// Observer running `next` for each value and `end` once on termination.
    pub fn new<N, E>(scheduler: SchedulerRef, next: N, end: E) -> Self
    where
        N: Fn(T) -> Result<()> + Send + Sync + 'static,
        E: Fn(Termination) + Send + Sync + 'static,
    {
        Self {
            next: Arc::new(next),
            end: Arc::new(end),
            scheduler,
        }
    }

    /// Deliver a value. A panic inside the callback chain is returned as
    /// [`StreamError::Panic`].
    pub fn next(&self, value: T) -> Result<()> {
        catch_fault(|| (self.next)(value))
    }

    /// Deliver the terminal signal.
    pub fn end(&self, termination: Termination) {
        (self.end)(termination);
    }

    /// Signal successful completion.
    pub fn complete(&self) {
        self.end(None);
    }

    /// Terminate with `error`.
    pub fn fail(&self, error: StreamError) {
        self.end(Some(error));
    }

    /// Scheduler the subscription runs on.
    pub fn scheduler(&self) -> &SchedulerRef {
        &self.scheduler
    }

    /// Observer of another value type sharing this one's `end` and scheduler.
    pub fn with_next<U, N>(&self, next: N) -> Observer<U>
    where
        U: 'static,
        N: Fn(U) -> Result<()> + Send + Sync + 'static,
    {
        Observer {
            next: Arc::new(next),
            end: Arc::clone(&self.end),
            scheduler: self.scheduler.clone(),
        }
    }

    /// Observer sharing this one's `next` and scheduler with a new `end`.
    pub fn with_end<E>(&self, end: E) -> Observer<T>
    where
        E: Fn(Termination) + Send + Sync + 'static,
    {
        Observer {
            next: Arc::clone(&self.next),
            end: Arc::new(end),
            scheduler: self.scheduler.clone(),
        }
    }
}

impl<T> fmt::Debug for Observer<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Observer")
            .field("scheduler", &self.scheduler)
            .finish_non_exhaustive()
    }
}
