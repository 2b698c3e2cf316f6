// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! The scheduling and timer primitive every subscription runs on.

use core::fmt::Debug;
use core::ops::Deref;
use core::time::Duration;
use std::sync::Arc;

/// A unit of deferred work.
pub type Task = Box<dyn FnOnce() + Send + 'static>;

/// Opaque identifier of an armed timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerHandle(u64);

impl TimerHandle {
    /// Wrap a scheduler-assigned timer id.
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// The raw timer id.
    pub const fn id(&self) -> u64 {
        self.0
    }
}

/// Deferred execution for streams.
///
/// Implementations must run tasks passed to [`schedule`](Scheduler::schedule)
/// in a later turn, never inside the call, and in FIFO order. Timer callbacks
/// run no earlier than `delay` after [`set_timer`](Scheduler::set_timer) and
/// never after [`clear_timer`](Scheduler::clear_timer) returned for that handle.
pub trait Scheduler: Send + Sync + Debug + 'static {
    /// Queue `task` to run in a later turn.
    fn schedule(&self, task: Task);

    /// Arm a one-shot timer running `task` after `delay`.
    fn set_timer(&self, delay: Duration, task: Task) -> TimerHandle;

    /// Disarm a timer. Clearing a fired or unknown handle is a no-op.
    fn clear_timer(&self, handle: TimerHandle);

    /// Monotonic time elapsed since the scheduler's origin.
    fn now(&self) -> Duration;
}

/// Shared handle to the scheduler of a subscription.
#[derive(Clone, Debug)]
pub struct SchedulerRef(Arc<dyn Scheduler>);

impl SchedulerRef {
    pub fn new(scheduler: impl Scheduler) -> Self {
        Self(Arc::new(scheduler))
    }

    /// Schedule a closure for a later turn.
    pub fn defer(&self, task: impl FnOnce() + Send + 'static) {
        self.0.schedule(Box::new(task));
    }

    /// Arm a timer running `task` after `delay`.
    pub fn after(&self, delay: Duration, task: impl FnOnce() + Send + 'static) -> TimerHandle {
        self.0.set_timer(delay, Box::new(task))
    }
}

impl<S: Scheduler> From<S> for SchedulerRef {
    fn from(scheduler: S) -> Self {
        Self::new(scheduler)
    }
}

impl Deref for SchedulerRef {
    type Target = dyn Scheduler;

    fn deref(&self) -> &Self::Target {
        self.0.as_ref()
    }
}
