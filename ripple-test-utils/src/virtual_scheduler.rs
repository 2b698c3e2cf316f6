// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use parking_lot::Mutex;
use ripple_core::{Scheduler, Task, TimerHandle};
use std::collections::{BTreeMap, HashMap, VecDeque};
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

/// Deterministic scheduler driven by the test.
///
/// Scheduled tasks queue up in FIFO order and run only when the test calls
/// [`run_until_idle`](VirtualScheduler::run_until_idle),
/// [`advance_by`](VirtualScheduler::advance_by) or
/// [`run_all`](VirtualScheduler::run_all). Timers fire in deadline order, ties
/// broken by arming order, with the clock set to their deadline.
///
/// Clones share the same queue and clock.
#[derive(Clone, Default)]
pub struct VirtualScheduler {
    state: Arc<Mutex<State>>,
}

#[derive(Default)]
struct State {
    now: Duration,
    queue: VecDeque<Task>,
    timers: BTreeMap<(Duration, u64), Task>,
    deadlines: HashMap<u64, Duration>,
    next_timer: u64,
}

impl VirtualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// A scheduler whose clock starts at `now`.
    pub fn starting_at(now: Duration) -> Self {
        let scheduler = Self::new();
        scheduler.state.lock().now = now;
        scheduler
    }

    /// Run queued tasks, including the ones they schedule, until the queue
    /// is empty. The clock does not move.
    ///
    /// Returns the number of tasks run.
    pub fn run_until_idle(&self) -> usize {
        let mut ran = 0;
        loop {
            let task = self.state.lock().queue.pop_front();
            match task {
                Some(task) => {
                    task();
                    ran += 1;
                }
                None => return ran,
            }
        }
    }

    /// Move the clock forward by `duration`, firing every timer that falls
    /// due on the way and draining the queue after each one.
    pub fn advance_by(&self, duration: Duration) {
        let target = self.now().saturating_add(duration);
        self.run_until_idle();
        while let Some((deadline, task)) = self.pop_timer_due_by(Some(target)) {
            self.state.lock().now = deadline;
            task();
            self.run_until_idle();
        }
        self.state.lock().now = target;
    }

    /// Move the clock to `instant` (no-op if it is in the past).
    pub fn advance_to(&self, instant: Duration) {
        let now = self.now();
        if instant > now {
            self.advance_by(instant - now);
        }
    }

    /// Run until no task is queued and no timer is armed.
    pub fn run_all(&self) {
        self.run_until_idle();
        while let Some((deadline, task)) = self.pop_timer_due_by(None) {
            {
                let mut state = self.state.lock();
                if deadline > state.now {
                    state.now = deadline;
                }
            }
            task();
            self.run_until_idle();
        }
    }

    pub fn pending_tasks(&self) -> usize {
        self.state.lock().queue.len()
    }

    pub fn pending_timers(&self) -> usize {
        self.state.lock().timers.len()
    }

    fn pop_timer_due_by(&self, limit: Option<Duration>) -> Option<(Duration, Task)> {
        let mut state = self.state.lock();
        let key = *state.timers.keys().next()?;
        if limit.is_some_and(|limit| key.0 > limit) {
            return None;
        }
        state.deadlines.remove(&key.1);
        state.timers.remove(&key).map(|task| (key.0, task))
    }
}

impl Scheduler for VirtualScheduler {
    fn schedule(&self, task: Task) {
        self.state.lock().queue.push_back(task);
    }

    fn set_timer(&self, delay: Duration, task: Task) -> TimerHandle {
        let mut state = self.state.lock();
        let id = state.next_timer;
        state.next_timer += 1;
        let deadline = state.now.saturating_add(delay);
        state.timers.insert((deadline, id), task);
        state.deadlines.insert(id, deadline);
        TimerHandle::new(id)
    }

    fn clear_timer(&self, handle: TimerHandle) {
        let mut state = self.state.lock();
        if let Some(deadline) = state.deadlines.remove(&handle.id()) {
            state.timers.remove(&(deadline, handle.id()));
        }
    }

    fn now(&self) -> Duration {
        self.state.lock().now
    }
}

impl fmt::Debug for VirtualScheduler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.lock();
        f.debug_struct("VirtualScheduler")
            .field("now", &state.now)
            .field("pending_tasks", &state.queue.len())
            .field("pending_timers", &state.timers.len())
            .finish()
    }
}
