// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use futures::channel::mpsc::{unbounded, UnboundedSender};
use futures::StreamExt;
use parking_lot::Mutex;
use ripple_core::{Scheduler, Task, TimerHandle};
use std::collections::HashMap;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Weak};
use std::time::Duration;
use tokio::runtime::Handle;
use tokio::task::AbortHandle;
use tokio::time::Instant;

/// Scheduler running every task on one Tokio driver task.
///
/// Scheduled tasks go through an unbounded channel drained by a single
/// spawned driver, so they run one at a time in FIFO order. Timers are Tokio
/// sleeps that push their callback onto the same channel when they expire,
/// which keeps timer callbacks serialized with ordinary tasks.
///
/// The clock is `tokio::time::Instant`, so paused test time
/// (`#[tokio::test(start_paused = true)]`) drives `now()` and the timers.
///
/// Clones share the same driver.
#[derive(Clone)]
pub struct TokioScheduler {
    inner: Arc<Inner>,
}

struct Inner {
    queue: UnboundedSender<Task>,
    handle: Handle,
    timers: Mutex<HashMap<u64, AbortHandle>>,
    next_timer: AtomicU64,
    origin: Instant,
}

impl TokioScheduler {
    /// Create a scheduler on the current Tokio runtime.
    ///
    /// # Panics
    ///
    /// Panics when called outside of a Tokio runtime.
    pub fn new() -> Self {
        Self::with_handle(&Handle::current())
    }

    /// Create a scheduler whose driver and timers run on `handle`.
    pub fn with_handle(handle: &Handle) -> Self {
        let (queue, mut tasks) = unbounded::<Task>();
        handle.spawn(async move {
            ripple_core::debug!("tokio scheduler driver started");
            while let Some(task) = tasks.next().await {
                task();
            }
            ripple_core::debug!("tokio scheduler driver stopped");
        });

        Self {
            inner: Arc::new(Inner {
                queue,
                handle: handle.clone(),
                timers: Mutex::new(HashMap::new()),
                next_timer: AtomicU64::new(0),
                origin: Instant::now(),
            }),
        }
    }

    /// Number of timers armed and not yet fired or cleared.
    pub fn pending_timers(&self) -> usize {
        self.inner.timers.lock().len()
    }
}

impl Inner {
    fn enqueue(&self, task: Task) {
        if self.queue.unbounded_send(task).is_err() {
            ripple_core::warn!("tokio scheduler driver is gone, dropping task");
        }
    }
}

impl Default for TokioScheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl Scheduler for TokioScheduler {
    fn schedule(&self, task: Task) {
        self.inner.enqueue(task);
    }

    fn set_timer(&self, delay: Duration, task: Task) -> TimerHandle {
        let id = self.inner.next_timer.fetch_add(1, Ordering::Relaxed);
        let weak: Weak<Inner> = Arc::downgrade(&self.inner);

        // Held across spawn + insert so that the fired callback, which removes
        // the entry on the driver, always finds it
        let mut timers = self.inner.timers.lock();
        let join = self.inner.handle.spawn(async move {
            tokio::time::sleep(delay).await;
            let Some(inner) = weak.upgrade() else {
                return;
            };
            let registry = Arc::downgrade(&inner);
            inner.enqueue(Box::new(move || {
                let armed = registry
                    .upgrade()
                    .is_some_and(|inner| inner.timers.lock().remove(&id).is_some());
                if armed {
                    task();
                }
            }));
        });
        timers.insert(id, join.abort_handle());

        TimerHandle::new(id)
    }

    fn clear_timer(&self, handle: TimerHandle) {
        if let Some(abort) = self.inner.timers.lock().remove(&handle.id()) {
            ripple_core::trace!("clearing timer {}", handle.id());
            abort.abort();
        }
    }

    fn now(&self) -> Duration {
        self.inner.origin.elapsed()
    }
}

impl fmt::Debug for TokioScheduler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokioScheduler")
            .field("pending_timers", &self.pending_timers())
            .finish_non_exhaustive()
    }
}
