// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use core::sync::atomic::{AtomicBool, Ordering};
use core::time::Duration;
use parking_lot::Mutex;
use ripple_core::{Disposer, Observer, StreamError, TimerHandle};
use std::collections::HashMap;
use std::sync::Arc;

/// Downstream side of an operator that delivers values from timers.
///
/// Tracks the armed timers of one subscription. A successful end requested
/// with [`complete_when_drained`](Gate::complete_when_drained) is delivered
/// once no timer is armed; a failure disarms everything and terminates at
/// once. Nothing reaches the downstream after termination or disposal.
pub(crate) struct Gate<T> {
    downstream: Observer<T>,
    armed: Mutex<Armed>,
    completed: AtomicBool,
    terminated: AtomicBool,
    upstream: Disposer,
}

#[derive(Default)]
struct Armed {
    next_seq: u64,
    handles: HashMap<u64, TimerHandle>,
}

impl<T: Send + 'static> Gate<T> {
    pub(crate) fn new(downstream: Observer<T>) -> Arc<Self> {
        Arc::new(Self {
            downstream,
            armed: Mutex::new(Armed::default()),
            completed: AtomicBool::new(false),
            terminated: AtomicBool::new(false),
            upstream: Disposer::new(),
        })
    }

    pub(crate) fn is_terminated(&self) -> bool {
        self.terminated.load(Ordering::Acquire)
    }

    /// Disposer of the source subscription.
    pub(crate) fn upstream(&self) -> &Disposer {
        &self.upstream
    }

    /// Run `task` after `delay`, unless the gate terminates first.
    pub(crate) fn arm<F>(self: &Arc<Self>, delay: Duration, task: F)
    where
        F: FnOnce(&Self) + Send + 'static,
    {
        let gate = Arc::clone(self);
        let mut armed = self.armed.lock();
        let seq = armed.next_seq;
        armed.next_seq += 1;

        let handle = self.downstream.scheduler().after(delay, move || {
            if gate.settle(seq) {
                task(&gate);
                gate.finish_if_drained();
            }
        });
        armed.handles.insert(seq, handle);
    }

    /// Forward `value`; a consumer error fails the gate.
    pub(crate) fn deliver(&self, value: T) {
        if self.is_terminated() {
            return;
        }
        if let Err(error) = self.downstream.next(value) {
            self.fail(error);
        }
    }

    pub(crate) fn complete_when_drained(&self) {
        self.completed.store(true, Ordering::Release);
        self.finish_if_drained();
    }

    pub(crate) fn fail(&self, error: StreamError) {
        if self.terminated.swap(true, Ordering::AcqRel) {
            return;
        }
        self.disarm();
        self.upstream.dispose();
        self.downstream.fail(error);
    }

    /// Disposer for the whole subscription.
    pub(crate) fn disposer(self: &Arc<Self>) -> Disposer {
        let gate = Arc::clone(self);
        let disposer = Disposer::from_fn(move || {
            gate.terminated.store(true, Ordering::Release);
            gate.disarm();
        });
        disposer.add_disposer(self.upstream.clone());
        disposer
    }

    // Removes the timer entry; false if it was disarmed meanwhile.
    fn settle(&self, seq: u64) -> bool {
        let armed = self.armed.lock().handles.remove(&seq).is_some();
        armed && !self.is_terminated()
    }

    fn finish_if_drained(&self) {
        if !self.completed.load(Ordering::Acquire) || !self.armed.lock().handles.is_empty() {
            return;
        }
        if !self.terminated.swap(true, Ordering::AcqRel) {
            self.downstream.complete();
        }
    }

    fn disarm(&self) {
        let handles = core::mem::take(&mut self.armed.lock().handles);
        if !handles.is_empty() {
            ripple_core::trace!("clearing {} pending timers", handles.len());
        }
        let scheduler = self.downstream.scheduler();
        for handle in handles.into_values() {
            scheduler.clear_timer(handle);
        }
    }
}
