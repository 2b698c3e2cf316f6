// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Shared termination bookkeeping for operators with several live branches.

use core::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use parking_lot::Mutex;
use ripple_core::{Disposer, Observer, Result, Stream, Termination};
use std::collections::HashMap;
use std::sync::Arc;

/// When a successful branch end terminates the downstream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Completion {
    /// Once every attached branch completed.
    AllBranches,
    /// As soon as any branch ends.
    FirstEnd,
}

/// Funnels several branches into one downstream observer.
///
/// A failure always terminates immediately and disposes every live branch;
/// success follows the [`Completion`] policy. Nothing is forwarded after
/// termination. Each branch's disposer is released when that branch ends.
pub(crate) struct FanIn<T> {
    downstream: Observer<T>,
    completion: Completion,
    active: AtomicUsize,
    terminated: AtomicBool,
    branches: Mutex<Branches>,
    disposer: Disposer,
}

#[derive(Default)]
struct Branches {
    next_id: u64,
    live: HashMap<u64, Disposer>,
}

impl<T: Send + 'static> FanIn<T> {
    pub(crate) fn new(downstream: Observer<T>, completion: Completion) -> Arc<Self> {
        let fan_in = Arc::new(Self {
            downstream,
            completion,
            active: AtomicUsize::new(0),
            terminated: AtomicBool::new(false),
            branches: Mutex::new(Branches::default()),
            disposer: Disposer::new(),
        });

        let weak = Arc::downgrade(&fan_in);
        fan_in.disposer.add(move || {
            if let Some(fan_in) = weak.upgrade() {
                fan_in.dispose_branches();
            }
        });
        fan_in
    }

    pub(crate) fn is_terminated(&self) -> bool {
        self.terminated.load(Ordering::Acquire)
    }

    pub(crate) fn disposer(&self) -> Disposer {
        self.disposer.clone()
    }

    pub(crate) fn forward(&self, value: T) -> Result<()> {
        if self.is_terminated() {
            return Ok(());
        }
        self.downstream.next(value)
    }

    /// Subscribe `stream` as one more branch, handing its values to `next`.
    pub(crate) fn attach<S, N>(self: &Arc<Self>, stream: &Stream<S>, next: N)
    where
        S: Send + 'static,
        N: Fn(S) -> Result<()> + Send + Sync + 'static,
    {
        let branch = Disposer::new();
        let id = {
            let mut branches = self.branches.lock();
            let id = branches.next_id;
            branches.next_id += 1;
            branches.live.insert(id, branch.clone());
            id
        };
        self.active.fetch_add(1, Ordering::AcqRel);

        let ends = Arc::clone(self);
        let observer = Observer::new(
            self.downstream.scheduler().clone(),
            next,
            move |termination| {
                ends.branches.lock().live.remove(&id);
                ends.close(termination);
            },
        );

        branch.add_disposer(stream.subscribe(observer));
        if self.disposer.is_disposed() {
            self.branches.lock().live.remove(&id);
            branch.dispose();
        }
    }

    fn close(&self, termination: Termination) {
        match termination {
            Some(error) => {
                if !self.terminated.swap(true, Ordering::AcqRel) {
                    self.disposer.dispose();
                    self.downstream.fail(error);
                }
            }
            None => {
                let drained = self.active.fetch_sub(1, Ordering::AcqRel) == 1;
                if self.completion == Completion::AllBranches && !drained {
                    return;
                }
                if !self.terminated.swap(true, Ordering::AcqRel) {
                    self.disposer.dispose();
                    self.downstream.complete();
                }
            }
        }
    }

    fn dispose_branches(&self) {
        let live = core::mem::take(&mut self.branches.lock().live);
        for branch in live.into_values() {
            branch.dispose();
        }
    }
}
