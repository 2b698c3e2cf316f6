// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use ripple_core::{Disposer, Stream, StreamError};
use std::time::Duration;

pub fn failure(context: &str) -> StreamError {
    StreamError::failure(context)
}

/// A source emitting each value at its offset from subscription time, then
/// completing at the last offset.
///
/// Offsets are timers on the subscriber's scheduler, so with a
/// [`VirtualScheduler`](crate::VirtualScheduler) the values arrive at exact
/// virtual timestamps.
pub fn timed_source<T>(schedule: Vec<(Duration, T)>) -> Stream<T>
where
    T: Clone + Send + Sync + 'static,
{
    Stream::from_fn(move |observer| {
        let disposer = Disposer::new();
        let scheduler = observer.scheduler().clone();
        let last = schedule
            .iter()
            .map(|(at, _)| *at)
            .max()
            .unwrap_or_default();

        for (at, value) in schedule.iter().cloned() {
            let observer = observer.clone();
            let subscription = disposer.clone();
            let handle = scheduler.after(at, move || {
                if subscription.is_disposed() {
                    return;
                }
                if let Err(error) = observer.next(value) {
                    subscription.dispose();
                    observer.fail(error);
                }
            });
            let timers = scheduler.clone();
            disposer.add(move || timers.clear_timer(handle));
        }

        let subscription = disposer.clone();
        let handle = scheduler.after(last, move || {
            if !subscription.is_disposed() {
                observer.complete();
            }
        });
        let timers = scheduler.clone();
        disposer.add(move || timers.clear_timer(handle));

        disposer
    })
}
