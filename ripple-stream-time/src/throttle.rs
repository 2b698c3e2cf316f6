// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Extension trait providing the `throttle` operators for streams.
//!
//! The first value of a window arms a timer for `interval`; when it fires one
//! value is forwarded and the window closes. The next value opens a new one.
//!
//! - `throttle` forwards the value that opened the window. Later values of
//!   the same window are dropped.
//! - `throttle_latest` forwards the most recent value of the window.
//!
//! Failures pass through immediately and drop the open window. A successful
//! end waits for an open window to be flushed.

use crate::gate::Gate;
use core::time::Duration;
use parking_lot::Mutex;
use ripple_core::{Disposer, Emitter, Observer, Stream};
use std::sync::Arc;

/// Extension trait providing the `throttle` and `throttle_latest` operators.
pub trait ThrottleExt<T> {
    /// Forwards the first value of every window, `interval` after it arrived.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ripple_stream_time::ThrottleExt;
    /// use ripple_test_utils::{timed_source, Recorder, VirtualScheduler};
    /// use std::time::Duration;
    ///
    /// let ms = Duration::from_millis;
    /// let scheduler = VirtualScheduler::new();
    /// let recorder = Recorder::new();
    ///
    /// let source = timed_source(vec![(ms(0), 1), (ms(3), 2), (ms(12), 3)]);
    /// recorder.record(&source.throttle(ms(10)), &scheduler);
    /// scheduler.run_all();
    ///
    /// assert_eq!(recorder.values(), vec![1, 3]);
    /// ```
    fn throttle(&self, interval: Duration) -> Stream<T>;

    /// Forwards the latest value of every window when the window closes.
    fn throttle_latest(&self, interval: Duration) -> Stream<T>;
}

impl<T: Send + 'static> ThrottleExt<T> for Stream<T> {
    fn throttle(&self, interval: Duration) -> Stream<T> {
        Stream::new(Throttle {
            source: self.clone(),
            interval,
            policy: Policy::First,
        })
    }

    fn throttle_latest(&self, interval: Duration) -> Stream<T> {
        Stream::new(Throttle {
            source: self.clone(),
            interval,
            policy: Policy::Latest,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Policy {
    First,
    Latest,
}

struct Throttle<T> {
    source: Stream<T>,
    interval: Duration,
    policy: Policy,
}

struct Window<T> {
    cached: Option<T>,
    open: bool,
}

impl<T: Send + 'static> Emitter<T> for Throttle<T> {
    fn emit(&self, observer: Observer<T>) -> Disposer {
        let scheduler = observer.scheduler().clone();
        let gate = Gate::new(observer);
        let window = Arc::new(Mutex::new(Window {
            cached: None,
            open: false,
        }));
        let interval = self.interval;
        let policy = self.policy;

        let values = gate.clone();
        let ends = gate.clone();
        let subscription = self.source.subscribe(Observer::new(
            scheduler,
            move |value: T| {
                if values.is_terminated() {
                    return Ok(());
                }
                let mut current = window.lock();
                if !current.open {
                    current.open = true;
                    current.cached = Some(value);
                    let closing = Arc::clone(&window);
                    values.arm(interval, move |gate| {
                        let flushed = {
                            let mut current = closing.lock();
                            current.open = false;
                            current.cached.take()
                        };
                        if let Some(value) = flushed {
                            gate.deliver(value);
                        }
                    });
                } else if policy == Policy::Latest {
                    current.cached = Some(value);
                } else {
                    ripple_core::trace!("throttle dropped a value inside the window");
                }
                Ok(())
            },
            move |termination| match termination {
                None => ends.complete_when_drained(),
                Some(error) => ends.fail(error),
            },
        ));

        gate.upstream().add_disposer(subscription);
        gate.disposer()
    }
}
