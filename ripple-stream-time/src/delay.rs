// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Extension trait providing the `delay` operator for streams.
//!
//! Each value gets its own timer, armed when the value arrives. Values that
//! arrive in order with the same delay are delivered in order; nothing
//! resequences values whose timers were armed out of order.
//!
//! Failures pass through immediately and disarm every pending value. A
//! successful end is delivered once the last pending value has been.

use crate::gate::Gate;
use core::time::Duration;
use ripple_core::{Disposer, Emitter, Observer, Stream};

/// Extension trait providing the `delay` operator.
pub trait DelayExt<T> {
    /// Delivers every value `duration` after it arrived.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ripple_core::Stream;
    /// use ripple_stream_time::DelayExt;
    /// use ripple_test_utils::{Recorder, VirtualScheduler};
    /// use std::time::Duration;
    ///
    /// let scheduler = VirtualScheduler::new();
    /// let recorder = Recorder::new();
    ///
    /// recorder.record(&Stream::from_iter(vec![1, 2]).delay(Duration::from_secs(1)), &scheduler);
    ///
    /// scheduler.advance_by(Duration::from_millis(999));
    /// assert!(recorder.values().is_empty());
    ///
    /// scheduler.advance_by(Duration::from_millis(1));
    /// assert_eq!(recorder.values(), vec![1, 2]);
    /// ```
    fn delay(&self, duration: Duration) -> Stream<T>;
}

impl<T: Send + 'static> DelayExt<T> for Stream<T> {
    fn delay(&self, duration: Duration) -> Stream<T> {
        Stream::new(Delay {
            source: self.clone(),
            duration,
        })
    }
}

struct Delay<T> {
    source: Stream<T>,
    duration: Duration,
}

impl<T: Send + 'static> Emitter<T> for Delay<T> {
    fn emit(&self, observer: Observer<T>) -> Disposer {
        let scheduler = observer.scheduler().clone();
        let gate = Gate::new(observer);
        let duration = self.duration;

        let values = gate.clone();
        let ends = gate.clone();
        let subscription = self.source.subscribe(Observer::new(
            scheduler,
            move |value: T| {
                if !values.is_terminated() {
                    values.arm(duration, move |gate| gate.deliver(value));
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
