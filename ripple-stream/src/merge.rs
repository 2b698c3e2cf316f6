// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::fan_in::{Completion, FanIn};
use ripple_core::{Disposer, Emitter, Observer, Stream};
use std::sync::Arc;

/// Extension trait providing the `merge` operator.
pub trait MergeExt<T> {
    /// Subscribes to this stream and `other` at the same time and forwards
    /// the values of both in arrival order.
    ///
    /// Values of one branch keep their relative order; nothing is promised
    /// across branches. Whichever branch ends first decides the termination:
    /// its end, successful or failed, is forwarded at once and the other
    /// branch is disposed.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ripple_core::Stream;
    /// use ripple_stream::MergeExt;
    /// use ripple_test_utils::{Event, Recorder, VirtualScheduler};
    ///
    /// let scheduler = VirtualScheduler::new();
    /// let recorder = Recorder::<i32>::new();
    ///
    /// recorder.record(&Stream::never().merge(&Stream::empty()), &scheduler);
    /// scheduler.run_all();
    ///
    /// assert_eq!(recorder.events(), vec![Event::End(None)]);
    /// ```
    fn merge(&self, other: &Stream<T>) -> Stream<T>;
}

impl<T: Send + 'static> MergeExt<T> for Stream<T> {
    fn merge(&self, other: &Stream<T>) -> Stream<T> {
        Stream::new(Merge {
            first: self.clone(),
            second: other.clone(),
        })
    }
}

struct Merge<T> {
    first: Stream<T>,
    second: Stream<T>,
}

impl<T: Send + 'static> Emitter<T> for Merge<T> {
    fn emit(&self, observer: Observer<T>) -> Disposer {
        let fan_in = FanIn::new(observer, Completion::FirstEnd);
        for branch in [&self.first, &self.second] {
            let values = Arc::clone(&fan_in);
            fan_in.attach(branch, move |value| values.forward(value));
        }
        fan_in.disposer()
    }
}
