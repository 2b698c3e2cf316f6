// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use ripple_core::{Disposer, Emitter, Observer, Stream};

/// Extension trait providing the `concat` operator.
pub trait ConcatExt<T> {
    /// Forwards this stream, then `other`.
    ///
    /// `other` is subscribed only after this stream completed successfully,
    /// so the two never interleave. A failure is forwarded immediately and
    /// `other` is never started.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ripple_core::Stream;
    /// use ripple_stream::ConcatExt;
    /// use ripple_test_utils::{Event, Recorder, VirtualScheduler};
    ///
    /// let scheduler = VirtualScheduler::new();
    /// let recorder = Recorder::new();
    ///
    /// recorder.record(&Stream::of(1).concat(&Stream::of(2)), &scheduler);
    /// scheduler.run_until_idle();
    ///
    /// assert_eq!(
    ///     recorder.events(),
    ///     vec![Event::Next(1), Event::Next(2), Event::End(None)]
    /// );
    /// ```
    fn concat(&self, other: &Stream<T>) -> Stream<T>;
}

impl<T: Send + 'static> ConcatExt<T> for Stream<T> {
    fn concat(&self, other: &Stream<T>) -> Stream<T> {
        Stream::new(Concat {
            first: self.clone(),
            second: other.clone(),
        })
    }
}

struct Concat<T> {
    first: Stream<T>,
    second: Stream<T>,
}

impl<T: Send + 'static> Emitter<T> for Concat<T> {
    fn emit(&self, observer: Observer<T>) -> Disposer {
        let disposer = Disposer::new();
        let subscription = disposer.clone();
        let second = self.second.clone();
        let downstream = observer.clone();

        let first = self
            .first
            .subscribe(observer.with_end(move |termination| match termination {
                Some(error) => downstream.fail(error),
                None => {
                    if subscription.is_disposed() {
                        return;
                    }
                    subscription.add_disposer(second.subscribe(downstream.clone()));
                }
            }));

        disposer.add_disposer(first);
        disposer
    }
}
