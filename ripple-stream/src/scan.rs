// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use parking_lot::Mutex;
use ripple_core::{Disposer, Emitter, Observer, Stream};
use std::sync::Arc;

/// Extension trait providing the `scan` operator.
pub trait ScanExt<T> {
    /// Emits the running accumulation of the stream.
    ///
    /// Each subscription starts from its own copy of `initial`. For every
    /// value, the accumulator becomes `f(accumulator, value)` and the new
    /// accumulator is forwarded.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ripple_core::Stream;
    /// use ripple_stream::ScanExt;
    /// use ripple_test_utils::{Recorder, VirtualScheduler};
    ///
    /// let scheduler = VirtualScheduler::new();
    /// let recorder = Recorder::new();
    ///
    /// let sums = Stream::from_iter(vec![1, 2, 3]).scan(0, |acc, x| acc + x);
    /// recorder.record(&sums, &scheduler);
    /// scheduler.run_until_idle();
    ///
    /// assert_eq!(recorder.values(), vec![1, 3, 6]);
    /// ```
    fn scan<A, F>(&self, initial: A, f: F) -> Stream<A>
    where
        A: Clone + Send + Sync + 'static,
        F: Fn(A, T) -> A + Send + Sync + 'static;
}

impl<T: Send + 'static> ScanExt<T> for Stream<T> {
    fn scan<A, F>(&self, initial: A, f: F) -> Stream<A>
    where
        A: Clone + Send + Sync + 'static,
        F: Fn(A, T) -> A + Send + Sync + 'static,
    {
        Stream::new(Scan {
            source: self.clone(),
            initial,
            f: Arc::new(f),
        })
    }
}

struct Scan<T, A, F> {
    source: Stream<T>,
    initial: A,
    f: Arc<F>,
}

impl<T, A, F> Emitter<A> for Scan<T, A, F>
where
    T: Send + 'static,
    A: Clone + Send + Sync + 'static,
    F: Fn(A, T) -> A + Send + Sync + 'static,
{
    fn emit(&self, observer: Observer<A>) -> Disposer {
        let accumulator = Arc::new(Mutex::new(self.initial.clone()));
        let f = Arc::clone(&self.f);
        let downstream = observer.clone();

        self.source.subscribe(observer.with_next(move |value: T| {
            let next = {
                let mut accumulator = accumulator.lock();
                let next = f(accumulator.clone(), value);
                *accumulator = next.clone();
                next
            };
            downstream.next(next)
        }))
    }
}
