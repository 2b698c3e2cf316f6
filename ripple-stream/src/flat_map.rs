// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::fan_in::{Completion, FanIn};
use crate::map::MapExt;
use ripple_core::{Disposer, Emitter, Observer, Stream};
use std::sync::Arc;

/// Extension trait providing the `flat_map` and `ap` operators.
pub trait FlatMapExt<T> {
    /// Maps each value to a stream and merges the values of all those
    /// streams.
    ///
    /// Every inner stream is subscribed as soon as its value arrives. Inner
    /// subscriptions are neither limited nor queued: several can run at once
    /// and their values interleave in delivery order.
    ///
    /// # Termination
    ///
    /// - Completes once the source and every inner stream completed
    /// - The first failure, from the source or any inner stream, terminates
    ///   immediately and disposes everything else
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ripple_core::Stream;
    /// use ripple_stream::FlatMapExt;
    /// use ripple_test_utils::{Recorder, VirtualScheduler};
    ///
    /// let scheduler = VirtualScheduler::new();
    /// let recorder = Recorder::new();
    ///
    /// let pairs = Stream::from_iter(vec![1, 2]).flat_map(|x| Stream::from_iter(vec![x, x * 10]));
    /// recorder.record(&pairs, &scheduler);
    /// scheduler.run_until_idle();
    ///
    /// assert_eq!(recorder.values(), vec![1, 10, 2, 20]);
    /// ```
    fn flat_map<U, F>(&self, f: F) -> Stream<U>
    where
        U: Send + 'static,
        F: Fn(T) -> Stream<U> + Send + Sync + 'static;

    /// Applies every function of this stream to every value of `values`.
    ///
    /// Equivalent to `self.flat_map(|f| values.map(f))`.
    fn ap<A, B>(&self, values: &Stream<A>) -> Stream<B>
    where
        T: Fn(A) -> B + Send + Sync + 'static,
        A: Send + 'static,
        B: Send + 'static;
}

impl<T: Send + 'static> FlatMapExt<T> for Stream<T> {
    fn flat_map<U, F>(&self, f: F) -> Stream<U>
    where
        U: Send + 'static,
        F: Fn(T) -> Stream<U> + Send + Sync + 'static,
    {
        Stream::new(FlatMap {
            source: self.clone(),
            f: Arc::new(f),
        })
    }

    fn ap<A, B>(&self, values: &Stream<A>) -> Stream<B>
    where
        T: Fn(A) -> B + Send + Sync + 'static,
        A: Send + 'static,
        B: Send + 'static,
    {
        let values = values.clone();
        self.flat_map(move |f: T| values.map(f))
    }
}

/// Extension trait flattening a stream of streams.
pub trait FlattenExt<T> {
    /// Merges the values of every inner stream, as `flat_map(identity)`.
    fn flatten(&self) -> Stream<T>;
}

impl<T: Send + 'static> FlattenExt<T> for Stream<Stream<T>> {
    fn flatten(&self) -> Stream<T> {
        self.flat_map(|inner| inner)
    }
}

struct FlatMap<T, F> {
    source: Stream<T>,
    f: Arc<F>,
}

impl<T, U, F> Emitter<U> for FlatMap<T, F>
where
    T: Send + 'static,
    U: Send + 'static,
    F: Fn(T) -> Stream<U> + Send + Sync + 'static,
{
    fn emit(&self, observer: Observer<U>) -> Disposer {
        let fan_in = FanIn::new(observer, Completion::AllBranches);
        let f = Arc::clone(&self.f);

        let inners = Arc::clone(&fan_in);
        fan_in.attach(&self.source, move |value: T| {
            if inners.is_terminated() {
                return Ok(());
            }
            let inner = f(value);
            let values = Arc::clone(&inners);
            inners.attach(&inner, move |value| values.forward(value));
            Ok(())
        });

        fan_in.disposer()
    }
}
