// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use parking_lot::Mutex;
use ripple_core::{Disposer, Emitter, Observer, Stream};
use std::sync::Arc;

/// Extension trait providing the `reduce` operator.
pub trait ReduceExt<T> {
    /// Folds the whole stream into one value.
    ///
    /// Nothing is forwarded while the source runs. When it completes, the
    /// final accumulator is emitted once and the stream completes. When it
    /// fails, only the error is forwarded.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ripple_core::Stream;
    /// use ripple_stream::ReduceExt;
    /// use ripple_test_utils::{Event, Recorder, VirtualScheduler};
    ///
    /// let scheduler = VirtualScheduler::new();
    /// let recorder = Recorder::new();
    ///
    /// recorder.record(&Stream::of(3).reduce(0, |acc, x| acc + x), &scheduler);
    /// scheduler.run_until_idle();
    ///
    /// assert_eq!(recorder.events(), vec![Event::Next(3), Event::End(None)]);
    /// ```
    fn reduce<A, F>(&self, initial: A, f: F) -> Stream<A>
    where
        A: Clone + Send + Sync + 'static,
        F: Fn(A, T) -> A + Send + Sync + 'static;
}

impl<T: Send + 'static> ReduceExt<T> for Stream<T> {
    fn reduce<A, F>(&self, initial: A, f: F) -> Stream<A>
    where
        A: Clone + Send + Sync + 'static,
        F: Fn(A, T) -> A + Send + Sync + 'static,
    {
        Stream::new(Reduce {
            source: self.clone(),
            initial,
            f: Arc::new(f),
        })
    }
}

struct Reduce<T, A, F> {
    source: Stream<T>,
    initial: A,
    f: Arc<F>,
}

impl<T, A, F> Emitter<A> for Reduce<T, A, F>
where
    T: Send + 'static,
    A: Clone + Send + Sync + 'static,
    F: Fn(A, T) -> A + Send + Sync + 'static,
{
    fn emit(&self, observer: Observer<A>) -> Disposer {
        // Taken out while `f` runs and once the result is emitted
        let accumulator = Arc::new(Mutex::new(Some(self.initial.clone())));
        let f = Arc::clone(&self.f);

        let folding = Arc::clone(&accumulator);
        let downstream = observer.clone();
        self.source.subscribe(Observer::new(
            observer.scheduler().clone(),
            move |value: T| {
                let mut accumulator = folding.lock();
                if let Some(current) = accumulator.take() {
                    *accumulator = Some(f(current, value));
                }
                Ok(())
            },
            move |termination| match termination {
                Some(error) => downstream.fail(error),
                None => {
                    let result = accumulator.lock().take();
                    match result {
                        Some(value) => {
                            let error = downstream.next(value).err();
                            downstream.end(error);
                        }
                        None => downstream.complete(),
                    }
                }
            },
        ))
    }
}
