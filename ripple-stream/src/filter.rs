// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use ripple_core::{Disposer, Emitter, Observer, Stream};
use std::sync::Arc;

/// Extension trait providing the `filter` operator.
pub trait FilterExt<T> {
    /// Forwards only the values for which `predicate` returns `true`.
    ///
    /// Rejected values never reach the downstream `next`. Termination is
    /// forwarded unchanged.
    fn filter<P>(&self, predicate: P) -> Stream<T>
    where
        P: Fn(&T) -> bool + Send + Sync + 'static;
}

impl<T: Send + 'static> FilterExt<T> for Stream<T> {
    fn filter<P>(&self, predicate: P) -> Stream<T>
    where
        P: Fn(&T) -> bool + Send + Sync + 'static,
    {
        Stream::new(Filter {
            source: self.clone(),
            predicate: Arc::new(predicate),
        })
    }
}

struct Filter<T, P> {
    source: Stream<T>,
    predicate: Arc<P>,
}

impl<T, P> Emitter<T> for Filter<T, P>
where
    T: Send + 'static,
    P: Fn(&T) -> bool + Send + Sync + 'static,
{
    fn emit(&self, observer: Observer<T>) -> Disposer {
        let predicate = Arc::clone(&self.predicate);
        let downstream = observer.clone();
        self.source.subscribe(observer.with_next(move |value: T| {
            if predicate(&value) {
                downstream.next(value)
            } else {
                Ok(())
            }
        }))
    }
}
