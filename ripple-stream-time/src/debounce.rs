// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use core::time::Duration;
use parking_lot::Mutex;
use ripple_core::{Disposer, Emitter, Observer, Stream};
use std::sync::Arc;

/// Extension trait providing the `debounce` operator.
pub trait DebounceExt<T> {
    /// Rate-limits the stream on emission time.
    ///
    /// A value arriving at `now` is forwarded iff no value was forwarded in
    /// the preceding `interval`; forwarding moves the watermark to
    /// `now + interval`. Suppressed values are dropped for good and leave the
    /// watermark untouched. The first value always passes. No timer is armed
    /// and the end passes through unchanged.
    ///
    /// The clock is the subscriber's [`Scheduler::now`](ripple_core::Scheduler::now).
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ripple_stream_time::DebounceExt;
    /// use ripple_test_utils::{timed_source, Recorder, VirtualScheduler};
    /// use std::time::Duration;
    ///
    /// let ms = Duration::from_millis;
    /// let scheduler = VirtualScheduler::new();
    /// let recorder = Recorder::new();
    ///
    /// let source = timed_source(vec![(ms(0), 'a'), (ms(5), 'b'), (ms(20), 'c')]);
    /// recorder.record(&source.debounce(ms(10)), &scheduler);
    /// scheduler.run_all();
    ///
    /// assert_eq!(recorder.values(), vec!['a', 'c']);
    /// ```
    fn debounce(&self, interval: Duration) -> Stream<T>;
}

impl<T: Send + 'static> DebounceExt<T> for Stream<T> {
    fn debounce(&self, interval: Duration) -> Stream<T> {
        Stream::new(Debounce {
            source: self.clone(),
            interval,
        })
    }
}

struct Debounce<T> {
    source: Stream<T>,
    interval: Duration,
}

impl<T: Send + 'static> Emitter<T> for Debounce<T> {
    fn emit(&self, observer: Observer<T>) -> Disposer {
        let next_event_time: Arc<Mutex<Option<Duration>>> = Arc::new(Mutex::new(None));
        let interval = self.interval;
        let downstream = observer.clone();

        self.source.subscribe(observer.with_next(move |value: T| {
            let now = downstream.scheduler().now();
            {
                let mut watermark = next_event_time.lock();
                if watermark.is_some_and(|watermark| now < watermark) {
                    ripple_core::trace!("debounce dropped a value at {:?}", now);
                    return Ok(());
                }
                *watermark = Some(now.saturating_add(interval));
            }
            downstream.next(value)
        }))
    }
}
