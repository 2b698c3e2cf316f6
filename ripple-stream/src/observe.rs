// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Consuming a stream as a future.

use core::future::Future;
use core::pin::Pin;
use core::task::{Context, Poll};
use futures::channel::oneshot;
use parking_lot::Mutex;
use ripple_core::{Disposer, Result, SchedulerRef, Stream, StreamError, Termination};
use std::sync::Arc;

/// Extension trait for awaiting a stream's termination.
pub trait ObserveExt<T: Send + 'static> {
    /// Subscribes on `scheduler`, calling `f` for every value.
    ///
    /// The subscription starts immediately. The returned [`Observation`]
    /// resolves when the stream terminates: `Ok(())` on success, `Err` with
    /// the failure otherwise. Dropping it disposes the subscription.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ripple_core::Stream;
    /// use ripple_runtime::TokioScheduler;
    /// use ripple_stream::ObserveExt;
    /// use std::sync::atomic::{AtomicI32, Ordering};
    /// use std::sync::Arc;
    ///
    /// # #[tokio::main(flavor = "current_thread")]
    /// # async fn main() {
    /// let total = Arc::new(AtomicI32::new(0));
    /// let sum = total.clone();
    ///
    /// Stream::from_iter(vec![1, 2, 3])
    ///     .observe(TokioScheduler::new(), move |x| {
    ///         sum.fetch_add(x, Ordering::SeqCst);
    ///     })
    ///     .await
    ///     .unwrap();
    ///
    /// assert_eq!(total.load(Ordering::SeqCst), 6);
    /// # }
    /// ```
    fn observe<S, F>(&self, scheduler: S, f: F) -> Observation
    where
        S: Into<SchedulerRef>,
        F: Fn(T) + Send + Sync + 'static;

    /// Collects every value into a `Vec`, resolving on termination.
    fn collect_values<S>(&self, scheduler: S) -> impl Future<Output = Result<Vec<T>>> + Send
    where
        S: Into<SchedulerRef>;
}

impl<T: Send + 'static> ObserveExt<T> for Stream<T> {
    fn observe<S, F>(&self, scheduler: S, f: F) -> Observation
    where
        S: Into<SchedulerRef>,
        F: Fn(T) + Send + Sync + 'static,
    {
        let (sender, receiver) = oneshot::channel::<Termination>();
        let sender = Mutex::new(Some(sender));

        let disposer = self.each(scheduler, f, move |termination| {
            if let Some(sender) = sender.lock().take() {
                let _ = sender.send(termination);
            }
        });

        Observation { receiver, disposer }
    }

    fn collect_values<S>(&self, scheduler: S) -> impl Future<Output = Result<Vec<T>>> + Send
    where
        S: Into<SchedulerRef>,
    {
        let values = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&values);
        let observation = self.observe(scheduler, move |value| sink.lock().push(value));

        async move {
            observation.await?;
            let collected = core::mem::take(&mut *values.lock());
            Ok(collected)
        }
    }
}

/// Future resolving when an observed stream terminates.
///
/// Resolves to [`StreamError::Interrupted`] if the subscription was dropped
/// without ever terminating.
#[must_use = "dropping an Observation disposes its subscription"]
#[derive(Debug)]
pub struct Observation {
    receiver: oneshot::Receiver<Termination>,
    disposer: Disposer,
}

impl Observation {
    pub fn disposer(&self) -> &Disposer {
        &self.disposer
    }
}

impl Future for Observation {
    type Output = Result<()>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        match Pin::new(&mut self.receiver).poll(cx) {
            Poll::Ready(Ok(None)) => Poll::Ready(Ok(())),
            Poll::Ready(Ok(Some(error))) => Poll::Ready(Err(error)),
            Poll::Ready(Err(oneshot::Canceled)) => Poll::Ready(Err(StreamError::Interrupted)),
            Poll::Pending => Poll::Pending,
        }
    }
}

impl Drop for Observation {
    fn drop(&mut self) {
        self.disposer.dispose();
    }
}
