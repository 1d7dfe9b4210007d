//! Cancellable streaming iteration.
//!
//! [`SetIterator`] is the consumer end of a rendezvous between the caller and
//! a dedicated worker thread. The worker takes whatever access it needs to
//! the set (a read lock for [`ThreadSafeSet`](crate::ThreadSafeSet), nothing
//! for a snapshot), then hands elements over one at a time on a bounded
//! channel with a single in-flight slot.
//!
//! The whole delivery runs as one [`Abortable`] future on the worker thread.
//! Stopping aborts it: the future is dropped at its next poll, which drops
//! the read guard and the sender in one place, closing the channel.
//!
//! # Caller obligation
//!
//! While the worker is parked waiting for the consumer, it still holds the
//! set's read lock, so writers to that set wait too. Every handle must
//! eventually be drained, stopped, or dropped (dropping stops it). A handle
//! that is kept alive but never read, or leaked with [`std::mem::forget`],
//! keeps the lock held for as long as it lives. In particular, do not write
//! to a set from the same thread that holds an undrained iterator over it,
//! and do not read from it there either: the lock is writer-fair, so a read
//! queued behind a waiting writer deadlocks. Passing the iterator to another
//! set's `append` or `extend` is fine, since those drain it before locking.
//!
//! # Examples
//!
//! ```rust
//! use sharedset::{Set, ThreadSafeSet};
//!
//! let set: ThreadSafeSet<u32> = (0..100).collect();
//! let mut iterator = set.iterator();
//!
//! let first_three: Vec<u32> = iterator.by_ref().take(3).collect();
//! assert_eq!(first_three.len(), 3);
//!
//! iterator.stop();
//! assert_eq!(iterator.next(), None);
//!
//! // The worker released its read lock, so writers proceed.
//! assert!(set.add(1000));
//! ```

use std::fmt;
use std::pin::Pin;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::task::{Context, Poll};
use std::thread;

use futures::channel::mpsc;
use futures::executor::block_on;
use futures::future::{AbortHandle, AbortRegistration, Abortable, poll_fn};
use futures::task::noop_waker_ref;
use futures::{SinkExt, Stream};

const WORKER_NAME: &str = "sharedset-iterator";

/// Error returned by [`SetIterator::try_next`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TryNextError {
    /// No element is ready yet; the worker is still producing.
    Empty,
    /// The stream is finished: exhausted, stopped, or the worker is gone.
    Closed,
}

impl fmt::Display for TryNextError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(formatter, "set iterator: no element ready"),
            Self::Closed => write!(formatter, "set iterator: stream closed"),
        }
    }
}

impl std::error::Error for TryNextError {}

/// Cloneable, thread-safe stop signal for a [`SetIterator`].
///
/// Stopping is idempotent and may happen before, during, or after
/// exhaustion.
#[derive(Clone)]
pub struct StopHandle {
    stopped: Arc<AtomicBool>,
    abort: AbortHandle,
}

impl StopHandle {
    /// Signals the worker to stop and closes the stream.
    pub fn stop(&self) {
        if !self.stopped.swap(true, Ordering::AcqRel) {
            tracing::trace!("set iterator stop requested");
        }
        self.abort.abort();
    }

    /// Returns `true` once [`StopHandle::stop`] has been called.
    #[must_use]
    pub fn is_stopped(&self) -> bool {
        self.stopped.load(Ordering::Acquire)
    }
}

impl fmt::Debug for StopHandle {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("StopHandle")
            .field("stopped", &self.is_stopped())
            .finish_non_exhaustive()
    }
}

/// How a worker's delivery ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum FeedOutcome {
    /// Every element was handed over.
    Exhausted,
    /// The stop signal aborted the delivery.
    Stopped,
    /// The consumer dropped its end.
    Disconnected,
}

/// Producer end handed to a worker.
pub(crate) struct Feed<T> {
    sender: mpsc::Sender<T>,
    registration: AbortRegistration,
}

impl<T> Feed<T> {
    /// Hands `elements` over one by one until exhausted, stopped, or
    /// disconnected.
    ///
    /// Blocks the calling thread. Anything borrowed by `elements` (a lock
    /// guard, typically) stays borrowed exactly until this returns.
    pub(crate) fn deliver<I>(self, elements: I) -> FeedOutcome
    where
        I: IntoIterator<Item = T>,
    {
        let Self {
            mut sender,
            registration,
        } = self;
        let delivery = async move {
            for element in elements {
                if sender.send(element).await.is_err() {
                    return FeedOutcome::Disconnected;
                }
            }
            FeedOutcome::Exhausted
        };
        block_on(Abortable::new(delivery, registration)).unwrap_or(FeedOutcome::Stopped)
    }
}

/// A single-pass, cancellable stream of set elements.
///
/// Implements both [`Iterator`] (blocking) and [`Stream`] (async). Do not
/// call the blocking [`Iterator::next`] from inside an async task; poll it
/// as a stream there instead. With `StreamExt` in scope the two `next`
/// methods collide, so name the trait: `StreamExt::next(&mut iterator)`.
///
/// Once stopped, no further element is yielded, even one that was already
/// in flight. Dropping the handle stops the worker.
pub struct SetIterator<T> {
    receiver: mpsc::Receiver<T>,
    stop: StopHandle,
}

impl<T: Send + 'static> SetIterator<T> {
    /// Starts a worker thread running `produce`.
    ///
    /// If the thread cannot be spawned the returned iterator is already
    /// closed.
    pub(crate) fn spawn<F>(produce: F) -> Self
    where
        F: FnOnce(Feed<T>) -> FeedOutcome + Send + 'static,
    {
        let (sender, receiver) = mpsc::channel(0);
        let (abort, registration) = AbortHandle::new_pair();
        let feed = Feed {
            sender,
            registration,
        };

        let spawned = thread::Builder::new()
            .name(WORKER_NAME.to_owned())
            .spawn(move || {
                tracing::trace!("set iterator worker started");
                match produce(feed) {
                    FeedOutcome::Exhausted => tracing::trace!("set iterator exhausted"),
                    FeedOutcome::Stopped => {
                        tracing::debug!("set iterator stopped before exhaustion");
                    }
                    FeedOutcome::Disconnected => {
                        tracing::debug!("set iterator consumer went away");
                    }
                }
            });
        if let Err(error) = spawned {
            tracing::error!(%error, "failed to spawn set iterator worker");
        }

        Self {
            receiver,
            stop: StopHandle {
                stopped: Arc::new(AtomicBool::new(false)),
                abort,
            },
        }
    }
}

impl<T> SetIterator<T> {
    /// Stops the worker and closes the stream. Idempotent.
    pub fn stop(&self) {
        self.stop.stop();
    }

    /// Returns a handle that can stop this iterator from another thread.
    #[must_use]
    pub fn stop_handle(&self) -> StopHandle {
        self.stop.clone()
    }

    /// Returns `true` once the iterator has been stopped.
    #[must_use]
    pub fn is_stopped(&self) -> bool {
        self.stop.is_stopped()
    }

    /// Takes the next element without blocking.
    ///
    /// # Errors
    ///
    /// Returns [`TryNextError::Empty`] if the worker has not produced the
    /// next element yet, and [`TryNextError::Closed`] once the stream is
    /// finished.
    pub fn try_next(&mut self) -> Result<T, TryNextError> {
        if self.stop.is_stopped() {
            return Err(TryNextError::Closed);
        }
        let mut context = Context::from_waker(noop_waker_ref());
        match Pin::new(&mut self.receiver).poll_next(&mut context) {
            Poll::Ready(Some(element)) => Ok(element),
            Poll::Ready(None) => Err(TryNextError::Closed),
            Poll::Pending => Err(TryNextError::Empty),
        }
    }
}

impl<T> Iterator for SetIterator<T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        if self.stop.is_stopped() {
            return None;
        }
        let receiver = &mut self.receiver;
        let element = block_on(poll_fn(|context| Pin::new(&mut *receiver).poll_next(context)));
        // A concurrent stop may land while this thread was waiting.
        if self.stop.is_stopped() {
            return None;
        }
        element
    }
}

impl<T> Stream for SetIterator<T> {
    type Item = T;

    fn poll_next(mut self: Pin<&mut Self>, context: &mut Context<'_>) -> Poll<Option<T>> {
        if self.stop.is_stopped() {
            return Poll::Ready(None);
        }
        Pin::new(&mut self.receiver).poll_next(context)
    }
}

impl<T> Drop for SetIterator<T> {
    fn drop(&mut self) {
        self.stop.abort.abort();
        self.receiver.close();
    }
}

impl<T> fmt::Debug for SetIterator<T> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("SetIterator")
            .field("stopped", &self.stop.is_stopped())
            .finish_non_exhaustive()
    }
}

static_assertions::assert_impl_all!(SetIterator<i32>: Send);
static_assertions::assert_impl_all!(StopHandle: Send, Sync);

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::sync::mpsc as std_mpsc;
    use std::time::Duration;

    fn streaming(elements: Vec<u32>) -> SetIterator<u32> {
        SetIterator::spawn(move |feed| feed.deliver(elements))
    }

    #[rstest]
    fn test_drains_to_exhaustion() {
        let mut collected: Vec<u32> = streaming(vec![3, 1, 2]).collect();
        collected.sort_unstable();
        assert_eq!(collected, vec![1, 2, 3]);
    }

    #[rstest]
    fn test_empty_source_closes_immediately() {
        let mut iterator = streaming(Vec::new());
        assert_eq!(iterator.next(), None);
        assert_eq!(iterator.next(), None);
    }

    #[rstest]
    fn test_stop_before_first_element() {
        let mut iterator = streaming((0..10).collect());
        iterator.stop();
        assert_eq!(iterator.next(), None);
        assert_eq!(iterator.try_next(), Err(TryNextError::Closed));
    }

    #[rstest]
    fn test_stop_is_idempotent() {
        let mut iterator = streaming(vec![1]);
        iterator.stop();
        iterator.stop();
        iterator.stop_handle().stop();
        assert!(iterator.is_stopped());
        assert_eq!(iterator.next(), None);
    }

    #[rstest]
    fn test_stop_after_exhaustion() {
        let mut iterator = streaming(vec![1]);
        assert_eq!(iterator.next(), Some(1));
        assert_eq!(iterator.next(), None);
        iterator.stop();
        assert_eq!(iterator.next(), None);
    }

    #[rstest]
    fn test_worker_reports_stop() {
        let (outcome_sender, outcome_receiver) = std_mpsc::channel();
        let mut iterator = SetIterator::spawn(move |feed| {
            let outcome = feed.deliver(0..1_000_u32);
            let _ = outcome_sender.send(outcome);
            outcome
        });

        assert!(iterator.next().is_some());
        iterator.stop();

        let outcome = outcome_receiver
            .recv_timeout(Duration::from_secs(5))
            .expect("worker did not finish after stop");
        assert_eq!(outcome, FeedOutcome::Stopped);
    }

    #[rstest]
    fn test_worker_reports_disconnect_on_drop() {
        let (outcome_sender, outcome_receiver) = std_mpsc::channel();
        let mut iterator = SetIterator::spawn(move |feed| {
            let outcome = feed.deliver(0..1_000_u32);
            let _ = outcome_sender.send(outcome);
            outcome
        });

        assert!(iterator.next().is_some());
        drop(iterator);

        let outcome = outcome_receiver
            .recv_timeout(Duration::from_secs(5))
            .expect("worker did not finish after drop");
        assert!(matches!(
            outcome,
            FeedOutcome::Stopped | FeedOutcome::Disconnected
        ));
    }

    #[rstest]
    fn test_try_next_eventually_yields() {
        let mut iterator = streaming(vec![9]);
        let element = loop {
            match iterator.try_next() {
                Ok(element) => break element,
                Err(TryNextError::Empty) => thread::yield_now(),
                Err(TryNextError::Closed) => panic!("closed before yielding"),
            }
        };
        assert_eq!(element, 9);
    }

    #[rstest]
    fn test_try_next_error_display() {
        assert_eq!(
            TryNextError::Closed.to_string(),
            "set iterator: stream closed"
        );
        assert_eq!(
            TryNextError::Empty.to_string(),
            "set iterator: no element ready"
        );
    }
}
