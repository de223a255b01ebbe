//! # One-shot waiters and the `wait_for` handle.
//!
//! A [`Waiter`] pairs a predicate with the sending half of a oneshot channel.
//! The caller keeps the receiving half inside a [`WaitFor`] future.
//!
//! ## State machine
//! ```text
//!            emit: predicate true ──► resolved-success ─┐
//! pending ──┤ emit: predicate Err/panic ─► resolved-failure ─┼─► inert (state = None)
//!            receiver dropped / timer ─► timed-out ──────────┘
//! ```
//!
//! ## Rules
//! - The state is taken out of the waiter on the first resolution; an inert waiter
//!   never evaluates its predicate again.
//! - The predicate never runs under the waiter's lock, so it may emit.
//! - Sending to an abandoned receiver is a silent no-op.
//! - Dropping a [`WaitFor`] removes its waiter from the registry if it is still there.

use std::collections::VecDeque;
use std::fmt;
use std::future::Future;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::pin::Pin;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Weak;
use std::task::{Context, Poll};
use std::time::Duration;

use parking_lot::Mutex;
use tokio::runtime::Handle;
use tokio::sync::oneshot;
use tokio::sync::oneshot::error::TryRecvError;

use crate::args::Args;
use crate::core::emitter::Shared;
use crate::error::{panic_message, BoxError, WaitError};
use crate::event::EventKey;

static WAITER_SEQ: AtomicU64 = AtomicU64::new(1);

pub(crate) type Predicate<A> = Box<dyn Fn(&A) -> Result<bool, BoxError> + Send>;
pub(crate) type Outcome<A> = Result<<A as Args>::Output, WaitError>;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub(crate) struct WaiterId(u64);

struct Pending<A: Args> {
    /// `None` while an evaluation is running.
    predicate: Option<Predicate<A>>,
    /// Emissions that arrived while the predicate was running.
    backlog: VecDeque<A>,
    sender: oneshot::Sender<Outcome<A>>,
}

/// Single-use, predicate-gated listener.
pub(crate) struct Waiter<A: Args> {
    id: WaiterId,
    state: Mutex<Option<Pending<A>>>,
}

impl<A: Args> Waiter<A> {
    pub(crate) fn new(predicate: Predicate<A>) -> (Self, oneshot::Receiver<Outcome<A>>) {
        let (sender, receiver) = oneshot::channel();
        let waiter = Self {
            id: WaiterId(WAITER_SEQ.fetch_add(1, Ordering::Relaxed)),
            state: Mutex::new(Some(Pending {
                predicate: Some(predicate),
                backlog: VecDeque::new(),
                sender,
            })),
        };
        (waiter, receiver)
    }

    pub(crate) fn id(&self) -> WaiterId {
        self.id
    }

    /// Evaluates one emission; returns `true` once the waiter is done.
    ///
    /// The predicate runs with the lock released. An emission that arrives while
    /// another one is being evaluated (from another thread, or from inside the
    /// predicate itself) is queued and evaluated by the running evaluation.
    pub(crate) fn evaluate(&self, args: &A) -> bool {
        let predicate = {
            let mut slot = self.state.lock();
            let Some(pending) = slot.as_mut() else {
                return true;
            };
            if pending.sender.is_closed() {
                *slot = None;
                return true;
            }
            match pending.predicate.take() {
                Some(predicate) => predicate,
                None => {
                    pending.backlog.push_back(args.clone());
                    return false;
                }
            }
        };
        self.drain(predicate, args.clone())
    }

    fn drain(&self, predicate: Predicate<A>, mut args: A) -> bool {
        loop {
            let verdict = catch_unwind(AssertUnwindSafe(|| predicate(&args)));

            let mut slot = self.state.lock();
            let outcome = match verdict {
                Ok(Ok(false)) => {
                    let Some(pending) = slot.as_mut() else {
                        return true;
                    };
                    match pending.backlog.pop_front() {
                        Some(next) => {
                            drop(slot);
                            args = next;
                            continue;
                        }
                        None => {
                            pending.predicate = Some(predicate);
                            return false;
                        }
                    }
                }
                Ok(Ok(true)) => Ok(args.into_output()),
                Ok(Err(error)) => Err(WaitError::Predicate(error)),
                Err(payload) => Err(WaitError::PredicatePanicked {
                    info: panic_message(payload.as_ref()),
                }),
            };

            if let Some(pending) = slot.take() {
                let _ = pending.sender.send(outcome);
            }
            return true;
        }
    }

    #[cfg(test)]
    pub(crate) fn is_inert(&self) -> bool {
        self.state.lock().is_none()
    }
}

/// Removes a still-registered waiter when the wait ends for any reason.
pub(crate) struct WaiterGuard<E: EventKey, A: Args> {
    pub(crate) shared: Weak<Shared<E, A>>,
    pub(crate) event: E,
    pub(crate) id: WaiterId,
}

impl<E: EventKey, A: Args> Drop for WaiterGuard<E, A> {
    fn drop(&mut self) {
        if let Some(shared) = self.shared.upgrade() {
            shared
                .registry
                .lock()
                .remove_waiters(&self.event, &[self.id]);
        }
    }
}

/// Future returned by [`Emitter::wait_for`](crate::Emitter::wait_for).
///
/// The waiter is registered when the `WaitFor` is created, not when it is first
/// polled: emissions that happen before the first poll are still observed.
///
/// Resolves to:
/// - `Ok(())` / `Ok(value)` / `Ok((v1, .., vn))` depending on the argument arity;
/// - `Err(WaitError::Timeout)` when the deadline passes first;
/// - `Err(WaitError::Predicate | PredicatePanicked)` when the predicate failed;
/// - `Err(WaitError::Closed)` when the emitter was dropped.
#[must_use = "a wait does nothing unless awaited; dropping it deregisters the waiter"]
pub struct WaitFor<T> {
    inner: Pin<Box<dyn Future<Output = Result<T, WaitError>> + Send + 'static>>,
}

impl<T: Send + 'static> WaitFor<T> {
    pub(crate) fn new<E, A>(
        receiver: oneshot::Receiver<Result<T, WaitError>>,
        guard: WaiterGuard<E, A>,
        deadline: Option<Duration>,
    ) -> Self
    where
        E: EventKey,
        A: Args<Output = T>,
    {
        let inner = async move {
            let _guard = guard;
            let mut receiver = receiver;
            match receiver.try_recv() {
                Ok(outcome) => return outcome,
                Err(TryRecvError::Closed) => return Err(WaitError::Closed),
                Err(TryRecvError::Empty) => {}
            }

            // the timer needs a runtime; without one the wait has no deadline
            let deadline = match deadline {
                Some(timeout) if Handle::try_current().is_err() => {
                    tracing::warn!(
                        ?timeout,
                        "wait polled outside of a tokio runtime; timeout ignored"
                    );
                    None
                }
                other => other,
            };

            let received = match deadline {
                Some(timeout) => match tokio::time::timeout(timeout, receiver).await {
                    Ok(received) => received,
                    Err(_elapsed) => return Err(WaitError::Timeout { timeout }),
                },
                None => receiver.await,
            };
            received.unwrap_or(Err(WaitError::Closed))
        };
        Self {
            inner: Box::pin(inner),
        }
    }
}

impl<T> Future for WaitFor<T> {
    type Output = Result<T, WaitError>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        self.inner.as_mut().poll(cx)
    }
}

impl<T> fmt::Debug for WaitFor<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WaitFor").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn always(_: &(i32,)) -> Result<bool, BoxError> {
        Ok(true)
    }

    #[test]
    fn resolves_once_then_goes_inert() {
        let (waiter, mut rx) = Waiter::<(i32,)>::new(Box::new(always));

        assert!(waiter.evaluate(&(42,)));
        assert!(waiter.is_inert());
        assert_eq!(rx.try_recv().unwrap().unwrap(), 42);

        // a second emission neither panics nor re-resolves
        assert!(waiter.evaluate(&(7,)));
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn false_predicate_keeps_waiter_pending() {
        let (waiter, mut rx) = Waiter::<(i32,)>::new(Box::new(
            |(x,): &(i32,)| -> Result<bool, BoxError> { Ok(*x == 42) },
        ));

        assert!(!waiter.evaluate(&(10,)));
        assert!(!waiter.is_inert());
        assert!(rx.try_recv().is_err());

        assert!(waiter.evaluate(&(42,)));
        assert_eq!(rx.try_recv().unwrap().unwrap(), 42);
    }

    #[test]
    fn predicate_error_resolves_failure() {
        let (waiter, mut rx) = Waiter::<(i32,)>::new(Box::new(
            |_: &(i32,)| -> Result<bool, BoxError> { Err("division by zero".into()) },
        ));

        assert!(waiter.evaluate(&(10,)));
        let err = rx.try_recv().unwrap().unwrap_err();
        assert!(matches!(err, WaitError::Predicate(ref e) if e.to_string() == "division by zero"));
    }

    #[test]
    fn predicate_panic_resolves_failure() {
        let (waiter, mut rx) = Waiter::<(i32,)>::new(Box::new(
            |(x,): &(i32,)| -> Result<bool, BoxError> {
                if *x == 0 {
                    panic!("zero");
                }
                Ok(true)
            },
        ));

        assert!(waiter.evaluate(&(0,)));
        let err = rx.try_recv().unwrap().unwrap_err();
        assert!(matches!(err, WaitError::PredicatePanicked { ref info } if info == "zero"));
    }

    #[test]
    fn abandoned_receiver_makes_waiter_inert() {
        let (waiter, rx) = Waiter::<(i32,)>::new(Box::new(always));
        drop(rx);

        assert!(waiter.evaluate(&(1,)));
        assert!(waiter.is_inert());
    }
}
