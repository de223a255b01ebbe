//! # Emitter - registration, dispatch and waits.
//!
//! [`Emitter`] owns the [`Registry`] behind a mutex and exposes the public API.
//!
//! ## Architecture
//! ```text
//! enlist / delist / delist_all ──► Registry (listeners)
//! wait_for ──────────────────────► Registry (waiters) ──► WaitFor (oneshot rx)
//!
//! emit(event, args)
//!     ├─► snapshot listeners + waiters (one lock)
//!     ├─► spawn unit per listener ──► runner::run_unit ──► ErrorHook on failure
//!     └─► evaluate waiters in place ──► remove the ones that are done (one lock)
//! ```
//!
//! ## Rules
//! - `emit`, `enlist`, `delist`, `delist_all` never suspend.
//! - The registry lock is never held while user code runs.
//! - Units do not hold the emitter; dropping the last `Emitter` fails pending waits
//!   with `WaitError::Closed`.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tokio::runtime::Handle;

use crate::args::Args;
use crate::core::builder::EmitterBuilder;
use crate::core::config::Config;
use crate::core::registry::Registry;
use crate::core::runner::run_unit;
use crate::core::waiter::{WaitFor, Waiter, WaiterGuard, WaiterId};
use crate::error::EmitterError;
use crate::event::EventKey;
use crate::hooks::{ErrorHook, Reraise};
use crate::listeners::{Listener, PredicateOutput};

pub(crate) struct Shared<E: EventKey, A: Args> {
    pub(crate) registry: Mutex<Registry<E, A>>,
    hook: Arc<dyn ErrorHook<E, A>>,
    config: Config,
}

/// In-process event emitter keyed by `E`, carrying positional arguments `A`.
///
/// Cheap to clone: clones share the same registry.
///
/// ### Properties
/// - **Non-blocking**: `emit()` schedules one tokio task per listener and returns.
/// - **Isolated failures**: a failing listener only reaches the [`ErrorHook`].
/// - **Fire-and-forget**: no delivery, ordering or replay guarantees.
///
/// ## Example
/// ```rust
/// use std::time::Duration;
/// use tidings::{Emitter, Listener};
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let emitter: Emitter<&'static str, (u32,)> = Emitter::new();
///
/// emitter.enlist("tick", Listener::from_fn(|(n,): (u32,)| println!("tick {n}")));
///
/// let next = emitter.wait_for_where("tick", |(n,)| *n > 1, Some(Duration::from_secs(1)));
/// emitter.emit("tick", (1,));
/// emitter.emit("tick", (2,));
///
/// assert_eq!(next.await.unwrap(), 2);
/// # }
/// ```
pub struct Emitter<E: EventKey, A: Args> {
    shared: Arc<Shared<E, A>>,
}

impl<E: EventKey, A: Args> Emitter<E, A> {
    /// Creates an emitter with the default [`Config`] and the [`Reraise`] hook.
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    /// Creates an emitter with `config` and the [`Reraise`] hook.
    pub fn with_config(config: Config) -> Self {
        Self::from_parts(config, Arc::new(Reraise))
    }

    /// Starts a builder for injecting a custom [`ErrorHook`].
    pub fn builder() -> EmitterBuilder<E, A> {
        EmitterBuilder::new(Config::default())
    }

    pub(crate) fn from_parts(config: Config, hook: Arc<dyn ErrorHook<E, A>>) -> Self {
        Self {
            shared: Arc::new(Shared {
                registry: Mutex::new(Registry::new()),
                hook,
                config,
            }),
        }
    }

    /// Returns the configuration this emitter was built with.
    pub fn config(&self) -> &Config {
        &self.shared.config
    }

    /// Registers `listener` under `event` and hands it back unchanged.
    ///
    /// Registering the same listener (or a clone of it) twice under the same
    /// event is a no-op.
    pub fn enlist(&self, event: E, listener: Listener<A>) -> Listener<A> {
        let inserted = self
            .shared
            .registry
            .lock()
            .insert_listener(event.clone(), listener.clone());

        tracing::trace!(
            event = ?event,
            listener = listener.name(),
            listener_id = %listener.id(),
            kind = ?listener.kind(),
            inserted,
            "enlist"
        );
        listener
    }

    /// Decorator form of [`enlist`](Self::enlist).
    ///
    /// Returns a function that registers whatever listener it is applied to under
    /// `event` and hands it back.
    ///
    /// ```rust
    /// use tidings::{Emitter, Listener};
    ///
    /// let emitter: Emitter<&'static str, ()> = Emitter::new();
    /// let on_ready = emitter.enlister("ready");
    ///
    /// let log = on_ready(Listener::from_fn(|(): ()| println!("ready")));
    /// on_ready(log.clone());
    /// assert_eq!(emitter.listener_count(&"ready"), 1);
    /// ```
    pub fn enlister(&self, event: E) -> impl Fn(Listener<A>) -> Listener<A> + Send + Sync + 'static {
        let emitter = self.clone();
        move |listener| emitter.enlist(event.clone(), listener)
    }

    /// Removes `listener` from `event`.
    ///
    /// ### Errors
    /// - [`EmitterError::UnknownEvent`] if nothing was ever enlisted under `event`;
    /// - [`EmitterError::UnknownListener`] if `listener` is not registered there.
    pub fn delist(&self, event: &E, listener: &Listener<A>) -> Result<(), EmitterError> {
        self.shared
            .registry
            .lock()
            .remove_listener(event, listener)?;

        tracing::trace!(event = ?event, listener_id = %listener.id(), "delist");
        Ok(())
    }

    /// Removes every listener of `event`, or of every event when `None`.
    ///
    /// Pending waits are not affected.
    pub fn delist_all(&self, event: Option<&E>) {
        self.shared.registry.lock().clear_listeners(event);
        tracing::trace!(event = ?event, "delist_all");
    }

    /// Emits `event` with `args`.
    ///
    /// 1. Every listener registered at this moment gets its own invocation unit,
    ///    spawned on the current tokio runtime; `emit` does not wait for them.
    /// 2. Every pending wait for `event` evaluates its predicate before `emit` returns;
    ///    the ones that resolve are removed.
    ///
    /// Listener units need a runtime: outside of one they are skipped and an error
    /// is logged. Waits are evaluated either way.
    pub fn emit(&self, event: E, args: A) {
        let (listeners, waiters) = {
            let registry = self.shared.registry.lock();
            (
                registry.snapshot_listeners(&event),
                registry.snapshot_waiters(&event),
            )
        };

        tracing::debug!(
            event = ?event,
            listeners = listeners.len(),
            waiters = waiters.len(),
            "emit"
        );

        if !listeners.is_empty() {
            self.dispatch(&event, listeners, &args);
        }

        if !waiters.is_empty() {
            let done: Vec<WaiterId> = waiters
                .iter()
                .filter(|waiter| waiter.evaluate(&args))
                .map(|waiter| waiter.id())
                .collect();
            self.shared
                .registry
                .lock()
                .remove_waiters(&event, &done);
        }
    }

    fn dispatch(&self, event: &E, listeners: Vec<Listener<A>>, args: &A) {
        let runtime = match Handle::try_current() {
            Ok(runtime) => runtime,
            Err(_) => {
                tracing::error!(
                    event = ?event,
                    skipped = listeners.len(),
                    "emit called outside of a tokio runtime; listeners skipped"
                );
                return;
            }
        };

        for listener in listeners {
            runtime.spawn(run_unit(
                event.clone(),
                listener,
                args.clone(),
                Arc::clone(&self.shared.hook),
                self.shared.config.catch_panics,
            ));
        }
    }

    /// Waits for the next emission of `event`.
    ///
    /// Shorthand for [`wait_for_where`](Self::wait_for_where) with an always-true predicate.
    pub fn wait_for(&self, event: E, timeout: Option<Duration>) -> WaitFor<A::Output> {
        self.wait_for_where(event, |_: &A| true, timeout)
    }

    /// Waits for the next emission of `event` whose arguments satisfy `predicate`.
    ///
    /// The waiter is registered immediately. The returned [`WaitFor`] yields `()`,
    /// the single argument, or the whole tuple depending on the arity of `A`.
    ///
    /// `timeout = None` falls back to [`Config::wait_timeout`].
    ///
    /// ### Errors (from the returned future)
    /// - `WaitError::Timeout` when the deadline passes first;
    /// - `WaitError::Predicate` / `PredicatePanicked` when the predicate fails;
    /// - `WaitError::Closed` when the emitter is dropped first.
    ///
    /// ### Notes
    /// The predicate runs inside `emit`, outside of any lock, and may emit. An
    /// emission that reaches this wait while its predicate is running is queued and
    /// evaluated right after it.
    pub fn wait_for_where<P, R>(
        &self,
        event: E,
        predicate: P,
        timeout: Option<Duration>,
    ) -> WaitFor<A::Output>
    where
        P: Fn(&A) -> R + Send + 'static,
        R: PredicateOutput,
    {
        let (waiter, receiver) =
            Waiter::new(Box::new(move |args: &A| predicate(args).into_verdict()));
        let id = waiter.id();

        self.shared
            .registry
            .lock()
            .insert_waiter(event.clone(), Arc::new(waiter));
        tracing::trace!(event = ?event, ?timeout, "wait_for");

        let guard = WaiterGuard {
            shared: Arc::downgrade(&self.shared),
            event,
            id,
        };
        WaitFor::new(
            receiver,
            guard,
            self.shared.config.resolve_wait_timeout(timeout),
        )
    }

    /// Number of listeners currently registered under `event`.
    pub fn listener_count(&self, event: &E) -> usize {
        self.shared.registry.lock().listener_count(event)
    }

    /// Number of pending waits for `event`.
    pub fn waiter_count(&self, event: &E) -> usize {
        self.shared.registry.lock().waiter_count(event)
    }

    /// Events that have a listener set or pending waits (unordered).
    ///
    /// A listener set emptied by `delist` or `delist_all(Some(..))` is kept, so keys
    /// with zero listeners are listed too; [`listener_count`](Self::listener_count)
    /// tells them apart. Only `delist_all(None)` drops the sets themselves.
    pub fn events(&self) -> Vec<E> {
        self.shared.registry.lock().events()
    }
}

impl<E: EventKey, A: Args> Clone for Emitter<E, A> {
    fn clone(&self) -> Self {
        Self {
            shared: Arc::clone(&self.shared),
        }
    }
}

impl<E: EventKey, A: Args> Default for Emitter<E, A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: EventKey, A: Args> fmt::Debug for Emitter<E, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Emitter")
            .field("config", &self.shared.config)
            .field("hook", &self.shared.hook.name())
            .finish_non_exhaustive()
    }
}
