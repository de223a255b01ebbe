//! # Function-backed listener (`Listener`)
//!
//! [`Listener`] wraps a closure together with its [`ListenerKind`] tag, chosen at
//! construction time:
//! - [`Listener::from_fn`] - synchronous, runs to completion inside its unit;
//! - [`Listener::from_async_fn`] - suspend-capable, awaited inside its unit.
//!
//! ## Identity
//! Every constructed listener gets a fresh [`ListenerId`]. Clones share it, so a clone
//! can be used to `delist` the original and re-enlisting a clone under the same event
//! is a no-op.
//!
//! ## Example
//! ```rust
//! use tidings::{Listener, ListenerKind};
//!
//! let greet = Listener::from_fn(|(name,): (String,)| println!("hello {name}"));
//! let save = Listener::from_async_fn(|(name,): (String,)| async move {
//!     let _ = name;
//!     Ok::<_, std::io::Error>(())
//! });
//!
//! assert_eq!(greet.kind(), ListenerKind::Sync);
//! assert_eq!(save.kind(), ListenerKind::Suspend);
//! assert_ne!(greet.id(), save.id());
//! assert_eq!(greet.clone().id(), greet.id());
//! ```

use std::borrow::Cow;
use std::fmt;
use std::future::Future;
use std::hash::{Hash, Hasher};
use std::pin::Pin;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use crate::error::BoxError;
use crate::listeners::ListenerOutput;

/// Global counter for listener identities.
static LISTENER_SEQ: AtomicU64 = AtomicU64::new(1);

/// Boxed future produced by a suspend-capable listener.
pub type BoxListenerFuture = Pin<Box<dyn Future<Output = Result<(), BoxError>> + Send + 'static>>;

/// Process-unique identity of a listener.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(u64);

impl ListenerId {
    fn next() -> Self {
        Self(LISTENER_SEQ.fetch_add(1, Ordering::Relaxed))
    }

    #[cfg(test)]
    pub(crate) fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    /// Returns the raw numeric identity.
    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for ListenerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Execution path a listener is dispatched through.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ListenerKind {
    /// Runs to completion immediately when its unit starts.
    Sync,
    /// May yield before completing; awaited inside its unit.
    Suspend,
}

pub(crate) enum Callable<A> {
    Sync(Box<dyn Fn(A) -> Result<(), BoxError> + Send + Sync>),
    Suspend(Box<dyn Fn(A) -> BoxListenerFuture + Send + Sync>),
}

/// Cloneable handle to a registered (or registrable) callable.
pub struct Listener<A> {
    id: ListenerId,
    name: Cow<'static, str>,
    callable: Arc<Callable<A>>,
}

impl<A: Send + 'static> Listener<A> {
    /// Creates a synchronous listener.
    ///
    /// The closure may return `()` or `Result<(), E>` with `E: Into<BoxError>`.
    pub fn from_fn<F, R>(f: F) -> Self
    where
        F: Fn(A) -> R + Send + Sync + 'static,
        R: ListenerOutput,
    {
        Self::new(
            std::any::type_name::<F>(),
            Callable::Sync(Box::new(move |args| f(args).into_result())),
        )
    }

    /// Creates a suspend-capable listener.
    ///
    /// The closure *creates* a fresh future per invocation.
    pub fn from_async_fn<F, Fut>(f: F) -> Self
    where
        F: Fn(A) -> Fut + Send + Sync + 'static,
        Fut: Future + Send + 'static,
        Fut::Output: ListenerOutput,
    {
        Self::new(
            std::any::type_name::<F>(),
            Callable::Suspend(Box::new(move |args| {
                let fut = f(args);
                Box::pin(async move { fut.await.into_result() })
            })),
        )
    }

    fn new(name: &'static str, callable: Callable<A>) -> Self {
        Self {
            id: ListenerId::next(),
            name: Cow::Borrowed(name),
            callable: Arc::new(callable),
        }
    }

    /// Replaces the name used in logs and hooks.
    ///
    /// The default is the closure's type name, which is verbose; prefer short names.
    pub fn with_name(mut self, name: impl Into<Cow<'static, str>>) -> Self {
        self.name = name.into();
        self
    }

    /// Invokes the listener directly, outside of any emitter.
    ///
    /// Synchronous listeners run when the returned future is first polled.
    pub async fn call(&self, args: A) -> Result<(), BoxError> {
        match self.callable.as_ref() {
            Callable::Sync(f) => f(args),
            Callable::Suspend(f) => f(args).await,
        }
    }
}

impl<A> Listener<A> {
    /// Returns the listener identity.
    pub fn id(&self) -> ListenerId {
        self.id
    }

    /// Returns the listener name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the dispatch variant chosen at construction.
    pub fn kind(&self) -> ListenerKind {
        match self.callable.as_ref() {
            Callable::Sync(_) => ListenerKind::Sync,
            Callable::Suspend(_) => ListenerKind::Suspend,
        }
    }

    pub(crate) fn callable(&self) -> &Callable<A> {
        &self.callable
    }
}

impl<A> Clone for Listener<A> {
    fn clone(&self) -> Self {
        Self {
            id: self.id,
            name: self.name.clone(),
            callable: Arc::clone(&self.callable),
        }
    }
}

impl<A> PartialEq for Listener<A> {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl<A> Eq for Listener<A> {}

impl<A> Hash for Listener<A> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl<A> fmt::Debug for Listener<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Listener")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("kind", &self.kind())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;

    #[tokio::test]
    async fn call_runs_both_variants() {
        let hits = Arc::new(AtomicUsize::new(0));

        let h = Arc::clone(&hits);
        let sync = Listener::from_fn(move |(n,): (usize,)| {
            h.fetch_add(n, Ordering::SeqCst);
        });
        let h = Arc::clone(&hits);
        let suspend = Listener::from_async_fn(move |(n,): (usize,)| {
            let h = Arc::clone(&h);
            async move {
                tokio::task::yield_now().await;
                h.fetch_add(n, Ordering::SeqCst);
            }
        });

        sync.call((1,)).await.unwrap();
        suspend.call((10,)).await.unwrap();
        assert_eq!(hits.load(Ordering::SeqCst), 11);
    }

    #[tokio::test]
    async fn call_returns_listener_error() {
        let failing = Listener::from_fn(|(): ()| Err::<(), _>("nope"));
        let err = failing.call(()).await.unwrap_err();
        assert_eq!(err.to_string(), "nope");
    }

    #[test]
    fn identity_is_shared_by_clones_only() {
        let a = Listener::from_fn(|(): ()| {});
        let b = Listener::from_fn(|(): ()| {});
        assert_eq!(a, a.clone());
        assert_ne!(a, b);
        assert!(a.id() < b.id());
    }

    #[test]
    fn with_name_overrides_type_name() {
        let l = Listener::from_fn(|(): ()| {});
        assert!(l.name().contains("closure"));
        let l = l.with_name("audit");
        assert_eq!(l.name(), "audit");
        assert!(format!("{l:?}").contains("audit"));
    }
}
