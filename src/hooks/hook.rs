//! # Listener failure hook.
//!
//! Provides [`ErrorHook`], the injectable strategy deciding what happens when a
//! listener fails inside its invocation unit.
//!
//! ## Architecture
//! ```text
//! emit(event, args) ──► unit ──► listener(args)
//!                                  └─► Err / panic ──► hook.on_listener_error(..)
//!                                                        ├─ Reraise  → panic in the unit
//!                                                        ├─ LogWriter → tracing::error!
//!                                                        └─ custom   → anything
//! ```
//!
//! ## Rules
//! - The hook runs inside the failing unit, never in the caller of `emit`.
//! - A hook that panics only takes down its own unit.
//! - Sibling units and pending waits are unaffected.
//!
//! ## Example
//! ```rust
//! use async_trait::async_trait;
//! use tidings::{ErrorHook, Listener, ListenerError};
//!
//! struct CountFailures(std::sync::atomic::AtomicUsize);
//!
//! #[async_trait]
//! impl ErrorHook<&'static str, (u32,)> for CountFailures {
//!     async fn on_listener_error(
//!         &self,
//!         _event: &&'static str,
//!         _listener: &Listener<(u32,)>,
//!         _args: &(u32,),
//!         _error: ListenerError,
//!     ) {
//!         self.0.fetch_add(1, std::sync::atomic::Ordering::Relaxed);
//!     }
//!
//!     fn name(&self) -> &'static str { "count-failures" }
//! }
//! ```

use async_trait::async_trait;

use crate::args::Args;
use crate::error::ListenerError;
use crate::event::EventKey;
use crate::listeners::Listener;

/// Strategy invoked when a listener fails.
///
/// ### Implementation requirements
/// - Use async I/O; avoid blocking the executor.
/// - Panicking is allowed and is how [`Reraise`](crate::Reraise) reports failures.
#[async_trait]
pub trait ErrorHook<E, A>: Send + Sync + 'static
where
    E: EventKey,
    A: Args,
{
    /// Handles a failure of `listener` while processing `args` emitted under `event`.
    async fn on_listener_error(
        &self,
        event: &E,
        listener: &Listener<A>,
        args: &A,
        error: ListenerError,
    );

    /// Returns the hook name used in logs.
    ///
    /// The default uses `type_name::<Self>()`, which can be verbose.
    fn name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }
}
