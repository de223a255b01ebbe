//! # Function-backed hook (`HookFn`)
//!
//! [`HookFn`] adapts a plain closure into an [`ErrorHook`], for policies that need
//! no async work (suppress, count, forward into a channel).
//!
//! ## Example
//! ```rust
//! use tidings::{Emitter, HookFn, Listener, ListenerError};
//! use tokio::sync::mpsc;
//!
//! let (tx, _rx) = mpsc::unbounded_channel::<String>();
//! let hook = HookFn::new(
//!     move |event: &&'static str, _l: &Listener<(u32,)>, _args: &(u32,), err: ListenerError| {
//!         let _ = tx.send(format!("{event}: {err}"));
//!     },
//! );
//! let emitter: Emitter<&'static str, (u32,)> = Emitter::builder().with_error_hook(hook).build();
//! # drop(emitter);
//! ```

use std::fmt;
use std::marker::PhantomData;

use async_trait::async_trait;

use crate::args::Args;
use crate::error::ListenerError;
use crate::event::EventKey;
use crate::hooks::ErrorHook;
use crate::listeners::Listener;

/// Closure-backed failure hook.
pub struct HookFn<F, E, A> {
    f: F,
    _marker: PhantomData<fn(&E, &A)>,
}

impl<F, E, A> HookFn<F, E, A>
where
    F: Fn(&E, &Listener<A>, &A, ListenerError) + Send + Sync + 'static,
{
    /// Wraps `f`.
    pub fn new(f: F) -> Self {
        Self {
            f,
            _marker: PhantomData,
        }
    }
}

#[async_trait]
impl<F, E, A> ErrorHook<E, A> for HookFn<F, E, A>
where
    F: Fn(&E, &Listener<A>, &A, ListenerError) + Send + Sync + 'static,
    E: EventKey,
    A: Args,
{
    async fn on_listener_error(
        &self,
        event: &E,
        listener: &Listener<A>,
        args: &A,
        error: ListenerError,
    ) {
        (self.f)(event, listener, args, error)
    }

    fn name(&self) -> &'static str {
        "hook_fn"
    }
}

impl<F, E, A> fmt::Debug for HookFn<F, E, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HookFn").finish_non_exhaustive()
    }
}
