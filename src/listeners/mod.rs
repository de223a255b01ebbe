//! # Listener abstractions.
//!
//! This module provides the listener-related types:
//! - [`Listener`] - cloneable handle over a sync or suspend-capable closure
//! - [`ListenerKind`] - the dispatch variant, fixed at construction
//! - [`ListenerId`] - identity used for deduplication and `delist`
//! - [`ListenerOutput`] / [`PredicateOutput`] - accepted return types

mod listener;
mod output;

pub(crate) use listener::Callable;
pub use listener::{BoxListenerFuture, Listener, ListenerId, ListenerKind};
pub use output::{ListenerOutput, PredicateOutput};
