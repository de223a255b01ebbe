//! # Listener failure hooks.
//!
//! This module provides the [`ErrorHook`] trait and built-in strategies for
//! handling listener failures reported by invocation units.
//!
//! ## Built-in hooks
//! - [`Reraise`] - default; panics inside the failing unit (loud but isolated)
//! - [`HookFn`] - adapts a closure (suppress, count, redirect)
//! - `LogWriter` - logs through `tracing` (feature `logging`)

mod hook;
mod hook_fn;
#[cfg(feature = "logging")]
mod log;
mod reraise;

pub use hook::ErrorHook;
pub use hook_fn::HookFn;
#[cfg(feature = "logging")]
pub use log::LogWriter;
pub use reraise::Reraise;
