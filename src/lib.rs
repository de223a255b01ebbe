//! # tidings
//!
//! **tidings** is a small in-process event emitter for tokio applications.
//!
//! Callers register listeners against event keys, emit events with positional
//! arguments, and may await the next occurrence of an event that matches a predicate.
//!
//! ## Architecture
//! ### Overview
//! ```text
//!   enlist(event, listener)        wait_for(event, predicate, timeout)
//!            │                                   │
//!            ▼                                   ▼
//! ┌───────────────────────────────────────────────────────────────────┐
//! │  Emitter (shared handle)                                          │
//! │  - Registry: event → {Listener}   (identity-deduplicated)         │
//! │  - Registry: event → [Waiter]     (one-shot, predicate-gated)     │
//! │  - ErrorHook (injected failure policy)                            │
//! └──────┬──────────────────────────────────────────────┬─────────────┘
//!        │ emit(event, args)                            │
//!        ▼                                              ▼
//!  ┌──────────────┐ ┌──────────────┐            evaluate waiters inline
//!  │ unit (task)  │ │ unit (task)  │ ...          ├─ true  → resolve WaitFor, remove
//!  │ listener #1  │ │ listener #2  │              ├─ Err   → fail WaitFor, remove
//!  └──────┬───────┘ └──────┬───────┘              └─ false → keep
//!         └─ Err / panic ──┴──► ErrorHook::on_listener_error (inside the unit)
//! ```
//!
//! ### Lifecycle of a wait
//! ```text
//! wait_for() ──► register waiter ──► WaitFor
//!                                      ├─ emission satisfies predicate ─► Ok(value)
//!                                      ├─ predicate fails              ─► Err(Predicate)
//!                                      ├─ deadline passes              ─► Err(Timeout), waiter removed
//!                                      └─ emitter dropped              ─► Err(Closed)
//! ```
//!
//! ## Features
//! | Area              | Description                                                       | Key types / traits                        |
//! |-------------------|-------------------------------------------------------------------|-------------------------------------------|
//! | **Emitter**       | Register, emit, wait; never blocks the caller of `emit`.          | [`Emitter`], [`EmitterBuilder`]            |
//! | **Listeners**     | Sync or suspend-capable callables, tagged at construction.        | [`Listener`], [`ListenerKind`]             |
//! | **Waits**         | Await the next matching emission, with optional timeout.          | [`WaitFor`], [`Args`]                      |
//! | **Failure hooks** | Pluggable policy for listener failures.                           | [`ErrorHook`], [`Reraise`], [`HookFn`]     |
//! | **Errors**        | Typed errors per failure boundary.                                | [`EmitterError`], [`ListenerError`], [`WaitError`] |
//! | **Configuration** | Default wait timeout, panic capture.                              | [`Config`]                                 |
//!
//! ## Optional features
//! - `logging`: exports [`LogWriter`], an error hook that logs through `tracing`.
//!
//! ## Example
//! ```rust
//! use std::time::Duration;
//! use tidings::{Emitter, Listener};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let emitter: Emitter<&'static str, (String, u16)> = Emitter::new();
//!
//!     emitter.enlist(
//!         "connected",
//!         Listener::from_fn(|(host, port): (String, u16)| println!("connected to {host}:{port}")),
//!     );
//!
//!     let ready = emitter.wait_for("connected", Some(Duration::from_secs(1)));
//!     emitter.emit("connected", ("localhost".into(), 8080));
//!
//!     let (host, port) = ready.await?;
//!     assert_eq!((host.as_str(), port), ("localhost", 8080));
//!     Ok(())
//! }
//! ```
mod args;
mod core;
mod error;
mod event;
mod hooks;
mod listeners;

// ---- Public re-exports ----

pub use args::Args;
pub use core::{Config, Emitter, EmitterBuilder, WaitFor};
pub use error::{BoxError, EmitterError, ListenerError, WaitError};
pub use event::EventKey;
pub use hooks::{ErrorHook, HookFn, Reraise};
pub use listeners::{
    BoxListenerFuture, Listener, ListenerId, ListenerKind, ListenerOutput, PredicateOutput,
};

// Optional: a tracing-backed failure hook.
// Enable with: `--features logging`
#[cfg(feature = "logging")]
pub use hooks::LogWriter;
