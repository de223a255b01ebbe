//! Emitter core: registry, dispatch and waits.
//!
//! The public API from this module is [`Emitter`], its [`EmitterBuilder`], its
//! [`Config`] and the [`WaitFor`] future.
//!
//! Internal modules:
//! - [`registry`]: listener sets and waiter lists per event;
//! - [`runner`]: executes one listener invocation unit and routes failures;
//! - [`waiter`]: one-shot waiters and the `WaitFor` handle;
//! - [`emitter`]: the public facade tying them together.

mod builder;
mod config;
mod emitter;
mod registry;
mod runner;
mod waiter;

pub use builder::EmitterBuilder;
pub use config::Config;
pub use emitter::Emitter;
pub use waiter::WaitFor;
