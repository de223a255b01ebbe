//! Error types used by the emitter, its listeners and its waiters.
//!
//! This module defines three error enums, one per failure boundary:
//!
//! - [`EmitterError`] - registry lookups that failed (`delist` of something not registered).
//! - [`ListenerError`] - a listener failed inside its invocation unit; routed to the
//!   [`ErrorHook`](crate::ErrorHook), never to the caller of `emit`.
//! - [`WaitError`] - a `wait_for` did not produce a value; surfaced to the awaiting caller.
//!
//! All of them provide `as_label` (stable snake_case label for logs) and `as_message`
//! (human-readable detail without the variant prefix).

use std::time::Duration;
use thiserror::Error;

use crate::listeners::ListenerId;

/// Boxed error returned by user-supplied listeners and predicates.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// # Errors produced by the registration API.
#[non_exhaustive]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EmitterError {
    /// The event key has no registration set at all.
    #[error("no listeners registered for event {event}")]
    UnknownEvent {
        /// Debug rendering of the event key.
        event: String,
    },

    /// The event key exists but the listener is not registered under it.
    #[error("listener {listener} is not registered for event {event}")]
    UnknownListener {
        /// Debug rendering of the event key.
        event: String,
        /// Identity of the listener that was looked up.
        listener: ListenerId,
    },
}

impl EmitterError {
    /// Returns a short stable label (snake_case) for use in logs.
    ///
    /// # Example
    /// ```
    /// use tidings::EmitterError;
    ///
    /// let err = EmitterError::UnknownEvent { event: "\"ready\"".into() };
    /// assert_eq!(err.as_label(), "emitter_unknown_event");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            EmitterError::UnknownEvent { .. } => "emitter_unknown_event",
            EmitterError::UnknownListener { .. } => "emitter_unknown_listener",
        }
    }

    /// Returns a human-readable message with error details.
    pub fn as_message(&self) -> String {
        match self {
            EmitterError::UnknownEvent { event } => format!("unknown event: {event}"),
            EmitterError::UnknownListener { event, listener } => {
                format!("unknown listener {listener} for event {event}")
            }
        }
    }
}

/// # Failure of a single listener invocation.
///
/// Produced inside the invocation unit and handed to the configured
/// [`ErrorHook`](crate::ErrorHook). It never propagates to the caller of `emit`.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum ListenerError {
    /// The listener returned an error.
    #[error("listener failed: {0}")]
    Failed(#[source] BoxError),

    /// The listener panicked (only when `Config::catch_panics` is enabled).
    #[error("listener panicked: {info}")]
    Panicked {
        /// Panic payload rendered as text.
        info: String,
    },
}

impl ListenerError {
    /// Returns a short stable label (snake_case) for use in logs.
    pub fn as_label(&self) -> &'static str {
        match self {
            ListenerError::Failed(_) => "listener_failed",
            ListenerError::Panicked { .. } => "listener_panicked",
        }
    }

    /// Returns a human-readable message with error details.
    pub fn as_message(&self) -> String {
        match self {
            ListenerError::Failed(e) => format!("error: {e}"),
            ListenerError::Panicked { info } => format!("panic: {info}"),
        }
    }

    /// Returns the error the listener returned, if it returned one.
    ///
    /// Use this to downcast back to the concrete error type.
    pub fn source_error(&self) -> Option<&(dyn std::error::Error + Send + Sync + 'static)> {
        match self {
            ListenerError::Failed(e) => Some(e.as_ref()),
            ListenerError::Panicked { .. } => None,
        }
    }
}

/// # Errors produced by `wait_for`.
///
/// These are the caller's problem: nothing is recovered locally.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum WaitError {
    /// No satisfying emission happened within the deadline.
    #[error("timed out after {timeout:?}")]
    Timeout {
        /// The timeout that was exceeded.
        timeout: Duration,
    },

    /// The predicate returned an error while evaluating an emission.
    #[error("predicate failed: {0}")]
    Predicate(#[source] BoxError),

    /// The predicate panicked while evaluating an emission.
    #[error("predicate panicked: {info}")]
    PredicatePanicked {
        /// Panic payload rendered as text.
        info: String,
    },

    /// The emitter was dropped before the wait resolved.
    #[error("emitter dropped before the wait resolved")]
    Closed,
}

impl WaitError {
    /// Returns a short stable label (snake_case) for use in logs.
    ///
    /// # Example
    /// ```
    /// use tidings::WaitError;
    /// use std::time::Duration;
    ///
    /// let err = WaitError::Timeout { timeout: Duration::from_secs(1) };
    /// assert_eq!(err.as_label(), "wait_timeout");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            WaitError::Timeout { .. } => "wait_timeout",
            WaitError::Predicate(_) => "wait_predicate_failed",
            WaitError::PredicatePanicked { .. } => "wait_predicate_panicked",
            WaitError::Closed => "wait_closed",
        }
    }

    /// Returns a human-readable message with error details.
    pub fn as_message(&self) -> String {
        match self {
            WaitError::Timeout { timeout } => format!("timeout: {timeout:?}"),
            WaitError::Predicate(e) => format!("predicate error: {e}"),
            WaitError::PredicatePanicked { info } => format!("predicate panic: {info}"),
            WaitError::Closed => "emitter closed".to_string(),
        }
    }

    /// Returns `true` if the wait gave up because of its deadline.
    pub fn is_timeout(&self) -> bool {
        matches!(self, WaitError::Timeout { .. })
    }
}

/// Renders a panic payload the way `std` prints it.
pub(crate) fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(msg) = payload.downcast_ref::<&'static str>() {
        (*msg).to_string()
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        msg.clone()
    } else {
        "unknown panic".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_are_stable() {
        let err = EmitterError::UnknownListener {
            event: "\"a\"".into(),
            listener: ListenerId::from_raw(7),
        };
        assert_eq!(err.as_label(), "emitter_unknown_listener");
        assert_eq!(
            err.to_string(),
            "listener #7 is not registered for event \"a\""
        );

        let err = ListenerError::Panicked { info: "boom".into() };
        assert_eq!(err.as_label(), "listener_panicked");
        assert!(err.source_error().is_none());

        assert_eq!(WaitError::Closed.as_label(), "wait_closed");
        assert!(!WaitError::Closed.is_timeout());
    }

    #[test]
    fn messages_carry_details_without_prefix() {
        let err = EmitterError::UnknownEvent { event: "\"gone\"".into() };
        assert_eq!(err.as_message(), "unknown event: \"gone\"");

        let err = EmitterError::UnknownListener {
            event: "\"a\"".into(),
            listener: ListenerId::from_raw(3),
        };
        assert_eq!(err.as_message(), "unknown listener #3 for event \"a\"");

        assert_eq!(ListenerError::Failed("disk full".into()).as_message(), "error: disk full");
        assert_eq!(
            ListenerError::Panicked { info: "boom".into() }.as_message(),
            "panic: boom"
        );

        let err = WaitError::Timeout { timeout: Duration::from_millis(250) };
        assert_eq!(err.as_label(), "wait_timeout");
        assert_eq!(err.as_message(), "timeout: 250ms");
        assert_eq!(
            WaitError::Predicate("bad input".into()).as_message(),
            "predicate error: bad input"
        );
        assert_eq!(
            WaitError::PredicatePanicked { info: "zero".into() }.as_message(),
            "predicate panic: zero"
        );
        assert_eq!(WaitError::Closed.as_message(), "emitter closed");
    }

    #[test]
    fn failed_listener_keeps_original_error() {
        let err = ListenerError::Failed("disk full".into());
        assert_eq!(err.to_string(), "listener failed: disk full");
        assert_eq!(err.source_error().map(|e| e.to_string()).as_deref(), Some("disk full"));
    }

    #[test]
    fn panic_payloads_render_as_text() {
        let payload: Box<dyn std::any::Any + Send> = Box::new("static");
        assert_eq!(panic_message(payload.as_ref()), "static");

        let payload: Box<dyn std::any::Any + Send> = Box::new(String::from("owned"));
        assert_eq!(panic_message(payload.as_ref()), "owned");

        let payload: Box<dyn std::any::Any + Send> = Box::new(5u8);
        assert_eq!(panic_message(payload.as_ref()), "unknown panic");
    }
}
