//! # Emitter configuration.
//!
//! Provides [`Config`], the settings an [`Emitter`](crate::Emitter) is built with.
//!
//! ## Sentinel values
//! - `wait_timeout = 0s` → waits without an explicit timeout never time out

use std::time::Duration;

/// Configuration for an emitter.
///
/// ## Field semantics
/// - `wait_timeout`: Deadline applied to `wait_for` calls that pass `None` (`0s` = none)
/// - `catch_panics`: Convert listener panics into [`ListenerError::Panicked`](crate::ListenerError)
///
/// ## Notes
/// All fields are public for flexibility. Prefer the helper accessors to avoid
/// sprinkling sentinel checks (`0`) across the codebase.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    /// Default deadline for waits.
    ///
    /// - `Duration::ZERO` = wait until resolved (or the emitter is dropped)
    /// - `> 0` = waits passing `None` fail with `WaitError::Timeout` after this long
    pub wait_timeout: Duration,

    /// Whether listener panics are caught and routed to the error hook.
    ///
    /// When `false` a panicking listener unwinds its unit directly and the hook
    /// only sees returned errors.
    pub catch_panics: bool,
}

impl Config {
    /// Returns the default wait deadline as an `Option`.
    ///
    /// - `None` → no timeout
    /// - `Some(d)` → waits fail after `d`
    #[inline]
    pub fn default_wait_timeout(&self) -> Option<Duration> {
        if self.wait_timeout == Duration::ZERO {
            None
        } else {
            Some(self.wait_timeout)
        }
    }

    /// Resolves the deadline of one wait: an explicit value wins over the default.
    #[inline]
    pub(crate) fn resolve_wait_timeout(&self, explicit: Option<Duration>) -> Option<Duration> {
        explicit.or_else(|| self.default_wait_timeout())
    }
}

impl Default for Config {
    /// Default configuration:
    ///
    /// - `wait_timeout = 0s` (no timeout)
    /// - `catch_panics = true`
    fn default() -> Self {
        Self {
            wait_timeout: Duration::ZERO,
            catch_panics: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_timeout_means_none() {
        let cfg = Config::default();
        assert_eq!(cfg.default_wait_timeout(), None);
        assert_eq!(cfg.resolve_wait_timeout(None), None);
        assert_eq!(
            cfg.resolve_wait_timeout(Some(Duration::from_millis(5))),
            Some(Duration::from_millis(5))
        );
    }

    #[test]
    fn explicit_timeout_wins_over_default() {
        let cfg = Config {
            wait_timeout: Duration::from_secs(3),
            ..Config::default()
        };
        assert_eq!(cfg.resolve_wait_timeout(None), Some(Duration::from_secs(3)));
        assert_eq!(
            cfg.resolve_wait_timeout(Some(Duration::from_secs(1))),
            Some(Duration::from_secs(1))
        );
    }
}
