//! Return-type adapters for listeners and predicates.
//!
//! Listeners may return `()` or `Result<(), E>`; predicates may return `bool`
//! or `Result<bool, E>`. Both are normalized to `Result<_, BoxError>`.

use crate::error::BoxError;

/// Value a listener may return.
pub trait ListenerOutput: Send + 'static {
    /// Normalizes the value into a dispatch result.
    fn into_result(self) -> Result<(), BoxError>;
}

impl ListenerOutput for () {
    fn into_result(self) -> Result<(), BoxError> {
        Ok(())
    }
}

impl<E> ListenerOutput for Result<(), E>
where
    E: Into<BoxError> + Send + 'static,
{
    fn into_result(self) -> Result<(), BoxError> {
        self.map_err(Into::into)
    }
}

/// Value a wait predicate may return.
pub trait PredicateOutput {
    /// Normalizes the value into a predicate verdict.
    fn into_verdict(self) -> Result<bool, BoxError>;
}

impl PredicateOutput for bool {
    fn into_verdict(self) -> Result<bool, BoxError> {
        Ok(self)
    }
}

impl<E> PredicateOutput for Result<bool, E>
where
    E: Into<BoxError>,
{
    fn into_verdict(self) -> Result<bool, BoxError> {
        self.map_err(Into::into)
    }
}
