//! # Engine Errors
//!
//! A staged run can only fail one way: an action failed. The failing
//! action's error value is carried through unchanged — no wrapping, no
//! re-typing — and surfaces as the run's rejection value.

/// Boxed error type accepted from actions.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Failure raised by an action during a staged run.
///
/// Transparent wrapper: `Display` and `source` delegate to the original
/// error, and [`ActionError::downcast_ref`] recovers the concrete type.
#[derive(Debug, thiserror::Error)]
#[error(transparent)]
pub struct ActionError(#[from] BoxError);

impl ActionError {
    /// Wraps any error-like value (`impl Error`, `String`, `&str`, ...).
    pub fn new<E: Into<BoxError>>(source: E) -> Self {
        Self(source.into())
    }

    /// Borrows the original error if it is an `E`.
    pub fn downcast_ref<E: std::error::Error + 'static>(&self) -> Option<&E> {
        self.0.downcast_ref()
    }

    /// Unwraps the original boxed error.
    pub fn into_inner(self) -> BoxError {
        self.0
    }
}
