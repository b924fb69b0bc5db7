//! Common result and error types for the gatenet crates.

/// The standard result type for fallible internal operations.
///
/// `Err` indicates a broken internal invariant (a bug in gatenet), not a
/// rejected user request. Rejected requests are reported through the
/// diagnostic sink and the operation returns a failure indicator instead.
pub type GatenetResult<T> = Result<T, InternalError>;

/// An internal error indicating a bug in gatenet, not a caller mistake.
#[derive(Debug, thiserror::Error)]
#[error("internal netlist error: {message}")]
pub struct InternalError {
    /// Description of the internal error.
    pub message: String,
}

impl InternalError {
    /// Creates a new internal error with the given message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl From<String> for InternalError {
    fn from(message: String) -> Self {
        Self { message }
    }
}
