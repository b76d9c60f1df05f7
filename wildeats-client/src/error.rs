//! Store error types

use crate::cache::CacheError;
use shared::workflow::TransitionError;
use thiserror::Error;

/// Transport-level outcome of a remote call, before fallback handling.
///
/// The stores match on this internally: `Unavailable` switches them to the
/// fallback cache, everything else propagates as a [`StoreError`].
#[derive(Debug, Error)]
pub enum HttpError {
    /// Connection failure, timeout, or a server error without a structured
    /// body. Triggers degraded mode.
    #[error("service unavailable: {0}")]
    Unavailable(String),

    /// Non-2xx response carrying a structured `{message}` body. Surfaced to
    /// the user verbatim, never masked by fallback.
    #[error("{message}")]
    Api { status: u16, message: String },

    /// A 2xx response whose body did not match the expected entity shape
    #[error("invalid response: {0}")]
    Decode(String),
}

/// Store error taxonomy
///
/// Recoverable conditions (service unavailability) are absorbed inside the
/// stores and only show up as the degraded flag plus a notice; what reaches
/// the caller here is user-actionable.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Structured message from the remote service, or a malformed payload
    /// rejected at the deserialization boundary
    #[error("{0}")]
    Validation(String),

    /// Illegal status transition, rejected before any network call
    #[error(transparent)]
    Conflict(#[from] TransitionError),

    /// Entity absent from both the remote service and the fallback cache
    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: i64 },

    /// Remote service unreachable for an operation with no fallback path
    #[error("service unavailable: {0}")]
    Unavailable(String),

    /// Fallback cache failure
    #[error(transparent)]
    Cache(#[from] CacheError),
}

impl From<HttpError> for StoreError {
    fn from(err: HttpError) -> Self {
        match err {
            HttpError::Unavailable(reason) => Self::Unavailable(reason),
            HttpError::Api { message, .. } => Self::Validation(message),
            HttpError::Decode(detail) => Self::Validation(detail),
        }
    }
}

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;
