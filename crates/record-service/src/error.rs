//! # Service Errors
//!
//! The typed failure set callers of the gateway observe. Every operation
//! either returns its value or one of these; nothing hangs past its
//! configured timeout and nothing surfaces as a crash.

use crate::repository::StoreError;

/// Caller-visible failure of a record operation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ServiceError {
    /// No record exists with the requested id.
    #[error("record {0} not found")]
    NotFound(u32),
    /// The request fields failed validation.
    #[error("validation failed: {0}")]
    Validation(String),
    /// The store rejected a write on a data-integrity constraint.
    #[error("integrity constraint violated: {0}")]
    Integrity(String),
    /// The guarding circuit breaker rejected the call without trying.
    #[error("circuit breaker open")]
    BreakerOpen,
    /// No reply arrived within the configured wait.
    #[error("no reply within the configured timeout")]
    Timeout,
    /// All retry attempts were spent. Terminal.
    #[error("retries exhausted: {0}")]
    RetryExhausted(String),
    /// A store-level failure that is not an integrity violation.
    #[error("store failure: {0}")]
    Store(String),
}

impl ServiceError {
    /// Whether resending the identical request could plausibly succeed.
    /// Domain outcomes (not found, validation, integrity) are final, and a
    /// breaker-open rejection exists precisely to fail fast; only transport
    /// and availability problems are worth another attempt.
    pub fn is_retryable(&self) -> bool {
        matches!(self, ServiceError::Timeout | ServiceError::Store(_))
    }

    /// Suggested HTTP status for a network-facing front end.
    pub fn status_hint(&self) -> u16 {
        match self {
            ServiceError::NotFound(_) => 404,
            ServiceError::Validation(_) | ServiceError::Integrity(_) => 400,
            ServiceError::BreakerOpen
            | ServiceError::Timeout
            | ServiceError::RetryExhausted(_) => 503,
            ServiceError::Store(_) => 500,
        }
    }
}

impl From<StoreError> for ServiceError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Integrity(msg) => ServiceError::Integrity(msg),
            StoreError::Unavailable(msg) => ServiceError::Store(msg),
        }
    }
}
