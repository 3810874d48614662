//! # Fault Taxonomy
//!
//! Failures that escape a message handler are reported as explicit [`Fault`]
//! values rather than panics. The supervision layer maps each fault kind to
//! a directive (resume/restart/stop/escalate), so handlers signal trouble by
//! returning `Err(Fault)` and never unwind the runtime.

/// A classified failure raised by a message handler.
///
/// The variants are the kinds the default supervision table knows how to
/// judge. Anything that does not fit an explicit category belongs in
/// [`Fault::Other`], which the table escalates to the parent supervisor.
#[derive(Debug, Clone, thiserror::Error)]
pub enum Fault {
    /// Arithmetic or overflow failure. Recoverable; the failing message is
    /// dropped and the actor keeps its state.
    #[error("arithmetic fault: {0}")]
    Arithmetic(String),

    /// A value that was required but absent (the moral equivalent of a
    /// null dereference). The actor is reinitialized.
    #[error("missing value: {0}")]
    MissingValue(String),

    /// Invalid input that the actor cannot recover from.
    #[error("validation failed: {0}")]
    Validation(String),

    /// A data-integrity constraint was violated by a store write.
    #[error("integrity constraint violated: {0}")]
    Integrity(String),

    /// A guarded call was rejected because its circuit breaker is open.
    #[error("circuit breaker open")]
    BreakerOpen,

    /// Anything the handler could not classify.
    #[error("unclassified fault: {0}")]
    Other(String),
}
