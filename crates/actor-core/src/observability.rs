//! # Observability & Tracing
//!
//! Structured logging setup for the runtime and everything built on it.
//! Log verbosity is controlled through the `RUST_LOG` environment variable,
//! e.g. `RUST_LOG=info`, `RUST_LOG=debug`, or per-module filters like
//! `RUST_LOG=actor_core::breaker=debug`.
//!
//! What gets traced:
//! - actor lifecycle (start, restart, stop) with the actor's name
//! - supervision verdicts with the fault that triggered them
//! - circuit breaker transitions (opened / half-open / closed)
//! - request handling and retry attempts in the layers above

/// Initializes the global tracing subscriber.
///
/// Call once at application startup, before spawning any actors.
pub fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .compact()
        .init();
}
