//! # Circuit Breaker
//!
//! A reusable protection wrapper around a single guarded operation, gating
//! calls through Closed/Open/HalfOpen states.
//!
//! # Architecture Note
//! The breaker takes `&mut self` and holds no lock. It is meant to be owned
//! by exactly one actor instance and driven only from that actor's message
//! handlers; the single-mailbox discipline already guarantees one call is
//! evaluated at a time, so interior mutability would buy nothing. Never
//! share a breaker across actors.

use std::future::Future;
use std::time::Duration;
use tokio::time::Instant;
use tracing::{info, warn};

/// Gate state of a [`CircuitBreaker`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BreakerState {
    /// Calls pass through; consecutive failures are counted.
    Closed,
    /// Calls fail fast without touching the guarded operation.
    Open,
    /// Exactly one trial call is allowed through.
    HalfOpen,
}

/// Circuit breaker tuning knobs.
#[derive(Debug, Clone)]
pub struct BreakerConfig {
    /// Consecutive failures that trip the breaker open.
    pub max_failures: u32,
    /// Upper bound for one guarded call; exceeding it counts as a failure.
    pub call_timeout: Duration,
    /// Open -> HalfOpen dwell time.
    pub reset_timeout: Duration,
}

impl Default for BreakerConfig {
    fn default() -> Self {
        Self {
            max_failures: 5,
            call_timeout: Duration::from_secs(10),
            reset_timeout: Duration::from_secs(10),
        }
    }
}

/// Failure of a guarded call.
#[derive(Debug, thiserror::Error)]
pub enum BreakerError<E> {
    /// Rejected without invoking the operation: the breaker is open.
    #[error("circuit breaker is open")]
    Open,
    /// The operation ran past `call_timeout` and was abandoned.
    #[error("guarded call timed out")]
    Timeout,
    /// The operation itself failed.
    #[error("{0}")]
    Inner(E),
}

/// Consecutive-failure circuit breaker, exclusively owned by one actor.
pub struct CircuitBreaker {
    config: BreakerConfig,
    state: BreakerState,
    failures: u32,
    opened_at: Option<Instant>,
}

impl CircuitBreaker {
    pub fn new(config: BreakerConfig) -> Self {
        Self {
            config,
            state: BreakerState::Closed,
            failures: 0,
            opened_at: None,
        }
    }

    /// Current gate state. An open breaker keeps reporting `Open` until the
    /// next call observes that the dwell time has elapsed.
    pub fn state(&self) -> BreakerState {
        self.state
    }

    /// Consecutive-failure counter. Reset to zero by any success.
    pub fn failure_count(&self) -> u32 {
        self.failures
    }

    /// Runs `op` through the gate.
    ///
    /// While open, fails fast with [`BreakerError::Open`] until the dwell
    /// time has elapsed, after which the current call becomes the single
    /// half-open trial. A successful trial closes the breaker and zeroes the
    /// counter; a failed or timed-out trial re-opens it and restarts the
    /// dwell timer.
    pub async fn call<T, E, F>(&mut self, op: F) -> Result<T, BreakerError<E>>
    where
        F: Future<Output = Result<T, E>>,
    {
        if self.state == BreakerState::Open {
            let dwell_elapsed = self
                .opened_at
                .is_some_and(|since| since.elapsed() >= self.config.reset_timeout);
            if !dwell_elapsed {
                return Err(BreakerError::Open);
            }
            self.state = BreakerState::HalfOpen;
            warn!("circuit breaker half-open, admitting one trial call");
        }

        match tokio::time::timeout(self.config.call_timeout, op).await {
            Ok(Ok(value)) => {
                self.on_success();
                Ok(value)
            }
            Ok(Err(e)) => {
                self.on_failure();
                Err(BreakerError::Inner(e))
            }
            Err(_) => {
                self.on_failure();
                Err(BreakerError::Timeout)
            }
        }
    }

    fn on_success(&mut self) {
        if self.state == BreakerState::HalfOpen {
            info!("circuit breaker closed after successful trial");
        }
        self.state = BreakerState::Closed;
        self.failures = 0;
        self.opened_at = None;
    }

    fn on_failure(&mut self) {
        match self.state {
            BreakerState::Closed => {
                self.failures += 1;
                if self.failures >= self.config.max_failures {
                    self.trip();
                }
            }
            BreakerState::HalfOpen => self.trip(),
            // No call executes while open, so no failure can be recorded.
            BreakerState::Open => {}
        }
    }

    fn trip(&mut self) {
        self.state = BreakerState::Open;
        self.opened_at = Some(Instant::now());
        warn!(
            reset_timeout_secs = self.config.reset_timeout.as_secs(),
            "circuit breaker opened"
        );
    }
}
