//! # Record Gateway
//!
//! The synchronous-looking surface in front of the record actor: each
//! operation sends one request message and waits, bounded by a timeout, for
//! exactly one reply, retrying the identical request a configured number of
//! times before surfacing a retry-exhausted error.
//!
//! Retry bookkeeping is a fresh counter per logical call; attempts from one
//! call never bleed into another. Timeouts, attempt counts and backoff are
//! configuration, not constants.

use crate::error::ServiceError;
use crate::messages::{RecordRequest, Reply};
use crate::model::{Record, RecordFields, RecordItem};
use actor_core::{ActorRef, AskError};
use std::time::Duration;
use tracing::{info, warn};

/// Gateway tuning knobs.
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    /// Bound on the wait for one reply.
    pub reply_timeout: Duration,
    /// Total attempts per logical call, first try included.
    pub max_attempts: u32,
    /// Optional fixed delay between attempts.
    pub backoff: Option<Duration>,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        // max_attempts follows the breaker's default failure threshold + 1.
        Self {
            reply_timeout: Duration::from_secs(30),
            max_attempts: 6,
            backoff: None,
        }
    }
}

/// Client-facing handle for record operations.
#[derive(Clone)]
pub struct RecordGateway {
    actor: ActorRef<RecordRequest>,
    config: GatewayConfig,
}

impl RecordGateway {
    pub fn new(actor: ActorRef<RecordRequest>, config: GatewayConfig) -> Self {
        Self { actor, config }
    }

    pub async fn add(
        &self,
        id: Option<u32>,
        fields: RecordFields,
        items: Vec<RecordItem>,
    ) -> Result<Record, ServiceError> {
        self.call("add", |reply_to| RecordRequest::Add {
            id,
            fields: fields.clone(),
            items: items.clone(),
            reply_to,
        })
        .await
    }

    pub async fn find_by_id(&self, id: u32) -> Result<Record, ServiceError> {
        self.call("find_by_id", |reply_to| RecordRequest::FindById {
            id,
            reply_to,
        })
        .await
    }

    pub async fn find_all(&self) -> Result<Vec<Record>, ServiceError> {
        self.call("find_all", |reply_to| RecordRequest::FindAll { reply_to })
            .await
    }

    pub async fn update(&self, id: u32, fields: RecordFields) -> Result<Record, ServiceError> {
        self.call("update", |reply_to| RecordRequest::Update {
            id,
            fields: fields.clone(),
            reply_to,
        })
        .await
    }

    /// One logical call: ask, retry on retryable failures, give up after
    /// `max_attempts`. Domain outcomes return immediately; a reply that
    /// arrives after the per-attempt timeout is discarded.
    async fn call<T, F>(&self, operation: &'static str, make: F) -> Result<T, ServiceError>
    where
        T: Send + 'static,
        F: Fn(Reply<T>) -> RecordRequest,
    {
        let attempts = self.config.max_attempts.max(1);
        let mut last = ServiceError::Timeout;

        for attempt in 1..=attempts {
            if attempt > 1 {
                if let Some(delay) = self.config.backoff {
                    tokio::time::sleep(delay).await;
                }
            }

            match self
                .actor
                .ask(self.config.reply_timeout, |reply_to| make(reply_to))
                .await
            {
                Ok(Ok(value)) => return Ok(value),
                Ok(Err(err)) if err.is_retryable() => {
                    info!(operation, attempt, error = %err, "attempt failed, retrying");
                    last = err;
                }
                Ok(Err(err)) => return Err(err),
                Err(AskError::Timeout) => {
                    info!(operation, attempt, "no reply within timeout, retrying");
                    last = ServiceError::Timeout;
                }
                Err(transport) => {
                    info!(operation, attempt, error = %transport, "transport failure, retrying");
                    last = ServiceError::Store(transport.to_string());
                }
            }
        }

        warn!(operation, attempts, "retries exhausted");
        Err(ServiceError::RetryExhausted(format!(
            "{operation} failed after {attempts} attempts: {last}"
        )))
    }
}
