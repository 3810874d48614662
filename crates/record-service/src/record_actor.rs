//! # Record Actor
//!
//! The primary message handler: turns CRUD requests into repository calls
//! guarded by a circuit breaker, answers the original sender, and emits
//! domain events to the sink without waiting for it.
//!
//! # Architecture Note
//! The actor is stateless with respect to business data; every record lives
//! in the repository. Its only state is the circuit breaker and that state
//! is per-instance: a supervisor restart builds a fresh actor through the
//! factory and with it a fresh, closed breaker.
//!
//! Failure policy: the caller is always answered with a typed failure
//! value, never left hanging. Domain-expected outcomes (not found,
//! validation, breaker-open, store unavailability) end there. An integrity
//! violation is additionally raised to the supervisor, whose table answers
//! it with a restart, independent of the reply already sent.

use crate::error::ServiceError;
use crate::messages::{RecordEvent, RecordRequest, Reply};
use crate::model::{Record, RecordFields, RecordItem};
use crate::repository::{Repository, StoreError};
use actor_core::{Actor, ActorRef, BreakerConfig, BreakerError, CircuitBreaker, Fault};
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, error, info, warn};

pub struct RecordActor {
    repository: Arc<dyn Repository>,
    breaker: CircuitBreaker,
    sink: ActorRef<RecordEvent>,
}

impl RecordActor {
    pub fn new(
        repository: Arc<dyn Repository>,
        breaker: BreakerConfig,
        sink: ActorRef<RecordEvent>,
    ) -> Self {
        Self {
            repository,
            breaker: CircuitBreaker::new(breaker),
            sink,
        }
    }

    async fn add(
        &mut self,
        id: Option<u32>,
        fields: RecordFields,
        items: Vec<RecordItem>,
    ) -> Result<Record, ServiceError> {
        let record = Record::from_fields(id, fields, items)?;
        let repository = Arc::clone(&self.repository);
        guarded(self.breaker.call(repository.save(record)).await)
    }

    async fn find_by_id(&mut self, id: u32) -> Result<Record, ServiceError> {
        let repository = Arc::clone(&self.repository);
        // An absent id is a semantically expected outcome: the guarded call
        // itself succeeded, so the breaker counter stays untouched.
        guarded(self.breaker.call(repository.find_by_id(id)).await)?
            .ok_or(ServiceError::NotFound(id))
    }

    async fn find_all(&mut self) -> Result<Vec<Record>, ServiceError> {
        let repository = Arc::clone(&self.repository);
        guarded(self.breaker.call(repository.find_all()).await)
    }

    async fn update(&mut self, id: u32, fields: RecordFields) -> Result<Record, ServiceError> {
        let repository = Arc::clone(&self.repository);
        let mut record = guarded(self.breaker.call(repository.find_by_id(id)).await)?
            .ok_or(ServiceError::NotFound(id))?;
        record.apply_fields(fields)?;
        guarded(self.breaker.call(repository.save(record)).await)
    }

    fn answer<T>(
        &self,
        operation: &'static str,
        outcome: Result<T, ServiceError>,
        reply_to: Reply<T>,
        event: impl FnOnce(&T) -> Option<RecordEvent>,
    ) -> Result<(), Fault> {
        match outcome {
            Ok(value) => {
                let event = event(&value);
                let _ = reply_to.send(Ok(value));
                if let Some(event) = event {
                    if !self.sink.tell(event) {
                        warn!(operation, "event sink stopped, domain event dropped");
                    }
                }
                Ok(())
            }
            Err(err) => {
                warn!(operation, error = %err, "request failed");
                let verdict = supervision_fault(&err);
                let _ = reply_to.send(Err(err));
                verdict
            }
        }
    }
}

/// Maps breaker outcomes into the caller-visible error set.
fn guarded<T>(result: Result<T, BreakerError<StoreError>>) -> Result<T, ServiceError> {
    match result {
        Ok(value) => Ok(value),
        Err(BreakerError::Open) => Err(ServiceError::BreakerOpen),
        Err(BreakerError::Timeout) => Err(ServiceError::Timeout),
        Err(BreakerError::Inner(store)) => Err(store.into()),
    }
}

/// Which failures involve the supervisor on top of the reply. Integrity
/// violations are restart-worthy; everything else in the typed error set is
/// domain-expected and already fully handled by answering the caller.
fn supervision_fault(err: &ServiceError) -> Result<(), Fault> {
    match err {
        ServiceError::Integrity(msg) => Err(Fault::Integrity(msg.clone())),
        _ => Ok(()),
    }
}

#[async_trait]
impl Actor for RecordActor {
    type Message = RecordRequest;

    async fn handle(&mut self, msg: RecordRequest) -> Result<(), Fault> {
        match msg {
            RecordRequest::Add {
                id,
                fields,
                items,
                reply_to,
            } => {
                debug!(?fields, "add request received");
                let outcome = self.add(id, fields, items).await;
                self.answer("add", outcome, reply_to, |record| {
                    Some(RecordEvent::Created(record.clone()))
                })
            }
            RecordRequest::FindById { id, reply_to } => {
                debug!(id, "find-by-id request received");
                let outcome = self.find_by_id(id).await;
                self.answer("find_by_id", outcome, reply_to, |_| None)
            }
            RecordRequest::FindAll { reply_to } => {
                debug!("find-all request received");
                let outcome = self.find_all().await;
                self.answer("find_all", outcome, reply_to, |_| None)
            }
            RecordRequest::Update {
                id,
                fields,
                reply_to,
            } => {
                debug!(id, ?fields, "update request received");
                let outcome = self.update(id, fields).await;
                self.answer("update", outcome, reply_to, |record| {
                    Some(RecordEvent::Updated(record.clone()))
                })
            }
        }
    }

    async fn pre_start(&mut self) {
        info!("record actor started");
    }

    async fn pre_restart(&mut self, fault: &Fault) {
        error!(%fault, "record actor restarting");
    }

    async fn post_restart(&mut self, _fault: &Fault) {
        info!("record actor restarted with a fresh circuit breaker");
    }

    async fn post_stop(&mut self) {
        info!("record actor stopped");
    }
}
