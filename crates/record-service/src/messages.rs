//! # Message Contracts
//!
//! The tagged unions exchanged with the record actor and the event sink.
//! Request messages are immutable value objects created at the gateway
//! boundary; each carries everything needed to complete its operation plus
//! the oneshot reply channel for its single answer. Events are one-way and
//! produced only after a successful store write.
//!
//! Dispatch is exhaustive pattern matching: an unhandled request kind is a
//! compile error, not a runtime warning.

use crate::error::ServiceError;
use crate::model::{Record, RecordFields, RecordItem};
use tokio::sync::oneshot;

/// Reply channel for one request.
pub type Reply<T> = oneshot::Sender<Result<T, ServiceError>>;

/// A CRUD request for the record actor.
#[derive(Debug)]
pub enum RecordRequest {
    Add {
        /// Pre-assigned identity, normally absent; the store assigns one.
        id: Option<u32>,
        fields: RecordFields,
        items: Vec<RecordItem>,
        reply_to: Reply<Record>,
    },
    FindById {
        id: u32,
        reply_to: Reply<Record>,
    },
    FindAll {
        reply_to: Reply<Vec<Record>>,
    },
    Update {
        id: u32,
        fields: RecordFields,
        reply_to: Reply<Record>,
    },
}

/// Fire-and-forget domain event for the sink.
#[derive(Debug, Clone)]
pub enum RecordEvent {
    Created(Record),
    Updated(Record),
}
