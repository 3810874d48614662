//! # record-service
//!
//! Fault-tolerant request-processing core for a record-management service,
//! built on [`actor_core`]. Client calls enter through the [`RecordGateway`]
//! (ask pattern with bounded wait and retries), become messages for the
//! [`RecordActor`] (repository calls guarded by a circuit breaker), and
//! successful writes emit domain events consumed by the deliberately slow
//! [`EventSinkActor`].
//!
//! The HTTP layer, payload schema validation, persistence transactions and
//! observability wiring are external collaborators; this crate models only
//! their failure signals.
//!
//! [`RecordGateway`]: gateway::RecordGateway
//! [`RecordActor`]: record_actor::RecordActor
//! [`EventSinkActor`]: event_sink::EventSinkActor

pub mod error;
pub mod event_sink;
pub mod gateway;
pub mod messages;
pub mod model;
pub mod record_actor;
pub mod repository;
pub mod system;

pub use error::ServiceError;
pub use event_sink::EventSinkActor;
pub use gateway::{GatewayConfig, RecordGateway};
pub use messages::{RecordEvent, RecordRequest};
pub use model::{Record, RecordFields, RecordItem};
pub use record_actor::RecordActor;
pub use repository::{InMemoryRepository, Repository, StoreError};
pub use system::{RecordSystem, SystemConfig};
