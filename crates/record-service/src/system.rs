//! # System Wiring
//!
//! Orchestration of the record-processing core: builds the root supervisor,
//! spawns the event sink and the record actor with their dependencies, and
//! hands out the gateway. Actors are constructed by plain factory closures
//! taking explicit dependencies; there is no container lifecycle.

use crate::event_sink::EventSinkActor;
use crate::gateway::{GatewayConfig, RecordGateway};
use crate::messages::{RecordEvent, RecordRequest};
use crate::record_actor::RecordActor;
use crate::repository::Repository;
use actor_core::{ActorRef, BreakerConfig, Supervisor, SupervisorStrategy};
use std::sync::Arc;
use std::time::Duration;

/// Top-level configuration for one record system.
#[derive(Debug, Clone)]
pub struct SystemConfig {
    pub breaker: BreakerConfig,
    pub gateway: GatewayConfig,
    /// Per-event side-work duration in the sink.
    pub sink_delay: Duration,
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            breaker: BreakerConfig::default(),
            gateway: GatewayConfig::default(),
            sink_delay: Duration::from_secs(5),
        }
    }
}

/// The running core: a supervisor owning both actors, plus the gateway.
pub struct RecordSystem {
    pub gateway: RecordGateway,
    record: ActorRef<RecordRequest>,
    sink: ActorRef<RecordEvent>,
    supervisor: Supervisor,
}

impl RecordSystem {
    pub fn new(repository: Arc<dyn Repository>, config: SystemConfig) -> Self {
        let mut supervisor = Supervisor::new(SupervisorStrategy::default());

        let sink_delay = config.sink_delay;
        let sink = supervisor.spawn("event-sink", move || EventSinkActor::new(sink_delay));

        let record = {
            let repository = Arc::clone(&repository);
            let breaker = config.breaker.clone();
            let sink = sink.clone();
            supervisor.spawn("record", move || {
                RecordActor::new(Arc::clone(&repository), breaker.clone(), sink.clone())
            })
        };

        let gateway = RecordGateway::new(record.clone(), config.gateway);
        Self {
            gateway,
            record,
            sink,
            supervisor,
        }
    }

    /// Closes both mailboxes and waits for the actors to drain and stop.
    pub async fn shutdown(self) {
        let Self {
            gateway,
            record,
            sink,
            supervisor,
        } = self;
        drop(gateway);
        drop(record);
        drop(sink);
        supervisor.shutdown().await;
    }
}
