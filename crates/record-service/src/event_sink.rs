//! # Event Sink Actor
//!
//! Consumes the fire-and-forget domain events and performs a deliberately
//! slow unit of side work per event before logging it. Because message
//! handling is strictly sequential per actor, a burst of events queues up
//! behind this handler; that backlog is intended behavior and a load-test
//! target, so do not parallelize the sink to make it go away. Only the
//! sink's own task is ever blocked; senders are not.

use crate::messages::RecordEvent;
use actor_core::{Actor, Fault};
use async_trait::async_trait;
use std::time::Duration;
use tracing::info;

pub struct EventSinkActor {
    work_delay: Duration,
}

impl EventSinkActor {
    pub fn new(work_delay: Duration) -> Self {
        Self { work_delay }
    }
}

#[async_trait]
impl Actor for EventSinkActor {
    type Message = RecordEvent;

    async fn handle(&mut self, event: RecordEvent) -> Result<(), Fault> {
        tokio::time::sleep(self.work_delay).await;
        match event {
            RecordEvent::Created(record) => {
                info!(id = ?record.id, "record created event processed");
            }
            RecordEvent::Updated(record) => {
                info!(id = ?record.id, "record updated event processed");
            }
        }
        Ok(())
    }

    async fn pre_start(&mut self) {
        info!(delay_ms = self.work_delay.as_millis() as u64, "event sink started");
    }

    async fn post_stop(&mut self) {
        info!("event sink stopped");
    }
}
