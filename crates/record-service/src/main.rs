//! Demo binary: spins up the record system against the in-memory store and
//! walks one record through its lifecycle.

use actor_core::setup_tracing;
use record_service::{InMemoryRepository, RecordFields, RecordSystem, SystemConfig};
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info};

#[tokio::main]
async fn main() {
    setup_tracing();
    info!("starting record system");

    // Keep the demo snappy; production sinks take several seconds per event.
    let config = SystemConfig {
        sink_delay: Duration::from_millis(500),
        ..SystemConfig::default()
    };
    let system = RecordSystem::new(Arc::new(InMemoryRepository::new()), config);

    let fields = RecordFields {
        first_name: "Ann".into(),
        last_name: "Lee".into(),
        address: "1 Main".into(),
        city: "Springfield".into(),
        telephone: "5551234".into(),
    };

    match system.gateway.add(None, fields.clone(), Vec::new()).await {
        Ok(record) => info!(id = ?record.id, "record created"),
        Err(e) => error!(error = %e, status = e.status_hint(), "create failed"),
    }

    match system.gateway.find_by_id(1).await {
        Ok(record) => info!(id = ?record.id, name = %record.last_name, "record fetched"),
        Err(e) => error!(error = %e, "fetch failed"),
    }

    let mut moved = fields;
    moved.city = "Shelbyville".into();
    match system.gateway.update(1, moved).await {
        Ok(record) => info!(id = ?record.id, city = %record.city, "record updated"),
        Err(e) => error!(error = %e, "update failed"),
    }

    match system.gateway.find_all().await {
        Ok(records) => info!(count = records.len(), "records listed"),
        Err(e) => error!(error = %e, "list failed"),
    }

    system.shutdown().await;
    info!("record system stopped");
}
