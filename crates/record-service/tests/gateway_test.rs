use async_trait::async_trait;
use record_service::model::{Record, RecordFields};
use record_service::repository::{InMemoryRepository, Repository, StoreError};
use record_service::{GatewayConfig, RecordSystem, ServiceError, SystemConfig};
use actor_core::BreakerConfig;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use std::time::Duration;

// --- Test doubles ---

/// Store that always fails, counting how often it was asked.
struct DeadRepository {
    calls: AtomicU32,
}

impl DeadRepository {
    fn new() -> Self {
        Self {
            calls: AtomicU32::new(0),
        }
    }

    fn call_count(&self) -> u32 {
        self.calls.load(Ordering::SeqCst)
    }

    fn refuse<T>(&self) -> Result<T, StoreError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(StoreError::Unavailable("connection refused".into()))
    }
}

#[async_trait]
impl Repository for DeadRepository {
    async fn save(&self, _record: Record) -> Result<Record, StoreError> {
        self.refuse()
    }

    async fn find_by_id(&self, _id: u32) -> Result<Option<Record>, StoreError> {
        self.refuse()
    }

    async fn find_all(&self) -> Result<Vec<Record>, StoreError> {
        self.refuse()
    }
}

/// Store whose first call hangs for `stall`, with every later call instant.
struct SlowOnceRepository {
    stall: Duration,
    calls: AtomicU32,
}

impl SlowOnceRepository {
    fn new(stall: Duration) -> Self {
        Self {
            stall,
            calls: AtomicU32::new(0),
        }
    }

    fn call_count(&self) -> u32 {
        self.calls.load(Ordering::SeqCst)
    }

    async fn maybe_stall(&self) {
        if self.calls.fetch_add(1, Ordering::SeqCst) == 0 {
            tokio::time::sleep(self.stall).await;
        }
    }
}

#[async_trait]
impl Repository for SlowOnceRepository {
    async fn save(&self, record: Record) -> Result<Record, StoreError> {
        self.maybe_stall().await;
        Ok(record)
    }

    async fn find_by_id(&self, _id: u32) -> Result<Option<Record>, StoreError> {
        self.maybe_stall().await;
        Ok(None)
    }

    async fn find_all(&self) -> Result<Vec<Record>, StoreError> {
        self.maybe_stall().await;
        Ok(Vec::new())
    }
}

// --- Helpers ---

fn fields() -> RecordFields {
    RecordFields {
        first_name: "Ann".into(),
        last_name: "Lee".into(),
        address: "1 Main".into(),
        city: "Springfield".into(),
        telephone: "5551234".into(),
    }
}

fn system(repository: Arc<dyn Repository>, gateway: GatewayConfig) -> RecordSystem {
    system_with_breaker(repository, gateway, BreakerConfig::default())
}

fn system_with_breaker(
    repository: Arc<dyn Repository>,
    gateway: GatewayConfig,
    breaker: BreakerConfig,
) -> RecordSystem {
    RecordSystem::new(
        repository,
        SystemConfig {
            breaker,
            gateway,
            sink_delay: Duration::from_millis(0),
        },
    )
}

// --- Tests ---

#[tokio::test]
async fn a_perpetually_failing_backend_gets_exactly_n_attempts() {
    let repository = Arc::new(DeadRepository::new());
    // Raise the failure threshold so the breaker never interferes: every
    // gateway attempt must actually reach the store.
    let breaker = BreakerConfig {
        max_failures: 100,
        ..BreakerConfig::default()
    };
    let gateway = GatewayConfig {
        reply_timeout: Duration::from_secs(1),
        max_attempts: 3,
        backoff: None,
    };
    let system = system_with_breaker(Arc::clone(&repository) as Arc<dyn Repository>, gateway, breaker);

    let err = system.gateway.find_all().await.unwrap_err();
    assert!(matches!(err, ServiceError::RetryExhausted(_)));
    assert_eq!(err.status_hint(), 503);
    assert_eq!(repository.call_count(), 3, "no more, no fewer");

    system.shutdown().await;
}

#[tokio::test]
async fn domain_not_found_returns_immediately_without_retrying() {
    let repository = Arc::new(SlowOnceRepository::new(Duration::ZERO));
    let gateway = GatewayConfig {
        reply_timeout: Duration::from_secs(1),
        max_attempts: 5,
        backoff: None,
    };
    let system = system(Arc::clone(&repository) as Arc<dyn Repository>, gateway);

    let err = system.gateway.find_by_id(42).await.unwrap_err();
    assert_eq!(err, ServiceError::NotFound(42));
    assert_eq!(err.status_hint(), 404);
    assert_eq!(repository.call_count(), 1);

    system.shutdown().await;
}

#[tokio::test(start_paused = true)]
async fn a_timed_out_attempt_is_retried_and_the_late_reply_discarded() {
    let repository = Arc::new(SlowOnceRepository::new(Duration::from_secs(3)));
    let gateway = GatewayConfig {
        reply_timeout: Duration::from_secs(2),
        max_attempts: 3,
        backoff: None,
    };
    let system = system(Arc::clone(&repository) as Arc<dyn Repository>, gateway);

    // First attempt stalls past the reply timeout; the actor finishes it
    // anyway and replies into a void, then serves the resent request.
    let all = system.gateway.find_all().await.unwrap();
    assert!(all.is_empty());
    assert_eq!(repository.call_count(), 2);

    system.shutdown().await;
}

#[tokio::test(start_paused = true)]
async fn backoff_delays_sit_between_attempts() {
    let repository = Arc::new(DeadRepository::new());
    let breaker = BreakerConfig {
        max_failures: 100,
        ..BreakerConfig::default()
    };
    let gateway = GatewayConfig {
        reply_timeout: Duration::from_secs(1),
        max_attempts: 3,
        backoff: Some(Duration::from_secs(5)),
    };
    let system = system_with_breaker(Arc::clone(&repository) as Arc<dyn Repository>, gateway, breaker);

    let started = tokio::time::Instant::now();
    let err = system.gateway.find_all().await.unwrap_err();
    assert!(matches!(err, ServiceError::RetryExhausted(_)));
    // Two gaps of five seconds between three attempts.
    assert!(started.elapsed() >= Duration::from_secs(10));
    assert_eq!(repository.call_count(), 3);

    system.shutdown().await;
}

#[tokio::test]
async fn breaker_open_surfaces_as_service_unavailable_when_retries_are_off() {
    let repository = Arc::new(DeadRepository::new());
    let breaker = BreakerConfig {
        max_failures: 1,
        ..BreakerConfig::default()
    };
    let gateway = GatewayConfig {
        reply_timeout: Duration::from_secs(1),
        max_attempts: 1,
        backoff: None,
    };
    let system = system_with_breaker(Arc::clone(&repository) as Arc<dyn Repository>, gateway, breaker);

    let first = system.gateway.find_all().await.unwrap_err();
    assert!(matches!(first, ServiceError::RetryExhausted(_)));
    assert_eq!(repository.call_count(), 1);

    // Breaker-open is not retried: it fails fast and keeps the store idle.
    let second = system.gateway.find_all().await.unwrap_err();
    assert_eq!(second, ServiceError::BreakerOpen);
    assert_eq!(second.status_hint(), 503);
    assert_eq!(repository.call_count(), 1);

    system.shutdown().await;
}

#[tokio::test]
async fn add_then_find_round_trips_through_the_whole_system() {
    let system = system(
        Arc::new(InMemoryRepository::new()),
        GatewayConfig::default(),
    );

    let saved = system
        .gateway
        .add(None, fields(), Vec::new())
        .await
        .unwrap();
    assert_eq!(saved.id, Some(1));
    assert_eq!(saved.first_name, "Ann");
    assert_eq!(saved.last_name, "Lee");
    assert_eq!(saved.address, "1 Main");
    assert_eq!(saved.city, "Springfield");
    assert_eq!(saved.telephone, "5551234");
    assert!(saved.items.is_empty());

    let fetched = system.gateway.find_by_id(1).await.unwrap();
    assert_eq!(fetched, saved);

    let mut second = fields();
    second.last_name = "Poe".into();
    second.telephone = "5559999".into();
    system.gateway.add(None, second, Vec::new()).await.unwrap();

    let all = system.gateway.find_all().await.unwrap();
    assert_eq!(all.len(), 2);
    assert_eq!(all[0].id, Some(1));
    assert_eq!(all[1].id, Some(2));

    system.shutdown().await;
}
