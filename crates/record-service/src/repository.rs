//! # Repository Capability
//!
//! The backing-store contract the record actor consumes. The store is an
//! external, assumed-thread-safe collaborator; only its failure signals are
//! modeled here. [`InMemoryRepository`] is the reference implementation used
//! by the demo binary and the tests.

use crate::model::Record;
use async_trait::async_trait;
use std::collections::BTreeMap;
use tokio::sync::Mutex;

/// Store-level failure.
#[derive(Debug, Clone, thiserror::Error)]
pub enum StoreError {
    /// A uniqueness or referential constraint was violated.
    #[error("integrity constraint violated: {0}")]
    Integrity(String),
    /// The store could not be reached or failed mid-operation.
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// Save/find capability over the backing store.
#[async_trait]
pub trait Repository: Send + Sync {
    /// Persists the record, assigning identity on first save.
    async fn save(&self, record: Record) -> Result<Record, StoreError>;

    /// Looks up one record by id.
    async fn find_by_id(&self, id: u32) -> Result<Option<Record>, StoreError>;

    /// Returns every record in identity order.
    async fn find_all(&self) -> Result<Vec<Record>, StoreError>;
}

/// In-memory store with a uniqueness constraint on (last_name, telephone),
/// which is how the tests and the demo provoke integrity violations.
pub struct InMemoryRepository {
    inner: Mutex<Inner>,
}

struct Inner {
    records: BTreeMap<u32, Record>,
    next_id: u32,
}

impl Inner {
    fn duplicate_of(&self, record: &Record) -> bool {
        self.records.values().any(|existing| {
            existing.id != record.id
                && existing.last_name == record.last_name
                && existing.telephone == record.telephone
        })
    }
}

impl InMemoryRepository {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Inner {
                records: BTreeMap::new(),
                next_id: 1,
            }),
        }
    }
}

impl Default for InMemoryRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Repository for InMemoryRepository {
    async fn save(&self, record: Record) -> Result<Record, StoreError> {
        let mut inner = self.inner.lock().await;
        if inner.duplicate_of(&record) {
            return Err(StoreError::Integrity(format!(
                "record for {} with telephone {} already exists",
                record.last_name, record.telephone
            )));
        }
        let mut record = record;
        let id = match record.id {
            Some(id) => {
                // A pre-assigned identity claims its slot for good; later
                // store-assigned ids must never land on it.
                if inner.next_id <= id {
                    inner.next_id = id + 1;
                }
                id
            }
            None => {
                let id = inner.next_id;
                inner.next_id += 1;
                record.id = Some(id);
                id
            }
        };
        inner.records.insert(id, record.clone());
        Ok(record)
    }

    async fn find_by_id(&self, id: u32) -> Result<Option<Record>, StoreError> {
        let inner = self.inner.lock().await;
        Ok(inner.records.get(&id).cloned())
    }

    async fn find_all(&self) -> Result<Vec<Record>, StoreError> {
        let inner = self.inner.lock().await;
        Ok(inner.records.values().cloned().collect())
    }
}
