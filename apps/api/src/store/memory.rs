use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::models::prediction::PredictionRecord;
use crate::store::{PredictionStore, StoreError};

/// Process-local store keyed by owner. Used in tests and when no database is
/// configured; contents are lost on restart.
#[derive(Default)]
pub struct InMemoryStore {
    records: RwLock<HashMap<String, Vec<PredictionRecord>>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PredictionStore for InMemoryStore {
    async fn append(&self, record: &PredictionRecord) -> Result<(), StoreError> {
        // The write guard spans the whole push: no lost appends, no torn reads.
        let mut records = self.records.write().await;
        records
            .entry(record.owner_id.clone())
            .or_default()
            .push(record.clone());
        Ok(())
    }

    async fn list_by_owner(&self, owner_id: &str) -> Result<Vec<PredictionRecord>, StoreError> {
        let records = self.records.read().await;
        let mut owned = records.get(owner_id).cloned().unwrap_or_default();
        // Stable sort, then reverse: equal timestamps come out latest-append first.
        owned.sort_by_key(|r| r.created_at);
        owned.reverse();
        Ok(owned)
    }
}
