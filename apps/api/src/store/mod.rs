//! Prediction history storage.
//!
//! Append-only: records are written once and never updated. An append is the
//! unit of atomicity, so concurrent writers for the same owner never lose a
//! record and readers never observe a half-written one.

pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use thiserror::Error;

use crate::models::prediction::PredictionRecord;
use crate::prediction::catalog::UnknownRole;

pub use memory::InMemoryStore;
pub use postgres::PgPredictionStore;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("stored record could not be decoded: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("stored record references {0}")]
    UnknownRole(#[from] UnknownRole),

    #[error("store unavailable: {0}")]
    Unavailable(String),
}

#[async_trait]
pub trait PredictionStore: Send + Sync {
    /// Persists one record, all-or-nothing.
    async fn append(&self, record: &PredictionRecord) -> Result<(), StoreError>;

    /// All records for `owner_id`, newest first.
    async fn list_by_owner(&self, owner_id: &str) -> Result<Vec<PredictionRecord>, StoreError>;
}
