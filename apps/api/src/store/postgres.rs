use async_trait::async_trait;
use serde_json::Value;
use sqlx::PgPool;
use tracing::debug;

use crate::models::prediction::{PredictionRecord, PredictionRow};
use crate::prediction::catalog::Role;
use crate::store::{PredictionStore, StoreError};

/// PostgreSQL-backed history. Each append is a single INSERT, so the database
/// provides the atomicity and same-owner writers never overwrite each other.
#[derive(Clone)]
pub struct PgPredictionStore {
    pool: PgPool,
}

impl PgPredictionStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PredictionStore for PgPredictionStore {
    async fn append(&self, record: &PredictionRecord) -> Result<(), StoreError> {
        let education = serde_json::to_value(&record.education)?;
        let prediction = serde_json::to_value(&record.prediction)?;

        sqlx::query(
            r#"
            INSERT INTO prediction_records (id, owner_id, education, prediction, created_at)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(record.id)
        .bind(&record.owner_id)
        .bind(education)
        .bind(prediction)
        .bind(record.created_at)
        .execute(&self.pool)
        .await
        .map_err(store_error)?;

        debug!("Inserted prediction record {} for owner {}", record.id, record.owner_id);
        Ok(())
    }

    async fn list_by_owner(&self, owner_id: &str) -> Result<Vec<PredictionRecord>, StoreError> {
        let rows = sqlx::query_as::<_, PredictionRow>(
            r#"
            SELECT id, owner_id, education, prediction, created_at
            FROM prediction_records
            WHERE owner_id = $1
            ORDER BY created_at DESC, seq DESC
            "#,
        )
        .bind(owner_id)
        .fetch_all(&self.pool)
        .await
        .map_err(store_error)?;

        rows.into_iter().map(decode_row).collect()
    }
}

/// Connection-level failures are reported as unavailability; anything else
/// is a database error.
fn store_error(err: sqlx::Error) -> StoreError {
    match err {
        sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed => {
            StoreError::Unavailable(err.to_string())
        }
        sqlx::Error::Io(io) => StoreError::Unavailable(io.to_string()),
        other => StoreError::Database(other),
    }
}

/// Turns a stored row back into a record. Role labels are checked against
/// the catalog first so a divergence is reported as such, not as a generic
/// decode failure.
pub fn decode_row(row: PredictionRow) -> Result<PredictionRecord, StoreError> {
    check_roles(&row.prediction)?;

    Ok(PredictionRecord {
        id: row.id,
        owner_id: row.owner_id,
        education: serde_json::from_value(row.education)?,
        prediction: serde_json::from_value(row.prediction)?,
        created_at: row.created_at,
    })
}

fn check_roles(prediction: &Value) -> Result<(), StoreError> {
    let primary = prediction.pointer("/primary/role");
    let alternatives = prediction
        .get("alternatives")
        .and_then(Value::as_array)
        .into_iter()
        .flatten()
        .filter_map(|alt| alt.get("role"));

    for label in primary.into_iter().chain(alternatives).filter_map(Value::as_str) {
        label.parse::<Role>()?;
    }
    Ok(())
}
