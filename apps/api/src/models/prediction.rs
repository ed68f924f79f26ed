use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;
use uuid::Uuid;

use crate::models::profile::EducationProfile;
use crate::prediction::catalog::Role;

/// A ranked role with its clamped confidence (0 to 100).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedRole {
    pub role: Role,
    pub confidence: u32,
    /// Rules that contributed to this role's score, for display.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub justification: Option<String>,
}

/// Output of the ranker: the best role plus N-1 alternatives in rank order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedPrediction {
    pub primary: RankedRole,
    pub alternatives: Vec<RankedRole>,
}

/// One immutable history entry. Serialized in camelCase as
/// `{id, ownerId, education, prediction, createdAt}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PredictionRecord {
    pub id: Uuid,
    pub owner_id: String,
    pub education: EducationProfile,
    pub prediction: RankedPrediction,
    pub created_at: DateTime<Utc>,
}

/// Row shape of the `prediction_records` table.
#[derive(Debug, Clone, FromRow)]
pub struct PredictionRow {
    pub id: Uuid,
    pub owner_id: String,
    pub education: Value,
    pub prediction: Value,
    pub created_at: DateTime<Utc>,
}
