//! Axum route handlers for the Prediction API.

use axum::{
    extract::{Query, State},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::models::prediction::{PredictionRecord, RankedRole};
use crate::models::profile::RawSubmission;
use crate::prediction::catalog::Role;
use crate::state::AppState;

/// Owner identity, forwarded by the upstream authentication layer.
#[derive(Debug, Deserialize)]
pub struct UserIdQuery {
    pub user_id: Option<String>,
}

impl UserIdQuery {
    pub fn owner(&self) -> Result<&str, AppError> {
        self.user_id
            .as_deref()
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .ok_or(AppError::Unauthorized)
    }
}

#[derive(Debug, Serialize)]
pub struct PredictResponse {
    pub primary: RankedRole,
    pub alternatives: Vec<RankedRole>,
}

/// POST /api/v1/predict
pub async fn handle_predict(
    State(state): State<AppState>,
    Query(params): Query<UserIdQuery>,
    Json(submission): Json<RawSubmission>,
) -> Result<Json<PredictResponse>, AppError> {
    let owner = params.owner()?;
    let record = state.predictions.predict(owner, &submission).await?;

    Ok(Json(PredictResponse {
        primary: record.prediction.primary,
        alternatives: record.prediction.alternatives,
    }))
}

/// GET /api/v1/predictions/history
pub async fn handle_history(
    State(state): State<AppState>,
    Query(params): Query<UserIdQuery>,
) -> Result<Json<Vec<PredictionRecord>>, AppError> {
    let owner = params.owner()?;
    Ok(Json(state.predictions.history(owner).await?))
}

/// GET /api/v1/roles
pub async fn handle_roles() -> Json<Vec<&'static str>> {
    Json(Role::ALL.iter().map(|role| role.label()).collect())
}
