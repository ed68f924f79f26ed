use axum::{
    extract::{Query, State},
    Json,
};

use crate::errors::AppError;
use crate::history::aggregator::{aggregate, TrendSummary};
use crate::prediction::handlers::UserIdQuery;
use crate::state::AppState;

/// GET /api/v1/predictions/trends
///
/// Recomputed from the full history on every call.
pub async fn handle_trends(
    State(state): State<AppState>,
    Query(params): Query<UserIdQuery>,
) -> Result<Json<TrendSummary>, AppError> {
    let owner = params.owner()?;
    let records = state.predictions.history(owner).await?;
    Ok(Json(aggregate(&records)))
}
