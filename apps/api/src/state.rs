use std::sync::Arc;

use crate::prediction::service::PredictionService;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Prediction pipeline. Owns the store and the pluggable role scorer.
    pub predictions: Arc<PredictionService>,
}
