mod config;
mod db;
mod errors;
mod history;
mod models;
mod prediction;
mod routes;
mod state;
mod store;

use anyhow::Result;
use std::net::SocketAddr;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use std::sync::Arc;

use crate::config::Config;
use crate::db::{create_pool, ensure_schema};
use crate::prediction::ranking::Ranker;
use crate::prediction::scoring::RuleTableScorer;
use crate::prediction::service::PredictionService;
use crate::routes::build_router;
use crate::state::AppState;
use crate::store::{InMemoryStore, PgPredictionStore, PredictionStore};

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails fast on malformed env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "{}={}",
                env!("CARGO_PKG_NAME").replace('-', "_"),
                &config.rust_log
            ))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Career Compass API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize prediction history store
    let store: Arc<dyn PredictionStore> = match &config.database_url {
        Some(url) => {
            let pool = create_pool(url).await?;
            ensure_schema(&pool).await?;
            Arc::new(PgPredictionStore::new(pool))
        }
        None => {
            warn!("DATABASE_URL not set; prediction history is kept in memory only");
            Arc::new(InMemoryStore::new())
        }
    };

    // Rule-table scorer by default; any `RoleScorer` can be swapped in here
    let scorer = Arc::new(RuleTableScorer::default());
    let ranker = Ranker::new(config.top_n);
    info!(
        "Ranking top {} roles, default GPA scale {}",
        ranker.top_n(),
        config.default_gpa_scale
    );

    let predictions = Arc::new(PredictionService::new(
        store,
        scorer,
        ranker,
        config.default_gpa_scale,
    ));

    // Build app state
    let state = AppState { predictions };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
