use anyhow::Result;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tracing::info;

/// Creates and returns a PostgreSQL connection pool.
pub async fn create_pool(database_url: &str) -> Result<PgPool> {
    info!("Connecting to PostgreSQL...");

    let pool = PgPoolOptions::new()
        .max_connections(10)
        .connect(database_url)
        .await?;

    info!("PostgreSQL connection pool established");
    Ok(pool)
}

/// Creates the history table if it does not exist yet. Append-only: rows are
/// inserted by the prediction service and never updated.
pub async fn ensure_schema(pool: &PgPool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS prediction_records (
            seq         BIGSERIAL,
            id          UUID PRIMARY KEY,
            owner_id    TEXT NOT NULL,
            education   JSONB NOT NULL,
            prediction  JSONB NOT NULL,
            created_at  TIMESTAMPTZ NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        "CREATE INDEX IF NOT EXISTS prediction_records_owner_idx \
         ON prediction_records (owner_id, created_at DESC)",
    )
    .execute(pool)
    .await?;

    info!("prediction_records schema ready");
    Ok(())
}
