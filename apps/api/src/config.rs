use anyhow::{bail, Context, Result};

use crate::prediction::catalog::Role;

/// Application configuration loaded from environment variables.
/// Fails at startup if a present variable cannot be parsed.
#[derive(Debug, Clone)]
pub struct Config {
    /// PostgreSQL connection string. `None` selects the in-memory store.
    pub database_url: Option<String>,
    pub port: u16,
    pub rust_log: String,
    /// Number of roles returned per prediction (primary + alternatives).
    pub top_n: usize,
    /// GPA scale assumed when a submission does not state its own.
    pub default_gpa_scale: f64,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from an arbitrary key lookup so parsing can be
    /// exercised without touching the process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url = lookup("DATABASE_URL").filter(|url| !url.trim().is_empty());

        let port = lookup("PORT")
            .unwrap_or_else(|| "8080".to_string())
            .parse::<u16>()
            .context("PORT must be a valid port number")?;

        let top_n = lookup("PREDICTION_TOP_N")
            .unwrap_or_else(|| "3".to_string())
            .parse::<usize>()
            .context("PREDICTION_TOP_N must be a positive integer")?;
        if top_n == 0 {
            bail!("PREDICTION_TOP_N must be at least 1");
        }

        let default_gpa_scale = lookup("DEFAULT_GPA_SCALE")
            .unwrap_or_else(|| "4.0".to_string())
            .parse::<f64>()
            .context("DEFAULT_GPA_SCALE must be a number")?;
        if default_gpa_scale != 4.0 && default_gpa_scale != 10.0 {
            bail!("DEFAULT_GPA_SCALE must be 4 or 10, got {default_gpa_scale}");
        }

        Ok(Config {
            database_url,
            port,
            rust_log: lookup("RUST_LOG").unwrap_or_else(|| "info".to_string()),
            top_n: top_n.min(Role::ALL.len()),
            default_gpa_scale,
        })
    }
}
