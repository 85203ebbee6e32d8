use std::{net::SocketAddr, path::PathBuf, time::Duration};

use anyhow::{anyhow, Context};
use axum::http::HeaderValue;

pub struct Config {
    pub listen_addr: SocketAddr,
    pub db_path: String,
    pub cors_allow: Vec<String>,
    pub request_timeout: Duration,
    /// Directory of reference CSV files to seed from on startup.
    pub reference_dir: Option<PathBuf>,
    pub log_format: String,
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let listen_addr: SocketAddr = env_or("VALUATOR_LISTEN_ADDR", "0.0.0.0:8080")
            .parse()
            .context("Invalid VALUATOR_LISTEN_ADDR")?;
        let db_path = env_or("VALUATOR_DB_PATH", "./db/valuator.db");

        let cors_allow: Vec<String> = env_or("VALUATOR_CORS_ALLOW_ORIGINS", "*")
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
        if let Some(bad) = cors_allow
            .iter()
            .find(|o| *o != "*" && HeaderValue::from_str(o).is_err())
        {
            return Err(anyhow!("Invalid origin in VALUATOR_CORS_ALLOW_ORIGINS: {}", bad));
        }

        let timeout_ms: u64 = env_or("VALUATOR_REQUEST_TIMEOUT_MS", "30000")
            .parse()
            .context("Invalid VALUATOR_REQUEST_TIMEOUT_MS")?;

        let reference_dir = std::env::var("VALUATOR_REFERENCE_DIR")
            .ok()
            .filter(|s| !s.trim().is_empty())
            .map(PathBuf::from);
        let log_format = env_or("VALUATOR_LOG_FORMAT", "text");

        Ok(Self {
            listen_addr,
            db_path,
            cors_allow,
            request_timeout: Duration::from_millis(timeout_ms),
            reference_dir,
            log_format,
        })
    }
}
