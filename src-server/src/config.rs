use std::collections::HashMap;
use std::net::SocketAddr;
use std::path::PathBuf;

use adpacing_core::config::DashboardSettings;
use anyhow::{Context, Result};

pub const SHEET_URL: &str = "ADPACING_SHEET_URL";
pub const LISTEN_ADDR: &str = "ADPACING_LISTEN_ADDR";
pub const BUDGET_STORE: &str = "ADPACING_BUDGET_STORE";
pub const DEFAULT_BUDGETS: &str = "ADPACING_DEFAULT_BUDGETS";
pub const CACHE_TTL_SECS: &str = "ADPACING_CACHE_TTL_SECS";
pub const FETCH_TIMEOUT_SECS: &str = "ADPACING_FETCH_TIMEOUT_SECS";
pub const LOG_JSON: &str = "ADPACING_LOG_JSON";

const DEFAULT_LISTEN_ADDR: &str = "127.0.0.1:8088";

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub listen_addr: SocketAddr,
    /// JSON file holding edited budgets; in-memory when unset.
    pub budget_store: Option<PathBuf>,
    pub log_json: bool,
    pub dashboard: DashboardSettings,
}

impl ServerConfig {
    /// Read the process environment, after loading `.env` if present.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let mut dashboard = DashboardSettings {
            sheet_url: var(SHEET_URL).with_context(|| format!("{SHEET_URL} must be set"))?,
            ..Default::default()
        };
        if let Some(ttl) = var(CACHE_TTL_SECS) {
            dashboard.cache_ttl_secs = ttl
                .parse()
                .with_context(|| format!("{CACHE_TTL_SECS} must be a whole number of seconds"))?;
        }
        if let Some(timeout) = var(FETCH_TIMEOUT_SECS) {
            dashboard.fetch_timeout_secs = timeout
                .parse()
                .with_context(|| format!("{FETCH_TIMEOUT_SECS} must be a whole number of seconds"))?;
        }
        if let Some(path) = var(DEFAULT_BUDGETS) {
            dashboard.default_budgets = read_default_budgets(&path)?;
        }

        let listen_addr: SocketAddr = var(LISTEN_ADDR)
            .unwrap_or_else(|| DEFAULT_LISTEN_ADDR.to_string())
            .parse()
            .with_context(|| format!("{LISTEN_ADDR} is not a socket address"))?;

        let log_json = var(LOG_JSON)
            .map(|v| matches!(v.to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
            .unwrap_or(false);

        Ok(ServerConfig {
            listen_addr,
            budget_store: var(BUDGET_STORE).map(PathBuf::from),
            log_json,
            dashboard,
        })
    }
}

fn read_default_budgets(path: &str) -> Result<HashMap<String, f64>> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read default budgets from {path}"))?;
    serde_json::from_str(&text).with_context(|| format!("{path} is not a JSON map of app to budget"))
}
