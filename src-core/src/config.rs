use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::Duration;

/// Monthly budgets used until a user edits them.
pub fn default_monthly_budgets() -> HashMap<String, f64> {
    [
        ("Address Ninja - Validator", 500.0),
        ("Magical Fees & Tariffs", 500.0),
        ("Magical Make An Offer", 500.0),
    ]
    .into_iter()
    .map(|(app, budget)| (app.to_string(), budget))
    .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DashboardSettings {
    /// Published CSV export of the source spreadsheet.
    pub sheet_url: String,
    pub cache_ttl_secs: u64,
    pub fetch_timeout_secs: u64,
    pub default_budgets: HashMap<String, f64>,
}

impl Default for DashboardSettings {
    fn default() -> Self {
        Self {
            sheet_url: String::new(),
            cache_ttl_secs: 300,
            fetch_timeout_secs: 30,
            default_budgets: default_monthly_budgets(),
        }
    }
}

impl DashboardSettings {
    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_secs)
    }

    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout_secs)
    }
}
