use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// User-editable budget pair for one application.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetSetting {
    pub monthly_budget: f64,
    pub daily_set_budget: f64,
}

/// Display band for the predicted-spend ratio.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum BudgetStatus {
    OverBudget,
    NearBudget,
    OnTrack,
}

impl BudgetStatus {
    pub fn from_ratio(ratio: f64) -> Self {
        if ratio > 1.0 {
            BudgetStatus::OverBudget
        } else if ratio > 0.8 {
            BudgetStatus::NearBudget
        } else {
            BudgetStatus::OnTrack
        }
    }
}

/// Month pacing figures for one budget.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetProjection {
    pub budget: f64,
    pub month_to_date_spend: f64,
    pub remaining_budget: f64,
    pub average_daily_spend: f64,
    pub remaining_days: u32,
    pub available_daily_budget: f64,
    pub predicted_spend: f64,
    pub over_under_ratio: f64,
    pub status: BudgetStatus,
}

/// One app/platform row of the budget tracker.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetLine {
    pub app_name: String,
    pub platform: String,
    pub latest_date: String,
    pub daily_set_budget: f64,
    #[serde(flatten)]
    pub projection: BudgetProjection,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetAnalysisReport {
    pub today: NaiveDate,
    pub days_in_month: u32,
    pub lines: Vec<BudgetLine>,
}
