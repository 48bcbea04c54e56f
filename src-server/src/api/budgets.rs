use std::collections::BTreeMap;
use std::sync::Arc;

use adpacing_core::budgets::BudgetSetting;
use adpacing_core::ValidationError;
use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};
use serde::Deserialize;

use crate::{error::ApiResult, main_lib::AppState};

/// Partial update; omitted fields keep their current value.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct BudgetUpdate {
    monthly_budget: Option<f64>,
    daily_set_budget: Option<f64>,
}

async fn list_budgets(
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<BTreeMap<String, BudgetSetting>>> {
    Ok(Json(state.budgets.list()?))
}

async fn get_budget(
    Path(app): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<BudgetSetting>> {
    Ok(Json(state.budgets.setting(&app)?))
}

async fn update_budget(
    Path(app): Path<String>,
    State(state): State<Arc<AppState>>,
    Json(update): Json<BudgetUpdate>,
) -> ApiResult<Json<BudgetSetting>> {
    if update.monthly_budget.is_none() && update.daily_set_budget.is_none() {
        return Err(ValidationError::InvalidInput(
            "Provide monthlyBudget and/or dailySetBudget".to_string(),
        )
        .into());
    }
    let setting = state
        .budgets
        .update(&app, update.monthly_budget, update.daily_set_budget)?;
    tracing::info!("Updated budget settings for {}", app);
    Ok(Json(setting))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/budgets", get(list_budgets))
        .route("/budgets/:app", get(get_budget).put(update_budget))
}
