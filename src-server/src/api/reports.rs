use std::sync::Arc;

use adpacing_core::budgets::{budget_analysis, BudgetAnalysisReport};
use adpacing_core::filters::observe_options;
use adpacing_core::reports::{
    campaign_split, day_over_day, CampaignSplitReport, DayOverDayReport, ReportRequest,
};
use axum::{extract::State, routing::post, Json, Router};
use chrono::NaiveDate;
use serde::Deserialize;

use crate::{error::ApiResult, main_lib::AppState};

/// Selection state plus the day the budget month is paced against.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetAnalysisBody {
    #[serde(flatten)]
    pub request: ReportRequest,
    /// Defaults to the server's local date.
    pub today: Option<NaiveDate>,
}

pub(crate) async fn build_campaign_split(
    state: &AppState,
    request: &ReportRequest,
) -> ApiResult<CampaignSplitReport> {
    let records = state.sheet().await?;
    Ok(campaign_split(&records, request))
}

pub(crate) async fn build_day_over_day(
    state: &AppState,
    request: &ReportRequest,
) -> ApiResult<DayOverDayReport> {
    let records = state.sheet().await?;
    Ok(day_over_day(&records, request))
}

pub(crate) async fn build_budget_analysis(
    state: &AppState,
    body: &BudgetAnalysisBody,
) -> ApiResult<BudgetAnalysisReport> {
    let records = state.sheet().await?;
    let today = body
        .today
        .unwrap_or_else(|| chrono::Local::now().date_naive());
    let apps = observe_options(&records).apps;
    let settings = state
        .budgets
        .settings_for(apps.iter().map(String::as_str))?;
    Ok(budget_analysis(&records, &body.request, &settings, today))
}

async fn campaign_split_report(
    State(state): State<Arc<AppState>>,
    Json(request): Json<ReportRequest>,
) -> ApiResult<Json<CampaignSplitReport>> {
    Ok(Json(build_campaign_split(&state, &request).await?))
}

async fn day_over_day_report(
    State(state): State<Arc<AppState>>,
    Json(request): Json<ReportRequest>,
) -> ApiResult<Json<DayOverDayReport>> {
    Ok(Json(build_day_over_day(&state, &request).await?))
}

async fn budget_analysis_report(
    State(state): State<Arc<AppState>>,
    Json(body): Json<BudgetAnalysisBody>,
) -> ApiResult<Json<BudgetAnalysisReport>> {
    Ok(Json(build_budget_analysis(&state, &body).await?))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/reports/campaign-split", post(campaign_split_report))
        .route("/reports/day-over-day", post(day_over_day_report))
        .route("/reports/budget-analysis", post(budget_analysis_report))
}
