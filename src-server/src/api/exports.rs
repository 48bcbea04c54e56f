use std::sync::Arc;

use adpacing_core::export::{
    export_budget_analysis, export_campaign_split, export_day_over_day, export_file_name,
    ExportKind,
};
use adpacing_core::reports::ReportRequest;
use axum::{
    extract::State,
    http::header,
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};

use crate::api::reports::{
    build_budget_analysis, build_campaign_split, build_day_over_day, BudgetAnalysisBody,
};
use crate::{error::ApiResult, main_lib::AppState};

fn csv_download(file_name: String, body: String) -> Response {
    (
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{file_name}\""),
            ),
        ],
        body,
    )
        .into_response()
}

async fn export_campaign_split_csv(
    State(state): State<Arc<AppState>>,
    Json(request): Json<ReportRequest>,
) -> ApiResult<Response> {
    let report = build_campaign_split(&state, &request).await?;
    let file_name = export_file_name(ExportKind::CampaignSplit {
        date: report.date.as_deref(),
    });
    Ok(csv_download(file_name, export_campaign_split(&report)?))
}

async fn export_day_over_day_csv(
    State(state): State<Arc<AppState>>,
    Json(request): Json<ReportRequest>,
) -> ApiResult<Response> {
    let report = build_day_over_day(&state, &request).await?;
    Ok(csv_download(
        export_file_name(ExportKind::DayOverDay),
        export_day_over_day(&report)?,
    ))
}

async fn export_budget_analysis_csv(
    State(state): State<Arc<AppState>>,
    Json(body): Json<BudgetAnalysisBody>,
) -> ApiResult<Response> {
    let report = build_budget_analysis(&state, &body).await?;
    let file_name = export_file_name(ExportKind::BudgetAnalysis {
        today: report.today,
    });
    Ok(csv_download(file_name, export_budget_analysis(&report)?))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/exports/campaign-split", post(export_campaign_split_csv))
        .route("/exports/day-over-day", post(export_day_over_day_csv))
        .route("/exports/budget-analysis", post(export_budget_analysis_csv))
}
