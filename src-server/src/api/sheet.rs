use std::sync::Arc;

use adpacing_core::filters::observe_options;
use adpacing_core::sheet::SheetOptions;
use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;

use crate::{error::ApiResult, main_lib::AppState};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ReloadSummary {
    records: usize,
    options: SheetOptions,
}

async fn get_options(State(state): State<Arc<AppState>>) -> ApiResult<Json<SheetOptions>> {
    let records = state.sheet().await?;
    Ok(Json(observe_options(&records)))
}

async fn reload_sheet(State(state): State<Arc<AppState>>) -> ApiResult<Json<ReloadSummary>> {
    let records = state.sheets.reload(&state.settings.sheet_url).await?;
    Ok(Json(ReloadSummary {
        records: records.len(),
        options: observe_options(&records),
    }))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/sheet/options", get(get_options))
        .route("/sheet/reload", post(reload_sheet))
}
