use std::sync::Arc;

use adpacing_core::metrics::{MetricDefinition, METRIC_CATALOG};
use axum::{routing::get, Json, Router};
use serde_json::{json, Value};

use crate::main_lib::AppState;

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

/// Metric catalog in display order, for building table columns.
async fn metric_catalog() -> Json<&'static [MetricDefinition]> {
    Json(&METRIC_CATALOG[..])
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/health", get(health))
        .route("/metrics", get(metric_catalog))
}
