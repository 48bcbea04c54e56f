use std::sync::Arc;

use adpacing_core::budgets::MemoryStore;
use adpacing_core::config::DashboardSettings;
use adpacing_core::sheet::SheetSource;
use adpacing_core::LoadError;
use adpacing_server::main_lib::{build_router, AppState};
use async_trait::async_trait;
use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use serde_json::Value;
use tower::ServiceExt;

const SHEET: &str = "\
Date,App Name,Platform,Ad Name,Imps,Clicks,Installs,Customers,Revenue,Spend
18/10/2026,Magical Make An Offer,iOS,Brand,100,10,4,1,$50.00,$20.00
18/10/2026,Address Ninja - Validator,Google,Search,200,20,5,2,$10.00,$40.00
18/10/2026,Address Ninja - Validator,,Address Ninja Total,200,20,5,2,$10.00,$40.00
17/10/2026,Address Ninja - Validator,Google,Search,40,4,2,1,$15.00,$8.00
";

struct StaticSource(Result<String, LoadError>);

#[async_trait]
impl SheetSource for StaticSource {
    async fn fetch_text(&self, _url: &str) -> Result<String, LoadError> {
        self.0.clone()
    }
}

fn app_with(source: StaticSource) -> Router {
    let settings = DashboardSettings {
        sheet_url: "https://sheets.test/pub?output=csv".to_string(),
        ..Default::default()
    };
    let state = AppState::new(settings, Arc::new(source), Arc::new(MemoryStore::new()));
    build_router(Arc::new(state))
}

fn app() -> Router {
    app_with(StaticSource(Ok(SHEET.to_string())))
}

async fn send(app: Router, method: &str, uri: &str, body: Option<&str>) -> (StatusCode, Vec<u8>, axum::http::HeaderMap) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(body.map(|b| Body::from(b.to_string())).unwrap_or_else(Body::empty))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, bytes.to_vec(), headers)
}

async fn send_json(app: Router, method: &str, uri: &str, body: Option<&str>) -> (StatusCode, Value) {
    let (status, bytes, _) = send(app, method, uri, body).await;
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn test_health_and_metric_catalog() {
    let (status, body) = send_json(app(), "GET", "/api/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");

    let (status, body) = send_json(app(), "GET", "/api/metrics", None).await;
    assert_eq!(status, StatusCode::OK);
    let catalog = body.as_array().unwrap();
    assert_eq!(catalog.len(), 14);
    assert_eq!(catalog[0]["key"], "Imps");
    assert_eq!(catalog[2]["format"], "percent");
}

#[tokio::test]
async fn test_sheet_options() {
    let (status, body) = send_json(app(), "GET", "/api/sheet/options", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["apps"][0], "Magical Make An Offer");
    assert_eq!(body["platforms"], serde_json::json!(["iOS", "Google"]));
    assert_eq!(body["dates"], serde_json::json!(["18/10/2026", "17/10/2026"]));

    let (status, body) = send_json(app(), "POST", "/api/sheet/reload", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["records"], 4);
}

#[tokio::test]
async fn test_campaign_split_report() {
    let request = r#"{"apps": ["Address Ninja - Validator"], "metrics": ["Spend", "CTR"]}"#;
    let (status, body) = send_json(app(), "POST", "/api/reports/campaign-split", Some(request)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["date"], "18/10/2026");
    assert_eq!(body["metrics"], serde_json::json!(["CTR", "Spend"]));
    assert_eq!(body["groups"].as_array().unwrap().len(), 1);
    assert_eq!(body["groups"][0]["rows"][0]["adName"], "Search");
    assert_eq!(body["grandTotal"]["Spend"], 40.0);
}

#[tokio::test]
async fn test_day_over_day_report() {
    let (status, body) = send_json(app(), "POST", "/api/reports/day-over-day", Some("{}")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["yesterday"], "18/10/2026");
    assert_eq!(body["dayBefore"], "17/10/2026");
    let ninja = &body["rows"][1];
    assert_eq!(ninja["appName"], "Address Ninja - Validator");
    assert_eq!(ninja["diff"]["Spend"], 32.0);
    assert_eq!(body["rows"][0]["dayBefore"]["Installs"], 0.0);
}

#[tokio::test]
async fn test_budget_analysis_uses_stored_settings() {
    let app = app();
    let (status, _) = send_json(
        app.clone(),
        "PUT",
        "/api/budgets/Magical%20Make%20An%20Offer",
        Some(r#"{"monthlyBudget": 300, "dailySetBudget": 15}"#),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send_json(
        app,
        "POST",
        "/api/reports/budget-analysis",
        Some(r#"{"today": "2026-10-18"}"#),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["daysInMonth"], 31);

    let offer = &body["lines"][0];
    assert_eq!(offer["appName"], "Magical Make An Offer");
    assert_eq!(offer["budget"], 300.0);
    assert_eq!(offer["dailySetBudget"], 15.0);
    assert_eq!(offer["monthToDateSpend"], 20.0);
    assert_eq!(offer["remainingDays"], 13);
    assert_eq!(offer["status"], "onTrack");
}

#[tokio::test]
async fn test_budget_settings_endpoints() {
    let app = app();

    let (status, body) = send_json(app.clone(), "GET", "/api/budgets/Magical%20Fees%20%26%20Tariffs", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["monthlyBudget"], 500.0);
    assert_eq!(body["dailySetBudget"], 0.0);

    let (status, body) = send_json(
        app.clone(),
        "PUT",
        "/api/budgets/New%20App",
        Some(r#"{"monthlyBudget": -10}"#),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("non-negative"));

    let (status, _) = send_json(app.clone(), "PUT", "/api/budgets/New%20App", Some("{}")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, body) = send_json(app, "GET", "/api/budgets", None).await;
    let apps: Vec<_> = body.as_object().unwrap().keys().cloned().collect();
    assert_eq!(apps.len(), 3, "rejected edits are not stored");
}

#[tokio::test]
async fn test_campaign_split_export_download() {
    let (status, bytes, headers) = send(app(), "POST", "/api/exports/campaign-split", Some("{}")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(headers[header::CONTENT_TYPE], "text/csv; charset=utf-8");
    assert_eq!(
        headers[header::CONTENT_DISPOSITION],
        "attachment; filename=\"shopify-ads-18-10-2026.csv\""
    );
    let text = String::from_utf8(bytes).unwrap();
    assert!(text.starts_with("\"App Name\",\"Platform\",\"Ad Name\",\"Impressions\""));
    assert_eq!(text.lines().count(), 3);
    assert!(!text.contains("Total"));
}

#[tokio::test]
async fn test_budget_export_file_name_uses_today() {
    let (status, _, headers) = send(
        app(),
        "POST",
        "/api/exports/budget-analysis",
        Some(r#"{"today": "2026-10-18"}"#),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        headers[header::CONTENT_DISPOSITION],
        "attachment; filename=\"budget-analysis-2026-10-18.csv\""
    );
}

#[tokio::test]
async fn test_unreachable_sheet_is_bad_gateway() {
    let app = app_with(StaticSource(Err(LoadError::Status {
        url: "https://sheets.test/pub?output=csv".to_string(),
        status: 404,
    })));

    let (status, body) = send_json(app.clone(), "GET", "/api/sheet/options", None).await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert!(body["error"].as_str().unwrap().contains("404"));

    let (status, _) = send_json(app, "POST", "/api/reports/campaign-split", Some("{}")).await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
}
