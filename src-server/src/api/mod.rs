use std::sync::Arc;

use axum::Router;

use crate::main_lib::AppState;

pub mod budgets;
pub mod exports;
pub mod health;
pub mod reports;
pub mod sheet;

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .merge(health::router())
        .merge(sheet::router())
        .merge(reports::router())
        .merge(exports::router())
        .merge(budgets::router())
}
