use std::sync::Arc;
use std::time::Duration;

use adpacing_core::budgets::{BudgetSettingsService, JsonFileStore, KeyValueStore, MemoryStore};
use adpacing_core::config::DashboardSettings;
use adpacing_core::sheet::{HttpSheetSource, SheetService, SheetSnapshot, SheetSource};
use adpacing_core::LoadError;
use axum::Router;
use tower::ServiceBuilder;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::{api, config::ServerConfig};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

pub struct AppState {
    pub settings: DashboardSettings,
    pub sheets: SheetService,
    pub budgets: BudgetSettingsService<dyn KeyValueStore>,
}

impl AppState {
    pub fn new(
        settings: DashboardSettings,
        source: Arc<dyn SheetSource>,
        store: Arc<dyn KeyValueStore>,
    ) -> Self {
        let sheets = SheetService::new(source, settings.cache_ttl());
        let budgets = BudgetSettingsService::new(store, settings.default_budgets.clone());
        AppState {
            settings,
            sheets,
            budgets,
        }
    }

    /// Current snapshot of the configured sheet.
    pub async fn sheet(&self) -> Result<SheetSnapshot, LoadError> {
        self.sheets.get(&self.settings.sheet_url).await
    }
}

pub fn build_state(config: &ServerConfig) -> anyhow::Result<Arc<AppState>> {
    let source = Arc::new(HttpSheetSource::new(config.dashboard.fetch_timeout())?);
    let store: Arc<dyn KeyValueStore> = match &config.budget_store {
        Some(path) => {
            tracing::info!("Budget settings stored in {}", path.display());
            Arc::new(JsonFileStore::open(path)?)
        }
        None => {
            tracing::warn!("No budget store configured, edits are kept in memory only");
            Arc::new(MemoryStore::new())
        }
    };
    Ok(Arc::new(AppState::new(config.dashboard.clone(), source, store)))
}

pub fn build_router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .nest("/api", api::router())
        .with_state(state)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors)
                .layer(TimeoutLayer::new(REQUEST_TIMEOUT))
                .layer(CompressionLayer::new()),
        )
}

pub fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,tower_http=info"));
    let registry = tracing_subscriber::registry().with(filter);
    if json {
        registry.with(fmt::layer().json()).init();
    } else {
        registry.with(fmt::layer()).init();
    }
}

pub async fn run(config: ServerConfig) -> anyhow::Result<()> {
    let state = build_state(&config)?;
    let app = build_router(state);

    tracing::info!("Listening on http://{}", config.listen_addr);
    let listener = tokio::net::TcpListener::bind(config.listen_addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
