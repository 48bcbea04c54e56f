pub mod budget_analysis;
pub mod budget_model;
pub mod budget_settings;
pub mod budget_store;

pub use budget_analysis::budget_analysis;
pub use budget_model::{
    BudgetAnalysisReport, BudgetLine, BudgetProjection, BudgetSetting, BudgetStatus,
};
pub use budget_settings::BudgetSettingsService;
pub use budget_store::{JsonFileStore, KeyValueStore, MemoryStore};
