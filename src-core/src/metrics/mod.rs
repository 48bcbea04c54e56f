pub mod format;
pub mod metrics_calculator;
pub mod metrics_model;
pub mod number_cleaner;

pub use metrics_calculator::{
    compute_aggregate, compute_row_metrics, safe_divide, sum_base, SortOrder, SortSpec,
};
pub use metrics_model::{
    Aggregate, Alignment, BaseTotals, MetricDefinition, MetricFormat, MetricKey, MetricValues,
    METRIC_CATALOG,
};
pub use number_cleaner::{normalize_number, RawCell};
