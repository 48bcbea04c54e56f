use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::filters::{DateSelection, Selection};
use crate::metrics::{Aggregate, MetricKey, MetricValues, SortSpec};

/// Selection state handed in by the presentation layer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ReportRequest {
    pub apps: Selection,
    pub platforms: Selection,
    /// Only used by single-date views.
    pub date: DateSelection,
    /// Visible metric columns; `None` shows the whole catalog.
    pub metrics: Option<BTreeSet<MetricKey>>,
    pub sort: Option<SortSpec>,
}

impl ReportRequest {
    /// Visible metrics in catalog order.
    pub fn visible_metrics(&self) -> Vec<MetricKey> {
        MetricKey::all()
            .filter(|key| self.metrics.as_ref().map_or(true, |m| m.contains(key)))
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdRow {
    pub app_name: String,
    pub platform: String,
    pub ad_name: String,
    pub metrics: Aggregate,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AppGroup {
    pub app_name: String,
    pub rows: Vec<AdRow>,
    pub subtotal: Aggregate,
}

/// Per-app ad table for one date with subtotals and a grand total.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CampaignSplitReport {
    pub date: Option<String>,
    pub metrics: Vec<MetricKey>,
    pub groups: Vec<AppGroup>,
    pub grand_total: Aggregate,
}

impl CampaignSplitReport {
    pub fn rows(&self) -> impl Iterator<Item = &AdRow> {
        self.groups.iter().flat_map(|g| g.rows.iter())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AppDelta {
    pub app_name: String,
    pub yesterday: Aggregate,
    pub day_before: Aggregate,
    /// `yesterday - day_before` for every metric, ratios included.
    pub diff: MetricValues,
}

/// Latest date against the one before it, per application.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DayOverDayReport {
    pub yesterday: Option<String>,
    pub day_before: Option<String>,
    pub metrics: Vec<MetricKey>,
    pub rows: Vec<AppDelta>,
}
