use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::dates::parse_sheet_date;
use crate::metrics::{normalize_number, BaseTotals};

/// Sheet column headers consumed by the pipeline. Matching is
/// case-insensitive and ignores surrounding whitespace.
pub mod columns {
    pub const DATE: &str = "Date";
    pub const APP_NAME: &str = "App Name";
    pub const PLATFORM: &str = "Platform";
    pub const AD_NAME: &str = "Ad Name";
    pub const IMPRESSIONS: &str = "Imps";
    pub const CLICKS: &str = "Clicks";
    pub const INSTALLS: &str = "Installs";
    pub const CUSTOMERS: &str = "Customers";
    pub const REVENUE: &str = "Revenue";
    pub const SPEND: &str = "Spend";
}

/// One data row of the published sheet, cells kept exactly as exported.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SheetRecord {
    pub date: String,
    pub app_name: String,
    pub platform: String,
    pub ad_name: String,
    pub impressions: String,
    pub clicks: String,
    pub installs: String,
    pub customers: String,
    pub revenue: String,
    pub spend: String,
}

impl SheetRecord {
    pub fn parsed_date(&self) -> Option<NaiveDate> {
        parse_sheet_date(&self.date)
    }

    pub fn base_totals(&self) -> BaseTotals {
        BaseTotals {
            impressions: normalize_number(&self.impressions),
            clicks: normalize_number(&self.clicks),
            installs: normalize_number(&self.installs),
            customers: normalize_number(&self.customers),
            revenue: normalize_number(&self.revenue),
            spend: normalize_number(&self.spend),
        }
    }
}

/// Distinct values observed in a loaded sheet, used to populate filters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SheetOptions {
    pub apps: Vec<String>,
    pub platforms: Vec<String>,
    /// Newest first.
    pub dates: Vec<String>,
}
