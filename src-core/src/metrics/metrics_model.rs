use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use std::ops::{Add, AddAssign};

use crate::metrics::format::{format_count, format_money, format_percent, format_ratio};
use crate::metrics::metrics_calculator::safe_divide;

/// Identifier of every metric shown in the dashboard tables, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum MetricKey {
    #[serde(rename = "Imps")]
    Impressions,
    Clicks,
    #[serde(rename = "CTR")]
    Ctr,
    Installs,
    InstallRate,
    Customers,
    ConversionRate,
    Revenue,
    Spend,
    Profit,
    #[serde(rename = "ROAS")]
    Roas,
    #[serde(rename = "CPC")]
    Cpc,
    #[serde(rename = "CPI")]
    Cpi,
    #[serde(rename = "CAC")]
    Cac,
}

pub const METRIC_COUNT: usize = 14;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Alignment {
    Left,
    Right,
}

/// How a metric value is rendered as text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MetricFormat {
    Count,
    Percent,
    Money,
    Ratio,
}

impl MetricFormat {
    pub fn apply(self, value: f64) -> String {
        match self {
            MetricFormat::Count => format_count(value),
            MetricFormat::Percent => format_percent(value),
            MetricFormat::Money => format_money(value),
            MetricFormat::Ratio => format_ratio(value),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct MetricDefinition {
    pub key: MetricKey,
    pub label: &'static str,
    pub align: Alignment,
    pub format: MetricFormat,
}

const fn metric(key: MetricKey, label: &'static str, format: MetricFormat) -> MetricDefinition {
    MetricDefinition {
        key,
        label,
        align: Alignment::Right,
        format,
    }
}

/// The fixed metric catalog. Index order matches `MetricKey::index`.
pub static METRIC_CATALOG: [MetricDefinition; METRIC_COUNT] = [
    metric(MetricKey::Impressions, "Impressions", MetricFormat::Count),
    metric(MetricKey::Clicks, "Clicks", MetricFormat::Count),
    metric(MetricKey::Ctr, "CTR", MetricFormat::Percent),
    metric(MetricKey::Installs, "Installs", MetricFormat::Count),
    metric(MetricKey::InstallRate, "Install Rate", MetricFormat::Percent),
    metric(MetricKey::Customers, "Customers", MetricFormat::Count),
    metric(MetricKey::ConversionRate, "Conversion Rate", MetricFormat::Percent),
    metric(MetricKey::Revenue, "Revenue", MetricFormat::Money),
    metric(MetricKey::Spend, "Spend", MetricFormat::Money),
    metric(MetricKey::Profit, "Profit", MetricFormat::Money),
    metric(MetricKey::Roas, "ROAS", MetricFormat::Ratio),
    metric(MetricKey::Cpc, "CPC", MetricFormat::Money),
    metric(MetricKey::Cpi, "CPI", MetricFormat::Money),
    metric(MetricKey::Cac, "CAC", MetricFormat::Money),
];

impl MetricKey {
    pub fn all() -> impl Iterator<Item = MetricKey> {
        METRIC_CATALOG.iter().map(|m| m.key)
    }

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn definition(self) -> &'static MetricDefinition {
        &METRIC_CATALOG[self.index()]
    }

    /// Short key as it appears in the sheet and in exports, e.g. `Imps`, `CTR`.
    pub fn as_str(self) -> &'static str {
        match self {
            MetricKey::Impressions => "Imps",
            MetricKey::Clicks => "Clicks",
            MetricKey::Ctr => "CTR",
            MetricKey::Installs => "Installs",
            MetricKey::InstallRate => "InstallRate",
            MetricKey::Customers => "Customers",
            MetricKey::ConversionRate => "ConversionRate",
            MetricKey::Revenue => "Revenue",
            MetricKey::Spend => "Spend",
            MetricKey::Profit => "Profit",
            MetricKey::Roas => "ROAS",
            MetricKey::Cpc => "CPC",
            MetricKey::Cpi => "CPI",
            MetricKey::Cac => "CAC",
        }
    }

    /// The single place each metric is computed from base totals.
    pub fn derive(self, base: &BaseTotals) -> f64 {
        match self {
            MetricKey::Impressions => base.impressions,
            MetricKey::Clicks => base.clicks,
            MetricKey::Installs => base.installs,
            MetricKey::Customers => base.customers,
            MetricKey::Revenue => base.revenue,
            MetricKey::Spend => base.spend,
            MetricKey::Profit => base.revenue - base.spend,
            MetricKey::Ctr => safe_divide(base.clicks, base.impressions),
            MetricKey::InstallRate => safe_divide(base.installs, base.clicks),
            MetricKey::ConversionRate => safe_divide(base.customers, base.installs),
            MetricKey::Roas => safe_divide(base.revenue, base.spend),
            MetricKey::Cpc => safe_divide(base.spend, base.clicks),
            MetricKey::Cpi => safe_divide(base.spend, base.installs),
            MetricKey::Cac => safe_divide(base.spend, base.customers),
        }
    }
}

/// Summed base fields over one or more records.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BaseTotals {
    pub impressions: f64,
    pub clicks: f64,
    pub installs: f64,
    pub customers: f64,
    pub revenue: f64,
    pub spend: f64,
}

impl AddAssign for BaseTotals {
    fn add_assign(&mut self, rhs: Self) {
        self.impressions += rhs.impressions;
        self.clicks += rhs.clicks;
        self.installs += rhs.installs;
        self.customers += rhs.customers;
        self.revenue += rhs.revenue;
        self.spend += rhs.spend;
    }
}

impl Add for BaseTotals {
    type Output = BaseTotals;

    fn add(mut self, rhs: Self) -> Self::Output {
        self += rhs;
        self
    }
}

impl std::iter::Sum for BaseTotals {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(BaseTotals::default(), Add::add)
    }
}

/// One number per catalog metric, indexed by `MetricKey`.
///
/// Serializes as a map keyed by the short metric key.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MetricValues([f64; METRIC_COUNT]);

impl MetricValues {
    pub fn from_fn(mut f: impl FnMut(MetricKey) -> f64) -> Self {
        let mut values = [0.0; METRIC_COUNT];
        for key in MetricKey::all() {
            values[key.index()] = f(key);
        }
        MetricValues(values)
    }

    pub fn get(&self, key: MetricKey) -> f64 {
        self.0[key.index()]
    }

    /// Element-wise `self - other`.
    pub fn minus(&self, other: &MetricValues) -> MetricValues {
        MetricValues::from_fn(|key| self.get(key) - other.get(key))
    }

    pub fn formatted(&self, key: MetricKey) -> String {
        key.definition().format.apply(self.get(key))
    }
}

impl Serialize for MetricValues {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(METRIC_COUNT))?;
        for key in MetricKey::all() {
            map.serialize_entry(key.as_str(), &self.get(key))?;
        }
        map.end()
    }
}

/// Every catalog metric computed from summed base fields.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Aggregate {
    #[serde(skip)]
    base: BaseTotals,
    #[serde(flatten)]
    values: MetricValues,
}

impl Aggregate {
    pub fn from_base(base: BaseTotals) -> Self {
        Aggregate {
            base,
            values: MetricValues::from_fn(|key| key.derive(&base)),
        }
    }

    pub fn base(&self) -> &BaseTotals {
        &self.base
    }

    pub fn values(&self) -> &MetricValues {
        &self.values
    }

    pub fn get(&self, key: MetricKey) -> f64 {
        self.values.get(key)
    }

    pub fn formatted(&self, key: MetricKey) -> String {
        self.values.formatted(key)
    }
}
