use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

use crate::metrics::metrics_model::{Aggregate, BaseTotals, MetricKey};
use crate::sheet::SheetRecord;

/// Division that yields 0 instead of NaN or infinity.
pub fn safe_divide(numerator: f64, denominator: f64) -> f64 {
    if denominator == 0.0 || denominator.is_nan() {
        return 0.0;
    }
    let quotient = numerator / denominator;
    if quotient.is_finite() {
        quotient
    } else {
        0.0
    }
}

/// Sum the normalized base fields across records.
pub fn sum_base<'a, I>(records: I) -> BaseTotals
where
    I: IntoIterator<Item = &'a SheetRecord>,
{
    records.into_iter().map(SheetRecord::base_totals).sum()
}

pub fn compute_row_metrics(record: &SheetRecord) -> Aggregate {
    Aggregate::from_base(record.base_totals())
}

/// Aggregate over a record set. Ratios come from the summed numerators and
/// denominators, never from averaging per-row ratios.
pub fn compute_aggregate<'a, I>(records: I) -> Aggregate
where
    I: IntoIterator<Item = &'a SheetRecord>,
{
    Aggregate::from_base(sum_base(records))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

/// Sort key chosen by the user for rows inside a group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SortSpec {
    pub metric: MetricKey,
    #[serde(default)]
    pub order: SortOrder,
}

impl SortSpec {
    pub fn compare(&self, a: &Aggregate, b: &Aggregate) -> Ordering {
        let ord = a.get(self.metric).total_cmp(&b.get(self.metric));
        match self.order {
            SortOrder::Asc => ord,
            SortOrder::Desc => ord.reverse(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn safe_divide_guards_denominator() {
        assert_eq!(safe_divide(10.0, 0.0), 0.0);
        assert_eq!(safe_divide(10.0, f64::NAN), 0.0);
        assert_eq!(safe_divide(10.0, 4.0), 2.5);
        assert_eq!(safe_divide(f64::MAX, 1e-300), 0.0);
    }

    #[test]
    fn sorts_both_ways() {
        let low = Aggregate::from_base(BaseTotals {
            spend: 1.0,
            ..Default::default()
        });
        let high = Aggregate::from_base(BaseTotals {
            spend: 9.0,
            ..Default::default()
        });
        let desc = SortSpec {
            metric: MetricKey::Spend,
            order: SortOrder::Desc,
        };
        assert_eq!(desc.compare(&low, &high), Ordering::Greater);
        let asc = SortSpec {
            order: SortOrder::Asc,
            ..desc
        };
        assert_eq!(asc.compare(&low, &high), Ordering::Less);
    }
}
