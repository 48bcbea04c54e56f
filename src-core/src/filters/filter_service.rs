use std::cmp::Ordering;
use std::collections::HashSet;

use crate::dates::{compare_sheet_dates_desc, parse_sheet_date};
use crate::filters::filter_model::{DateSelection, FilterCriteria};
use crate::sheet::{SheetOptions, SheetRecord};

/// Subtotal and summary rows injected by the spreadsheet: empty Ad Name, or an
/// Ad Name containing "total" anywhere. Substring match, so "Totally Awesome
/// Ad" is dropped as well.
pub fn is_subtotal_row(record: &SheetRecord) -> bool {
    let ad_name = record.ad_name.trim();
    ad_name.is_empty() || ad_name.to_lowercase().contains("total")
}

pub fn same_sheet_date(a: &str, b: &str) -> bool {
    match (parse_sheet_date(a), parse_sheet_date(b)) {
        (Some(da), Some(db)) => da == db,
        _ => a.trim() == b.trim(),
    }
}

pub fn filter_rows<'a>(records: &'a [SheetRecord], criteria: &FilterCriteria) -> Vec<&'a SheetRecord> {
    records
        .iter()
        .filter(|r| !is_subtotal_row(r))
        .filter(|r| criteria.apps.contains(&r.app_name))
        .filter(|r| criteria.platforms.contains(&r.platform))
        .filter(|r| match &criteria.date {
            Some(date) => same_sheet_date(&r.date, date),
            None => true,
        })
        .collect()
}

fn case_insensitive(a: &str, b: &str) -> Ordering {
    a.to_lowercase().cmp(&b.to_lowercase())
}

/// App Name, then Ad Name, case-insensitive ascending. Stable.
pub fn sort_for_grouping(rows: &mut [&SheetRecord]) {
    rows.sort_by(|a, b| {
        case_insensitive(&a.app_name, &b.app_name).then_with(|| case_insensitive(&a.ad_name, &b.ad_name))
    });
}

fn distinct<'a>(values: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut seen = HashSet::new();
    values
        .filter(|v| !v.trim().is_empty())
        .filter(|v| seen.insert(*v))
        .map(str::to_string)
        .collect()
}

/// Distinct apps (every row), platforms (data rows) and dates (newest first).
pub fn observe_options(records: &[SheetRecord]) -> SheetOptions {
    let apps = distinct(records.iter().map(|r| r.app_name.as_str()));
    let platforms = distinct(
        records
            .iter()
            .filter(|r| !is_subtotal_row(r))
            .map(|r| r.platform.as_str()),
    );
    SheetOptions {
        apps,
        platforms,
        dates: observed_dates(records),
    }
}

/// Distinct dates of the data rows, newest first. Spellings of the same
/// calendar day (`9/10/2026`, `09/10/2026`) collapse to the first one seen.
fn observed_dates(records: &[SheetRecord]) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut dates: Vec<String> = records
        .iter()
        .filter(|r| !is_subtotal_row(r))
        .map(|r| r.date.trim())
        .filter(|d| !d.is_empty())
        .filter(|d| match parse_sheet_date(d) {
            Some(day) => seen.insert(day.to_string()),
            None => seen.insert(d.to_string()),
        })
        .map(str::to_string)
        .collect();
    dates.sort_by(|a, b| compare_sheet_dates_desc(a, b));
    dates
}

/// Resolve a date choice against the data rows of a sheet. `Latest` is the
/// first entry of the date options.
pub fn resolve_date(records: &[SheetRecord], selection: &DateSelection) -> Option<String> {
    match selection {
        DateSelection::Exact(date) => Some(date.clone()),
        DateSelection::Latest => observed_dates(records).into_iter().next(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filters::Selection;

    fn record(date: &str, app: &str, platform: &str, ad: &str) -> SheetRecord {
        SheetRecord {
            date: date.into(),
            app_name: app.into(),
            platform: platform.into(),
            ad_name: ad.into(),
            ..Default::default()
        }
    }

    #[test]
    fn drops_total_rows_by_substring() {
        assert!(is_subtotal_row(&record("", "", "", "Campaign Total")));
        assert!(is_subtotal_row(&record("", "", "", "Totally Awesome Ad")));
        assert!(is_subtotal_row(&record("", "", "", "GRAND TOTAL")));
        assert!(is_subtotal_row(&record("", "", "", "  ")));
        assert!(!is_subtotal_row(&record("", "", "", "Brand Search")));
    }

    #[test]
    fn applies_inclusion_sets_and_date() {
        let rows = vec![
            record("2/10/2026", "A", "iOS", "a1"),
            record("2/10/2026", "B", "iOS", "b1"),
            record("2/10/2026", "A", "Android", "a2"),
            record("1/10/2026", "A", "iOS", "a3"),
            record("2/10/2026", "A", "iOS", "A total"),
        ];
        let criteria = FilterCriteria {
            apps: Selection::only(["A"]),
            platforms: Selection::only(["iOS"]),
            date: Some("02/10/2026".into()),
        };
        let kept: Vec<_> = filter_rows(&rows, &criteria)
            .into_iter()
            .map(|r| r.ad_name.as_str())
            .collect();
        assert_eq!(kept, vec!["a1"]);

        let everything = filter_rows(&rows, &FilterCriteria::default());
        assert_eq!(everything.len(), 4);

        let none = FilterCriteria {
            apps: Selection::only(Vec::<String>::new()),
            ..Default::default()
        };
        assert!(filter_rows(&rows, &none).is_empty());
    }

    #[test]
    fn sorts_by_app_then_ad_ignoring_case() {
        let rows = vec![
            record("", "beta", "", "Zed"),
            record("", "Alpha", "", "b"),
            record("", "alpha", "", "A"),
        ];
        let mut refs: Vec<_> = rows.iter().collect();
        sort_for_grouping(&mut refs);
        let order: Vec<_> = refs.iter().map(|r| r.ad_name.as_str()).collect();
        assert_eq!(order, vec!["A", "b", "Zed"]);
    }

    #[test]
    fn options_follow_the_loaded_sheet() {
        let mut rows = vec![
            record("9/10/2026", "A", "iOS", "a"),
            record("10/10/2026", "B", "Android", "b"),
            record("10/10/2026", "C", "Web", "C Total"),
        ];
        let options = observe_options(&rows);
        assert_eq!(options.apps, vec!["A", "B", "C"]);
        assert_eq!(options.platforms, vec!["iOS", "Android"]);
        assert_eq!(options.dates, vec!["10/10/2026", "9/10/2026"]);

        rows.push(record("11/10/2026", "D", "iOS", "d"));
        let options = observe_options(&rows);
        assert_eq!(options.apps.len(), 4);
        assert_eq!(
            resolve_date(&rows, &DateSelection::Latest).as_deref(),
            Some("11/10/2026")
        );
    }

    #[test]
    fn date_options_skip_total_rows_and_collapse_spellings() {
        let rows = vec![
            record("9/10/2026", "A", "iOS", "a"),
            record("09/10/2026", "A", "iOS", "b"),
            record("12/10/2026", "A", "", "A Total"),
            record("8/10/2026", "B", "iOS", "c"),
        ];
        let options = observe_options(&rows);
        assert_eq!(options.dates, vec!["9/10/2026", "8/10/2026"]);
        assert_eq!(
            resolve_date(&rows, &DateSelection::Latest).as_deref(),
            options.dates.first().map(String::as_str)
        );
    }
}
