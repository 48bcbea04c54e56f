//! Sheet dates are written day/month/year (`18/10/2026`).

use chrono::{Datelike, NaiveDate};
use std::cmp::Ordering;

/// Parse a sheet date. Accepts `D/M/YYYY` and falls back to ISO `YYYY-MM-DD`.
pub fn parse_sheet_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    let parts: Vec<&str> = raw.split('/').collect();
    if let [day, month, year] = parts.as_slice() {
        let day = day.trim().parse::<u32>().ok()?;
        let month = month.trim().parse::<u32>().ok()?;
        let year = year.trim().parse::<i32>().ok()?;
        return NaiveDate::from_ymd_opt(year, month, day);
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok()
}

/// Newest first; unparseable dates sort after every real date, by text.
pub fn compare_sheet_dates_desc(a: &str, b: &str) -> Ordering {
    match (parse_sheet_date(a), parse_sheet_date(b)) {
        (Some(da), Some(db)) => db.cmp(&da),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => b.cmp(a),
    }
}

pub fn days_in_month(year: i32, month: u32) -> u32 {
    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .and_then(|first_of_next| first_of_next.pred_opt())
        .map(|last| last.day())
        .unwrap_or(30)
}

pub fn same_month(date: NaiveDate, reference: NaiveDate) -> bool {
    date.year() == reference.year() && date.month() == reference.month()
}
