use chrono::NaiveDate;
use std::collections::BTreeSet;

use crate::filters::{filter_rows, observe_options, FilterCriteria};
use crate::metrics::{compute_aggregate, Aggregate};
use crate::reports::grouping::{by_app_date, group_by};
use crate::reports::report_model::{AppDelta, DayOverDayReport, ReportRequest};
use crate::sheet::SheetRecord;

const DISPLAY_DATE: &str = "%d/%m/%Y";

/// Compare the two most recent distinct dates of the filtered rows, per app.
///
/// The dates are taken across the whole filtered set, not per app. An app with
/// no rows on one of the dates gets an all-zero aggregate for that side.
pub fn day_over_day(records: &[SheetRecord], request: &ReportRequest) -> DayOverDayReport {
    let criteria = FilterCriteria {
        apps: request.apps.clone(),
        platforms: request.platforms.clone(),
        date: None,
    };
    let rows = filter_rows(records, &criteria);

    let dates: BTreeSet<NaiveDate> = rows.iter().filter_map(|r| r.parsed_date()).collect();
    let mut newest_first = dates.into_iter().rev();
    let yesterday = newest_first.next();
    let day_before = newest_first.next();

    let groups = group_by(rows.iter().copied(), by_app_date);
    let side = |app: &str, date: Option<NaiveDate>| -> Aggregate {
        date.and_then(|d| {
            groups
                .iter()
                .find(|((a, gd), _)| a == app && *gd == Some(d))
                .map(|(_, members)| compute_aggregate(members.iter().copied()))
        })
        .unwrap_or_default()
    };

    let rows = observe_options(records)
        .apps
        .into_iter()
        .filter(|app| request.apps.contains(app))
        .map(|app_name| {
            let y = side(&app_name, yesterday);
            let db = side(&app_name, day_before);
            AppDelta {
                diff: y.values().minus(db.values()),
                app_name,
                yesterday: y,
                day_before: db,
            }
        })
        .collect();

    DayOverDayReport {
        yesterday: yesterday.map(|d| d.format(DISPLAY_DATE).to_string()),
        day_before: day_before.map(|d| d.format(DISPLAY_DATE).to_string()),
        metrics: request.visible_metrics(),
        rows,
    }
}
