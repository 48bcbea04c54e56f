use log::debug;

use crate::filters::{filter_rows, resolve_date, sort_for_grouping, FilterCriteria};
use crate::metrics::{compute_aggregate, compute_row_metrics};
use crate::reports::grouping::{by_app, group_by};
use crate::reports::report_model::{AdRow, AppGroup, CampaignSplitReport, ReportRequest};
use crate::sheet::SheetRecord;

/// Build the per-app campaign table for the selected date.
///
/// Rows are filtered, ordered by app then ad name and grouped by app. A
/// requested sort reorders ads inside each app only. The grand total covers every
/// filtered row of the date.
pub fn campaign_split(records: &[SheetRecord], request: &ReportRequest) -> CampaignSplitReport {
    let date = resolve_date(records, &request.date);
    let criteria = FilterCriteria {
        apps: request.apps.clone(),
        platforms: request.platforms.clone(),
        date: date.clone(),
    };

    let mut rows = match &date {
        Some(_) => filter_rows(records, &criteria),
        None => Vec::new(),
    };
    sort_for_grouping(&mut rows);

    let grand_total = compute_aggregate(rows.iter().copied());

    let groups = group_by(rows.iter().copied(), by_app)
        .into_iter()
        .map(|(app_name, ads)| {
            let mut ad_rows: Vec<AdRow> = ads
                .iter()
                .map(|r| AdRow {
                    app_name: r.app_name.clone(),
                    platform: r.platform.clone(),
                    ad_name: r.ad_name.clone(),
                    metrics: compute_row_metrics(r),
                })
                .collect();
            if let Some(sort) = &request.sort {
                ad_rows.sort_by(|a, b| sort.compare(&a.metrics, &b.metrics));
            }
            AppGroup {
                app_name,
                rows: ad_rows,
                subtotal: compute_aggregate(ads.iter().copied()),
            }
        })
        .collect::<Vec<_>>();

    debug!(
        "Campaign split for {:?}: {} apps, {} rows",
        date,
        groups.len(),
        rows.len()
    );

    CampaignSplitReport {
        date,
        metrics: request.visible_metrics(),
        groups,
        grand_total,
    }
}
