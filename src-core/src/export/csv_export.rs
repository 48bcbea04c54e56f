//! CSV downloads of the visible dashboard tables.
//!
//! Every field is double-quoted, records are separated by `\n` and the
//! document has no trailing newline.

use chrono::NaiveDate;

use crate::budgets::BudgetAnalysisReport;
use crate::errors::{Error, Result};
use crate::metrics::format::{format_money, format_percent};
use crate::reports::{CampaignSplitReport, DayOverDayReport};

fn write_csv(headers: Vec<String>, rows: Vec<Vec<String>>) -> Result<String> {
    let mut writer = csv::WriterBuilder::new()
        .quote_style(csv::QuoteStyle::Always)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(Vec::new());
    writer.write_record(&headers)?;
    for row in &rows {
        writer.write_record(row)?;
    }
    let bytes = writer
        .into_inner()
        .map_err(|e| Error::Export(e.to_string()))?;
    let mut text = String::from_utf8(bytes).map_err(|e| Error::Export(e.to_string()))?;
    if text.ends_with('\n') {
        text.pop();
    }
    Ok(text)
}

pub fn export_campaign_split(report: &CampaignSplitReport) -> Result<String> {
    let mut headers = vec![
        "App Name".to_string(),
        "Platform".to_string(),
        "Ad Name".to_string(),
    ];
    headers.extend(report.metrics.iter().map(|m| m.definition().label.to_string()));

    let rows = report
        .rows()
        .map(|row| {
            let mut out = vec![row.app_name.clone(), row.platform.clone(), row.ad_name.clone()];
            out.extend(report.metrics.iter().map(|m| row.metrics.formatted(*m)));
            out
        })
        .collect();

    write_csv(headers, rows)
}

pub fn export_day_over_day(report: &DayOverDayReport) -> Result<String> {
    let mut headers = vec!["App Name".to_string()];
    for metric in &report.metrics {
        let key = metric.as_str();
        headers.push(format!("{key} (Yesterday)"));
        headers.push(format!("{key} (Day Before)"));
        headers.push(format!("{key} (Δ)"));
    }

    let rows = report
        .rows
        .iter()
        .map(|row| {
            let mut out = vec![row.app_name.clone()];
            for metric in &report.metrics {
                out.push(row.yesterday.formatted(*metric));
                out.push(row.day_before.formatted(*metric));
                out.push(row.diff.formatted(*metric));
            }
            out
        })
        .collect();

    write_csv(headers, rows)
}

const BUDGET_HEADERS: [&str; 11] = [
    "App Name",
    "Platform",
    "Spend",
    "Available Daily Budget",
    "Daily Set Budget",
    "Total Budget",
    "Remaining Budget",
    "Daily Spend (MTD Avg)",
    "Remaining Days",
    "Predicted Spend",
    "Over/Under %",
];

pub fn export_budget_analysis(report: &BudgetAnalysisReport) -> Result<String> {
    let headers = BUDGET_HEADERS.iter().map(|h| h.to_string()).collect();
    let rows = report
        .lines
        .iter()
        .map(|line| {
            let p = &line.projection;
            vec![
                line.app_name.clone(),
                line.platform.clone(),
                format_money(p.month_to_date_spend),
                format_money(p.available_daily_budget),
                format_money(line.daily_set_budget),
                format_money(p.budget),
                format_money(p.remaining_budget),
                format_money(p.average_daily_spend),
                p.remaining_days.to_string(),
                format_money(p.predicted_spend),
                format_percent(p.over_under_ratio),
            ]
        })
        .collect();

    write_csv(headers, rows)
}

/// Download file names for each export.
pub enum ExportKind<'a> {
    CampaignSplit { date: Option<&'a str> },
    DayOverDay,
    BudgetAnalysis { today: NaiveDate },
}

pub fn export_file_name(kind: ExportKind<'_>) -> String {
    match kind {
        ExportKind::CampaignSplit { date } => {
            // Sheet dates contain slashes, which file names cannot
            let date = date.map(|d| d.replace('/', "-")).unwrap_or_else(|| "all".to_string());
            format!("shopify-ads-{date}.csv")
        }
        ExportKind::DayOverDay => "yesterday-vs-daybefore.csv".to_string(),
        ExportKind::BudgetAnalysis { today } => {
            format!("budget-analysis-{}.csv", today.format("%Y-%m-%d"))
        }
    }
}
