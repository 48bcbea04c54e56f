use chrono::{Datelike, NaiveDate};
use std::collections::HashMap;

use crate::budgets::budget_model::{
    BudgetAnalysisReport, BudgetLine, BudgetProjection, BudgetSetting, BudgetStatus,
};
use crate::dates::{days_in_month, same_month};
use crate::filters::{filter_rows, FilterCriteria};
use crate::metrics::{safe_divide, sum_base};
use crate::reports::grouping::{by_app_platform, group_by};
use crate::reports::ReportRequest;
use crate::sheet::SheetRecord;

impl BudgetProjection {
    /// Pace a monthly budget given spend so far and the position in the month.
    pub fn compute(budget: f64, month_to_date_spend: f64, day_of_month: u32, days_in_month: u32) -> Self {
        let remaining_days = days_in_month.saturating_sub(day_of_month);
        let remaining_budget = budget - month_to_date_spend;
        let average_daily_spend = safe_divide(month_to_date_spend, day_of_month as f64);
        let available_daily_budget = safe_divide(remaining_budget, remaining_days as f64);
        let predicted_spend = average_daily_spend * days_in_month as f64;
        let over_under_ratio = safe_divide(predicted_spend, budget);

        BudgetProjection {
            budget,
            month_to_date_spend,
            remaining_budget,
            average_daily_spend,
            remaining_days,
            available_daily_budget,
            predicted_spend,
            over_under_ratio,
            status: BudgetStatus::from_ratio(over_under_ratio),
        }
    }

    pub fn for_date(budget: f64, month_to_date_spend: f64, today: NaiveDate) -> Self {
        Self::compute(
            budget,
            month_to_date_spend,
            today.day(),
            days_in_month(today.year(), today.month()),
        )
    }
}

/// Budget tracker rows for the calendar month containing `today`.
///
/// Rows are grouped by app and platform. Month-to-date spend for a group is
/// the Spend summed over every row on the group's latest date.
pub fn budget_analysis(
    records: &[SheetRecord],
    request: &ReportRequest,
    settings: &HashMap<String, BudgetSetting>,
    today: NaiveDate,
) -> BudgetAnalysisReport {
    let criteria = FilterCriteria {
        apps: request.apps.clone(),
        platforms: request.platforms.clone(),
        date: None,
    };
    let month_rows: Vec<&SheetRecord> = filter_rows(records, &criteria)
        .into_iter()
        .filter(|r| r.parsed_date().is_some_and(|d| same_month(d, today)))
        .collect();

    let lines = group_by(month_rows, by_app_platform)
        .into_iter()
        .filter_map(|((app_name, platform), rows)| {
            let latest = rows.iter().filter_map(|r| r.parsed_date()).max()?;
            let latest_rows = rows.iter().copied().filter(|r| r.parsed_date() == Some(latest));
            let month_to_date_spend = sum_base(latest_rows).spend;
            let setting = settings.get(&app_name).copied().unwrap_or_default();

            Some(BudgetLine {
                latest_date: latest.format("%d/%m/%Y").to_string(),
                daily_set_budget: setting.daily_set_budget,
                projection: BudgetProjection::for_date(setting.monthly_budget, month_to_date_spend, today),
                app_name,
                platform,
            })
        })
        .collect();

    BudgetAnalysisReport {
        today,
        days_in_month: days_in_month(today.year(), today.month()),
        lines,
    }
}
