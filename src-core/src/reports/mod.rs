pub mod campaign_split;
pub mod day_over_day;
pub mod grouping;
pub mod report_model;

pub use campaign_split::campaign_split;
pub use day_over_day::day_over_day;
pub use grouping::{group_by, Groups};
pub use report_model::{
    AdRow, AppDelta, AppGroup, CampaignSplitReport, DayOverDayReport, ReportRequest,
};
