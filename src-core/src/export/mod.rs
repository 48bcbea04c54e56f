pub mod csv_export;

pub use csv_export::{
    export_budget_analysis, export_campaign_split, export_day_over_day, export_file_name,
    ExportKind,
};
