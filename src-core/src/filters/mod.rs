pub mod filter_model;
pub mod filter_service;

pub use filter_model::{DateSelection, FilterCriteria, Selection};
pub use filter_service::{
    filter_rows, is_subtotal_row, observe_options, resolve_date, same_sheet_date, sort_for_grouping,
};
