pub mod sheet_loader;
pub mod sheet_model;
pub mod sheet_service;
pub mod sheet_traits;

pub use sheet_loader::{load_sheet, parse_sheet, HttpSheetSource};
pub use sheet_model::{SheetOptions, SheetRecord};
pub use sheet_service::{SheetService, SheetSnapshot};
pub use sheet_traits::SheetSource;
