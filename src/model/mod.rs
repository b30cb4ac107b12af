pub mod cell;
pub mod record_set;
pub mod selection;

pub use cell::CellValue;
pub use record_set::RecordSet;
pub use selection::FilterSelection;

/// Column names the dashboard expects in a full HR sheet
pub const GENDER_COLUMN: &str = "Gender";
pub const ROLE_COLUMN: &str = "ROLE";
pub const LEVEL_COLUMN: &str = "Level";
pub const JOIN_DATE_COLUMN: &str = "DOJ";

/// Derived from `DOJ`, formatted "Month Year"
pub const JOIN_MONTH_COLUMN: &str = "DOJ_Month_Year";
