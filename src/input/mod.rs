pub mod join_date;
pub mod reader;

pub use join_date::{derive_join_month, parse_join_date, parse_month_year};
pub use reader::{read_csv, read_table_file, read_xlsx, resolve_source};
