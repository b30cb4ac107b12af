pub mod writer;

pub use writer::records_to_xlsx_buffer;
pub use writer::write_dashboard_to_xlsx;
pub use writer::write_records_to_xlsx;
