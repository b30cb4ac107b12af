use std::fmt;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DashboardError {
    #[error("No input file - upload a CSV or XLSX file to view the dashboard")]
    NoInput,

    #[error("Unsupported file format: {0}")]
    UnsupportedFormat(String),

    #[error("Workbook has no worksheet")]
    EmptyWorkbook,

    #[error("Unknown column: {0}")]
    UnknownColumn(String),

    #[error("Invalid edit '{0}' - expected ROW:COLUMN=VALUE")]
    InvalidEdit(String),

    #[error("Row {row} out of range ({len} rows)")]
    RowOutOfRange { row: usize, len: usize },

    #[error("Spreadsheet export unavailable: {0}")]
    ExportUnavailable(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Excel read error: {0}")]
    Excel(#[from] calamine::Error),

    #[cfg(feature = "xlsx")]
    #[error("Excel write error: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),
}

pub type Result<T> = std::result::Result<T, DashboardError>;

/// A degradation that leaves the rest of the view intact
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Warning {
    /// A name search was requested but no name-like column exists
    NoNameColumn,
    /// A column needed by one widget is absent
    MissingColumn(&'static str),
    /// Some `DOJ` values could not be read as dates
    UnparseableJoinDate { count: usize },
    /// Built without the spreadsheet writer
    SpreadsheetExportDisabled,
    /// A filter was requested on a dimension whose column is absent
    IgnoredFilter(&'static str),
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Warning::NoNameColumn => {
                write!(f, "No name-like column found - search by name is disabled")
            }
            Warning::MissingColumn("ROLE") => {
                write!(f, "No 'ROLE' column found - role chart will be empty")
            }
            Warning::MissingColumn("Gender") => {
                write!(f, "No 'Gender' column found to plot Gender Ratio")
            }
            Warning::MissingColumn(column) => write!(f, "No '{}' column found", column),
            Warning::UnparseableJoinDate { count } => {
                write!(f, "{} DOJ value(s) could not be parsed as dates", count)
            }
            Warning::SpreadsheetExportDisabled => {
                write!(f, "Spreadsheet writer not available - Excel download disabled")
            }
            Warning::IgnoredFilter(column) => {
                write!(f, "Filter on '{}' ignored - column not found", column)
            }
        }
    }
}
