//! Date-of-joining parsing and the derived "Month Year" column

use crate::error::Warning;
use crate::model::{CellValue, RecordSet, JOIN_DATE_COLUMN, JOIN_MONTH_COLUMN};
use chrono::{NaiveDate, NaiveDateTime};

/// Label format of the derived column, e.g. "March 2025"
pub const MONTH_YEAR_FORMAT: &str = "%B %Y";

const DATETIME_FORMATS: [&str; 4] = [
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y/%m/%d %H:%M:%S",
    "%m/%d/%Y %H:%M:%S",
];

const DATE_FORMATS: [&str; 8] = [
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%m/%d/%Y",
    "%d-%m-%Y",
    "%d-%b-%Y",
    "%d %B %Y",
    "%d %b %Y",
    "%B %d, %Y",
];

/// Read a joining date from a cell. Text is tried against a fixed list of
/// formats, month-first where day and month are ambiguous.
pub fn parse_join_date(cell: &CellValue) -> Option<NaiveDateTime> {
    match cell {
        CellValue::Date(dt) => Some(*dt),
        CellValue::Text(s) => parse_date_text(s.trim()),
        _ => None,
    }
}

fn parse_date_text(s: &str) -> Option<NaiveDateTime> {
    for fmt in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt);
        }
    }
    for fmt in DATE_FORMATS {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return d.and_hms_opt(0, 0, 0);
        }
    }
    None
}

pub fn format_month_year(dt: &NaiveDateTime) -> String {
    dt.format(MONTH_YEAR_FORMAT).to_string()
}

/// Parse a "Month Year" label back to the first day of that month
pub fn parse_month_year(label: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(&format!("01 {}", label.trim()), "%d %B %Y").ok()
}

/// Normalize `DOJ` to dates and (re)write `DOJ_Month_Year` from it.
///
/// Values that do not parse are left untouched and get an empty month.
pub fn derive_join_month(records: &mut RecordSet) -> Option<Warning> {
    let Some(col) = records.column_index(JOIN_DATE_COLUMN) else {
        log::warn!("No '{}' column, month-year filter unavailable", JOIN_DATE_COLUMN);
        return Some(Warning::MissingColumn(JOIN_DATE_COLUMN));
    };

    let mut dates = Vec::with_capacity(records.len());
    let mut months = Vec::with_capacity(records.len());
    let mut unparsed = 0;

    for cell in records.column_values(col) {
        match parse_join_date(cell) {
            Some(dt) => {
                dates.push(CellValue::Date(dt));
                months.push(CellValue::text(format_month_year(&dt)));
            }
            None => {
                if !cell.is_empty() {
                    unparsed += 1;
                }
                dates.push(cell.clone());
                months.push(CellValue::Empty);
            }
        }
    }

    records.set_column(JOIN_DATE_COLUMN, dates);
    records.set_column(JOIN_MONTH_COLUMN, months);

    if unparsed > 0 {
        log::warn!("{} DOJ value(s) could not be parsed", unparsed);
        Some(Warning::UnparseableJoinDate { count: unparsed })
    } else {
        None
    }
}
