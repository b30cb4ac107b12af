//! Download formats for the current rows

use crate::error::{DashboardError, Result};
use crate::model::RecordSet;
use serde::Serialize;
use std::io::Write;
use std::path::Path;

pub const CSV_FILE_NAME: &str = "filtered_data.csv";
pub const XLSX_FILE_NAME: &str = "filtered_data.xlsx";

/// Download name for the chosen format
pub fn default_file_name(spreadsheet: bool) -> &'static str {
    if spreadsheet {
        XLSX_FILE_NAME
    } else {
        CSV_FILE_NAME
    }
}

/// Write rows as UTF-8 CSV with a header row
pub fn write_csv<W: Write>(records: &RecordSet, writer: W) -> Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer.write_record(records.columns())?;

    for row in records.rows() {
        csv_writer.write_record(row.iter().map(|cell| cell.to_string()))?;
    }

    csv_writer.flush()?;
    Ok(())
}

pub fn to_csv_bytes(records: &RecordSet) -> Result<Vec<u8>> {
    let mut buffer = Vec::new();
    write_csv(records, &mut buffer)?;
    Ok(buffer)
}

pub fn write_csv_file(records: &RecordSet, path: &Path) -> Result<()> {
    let file = std::fs::File::create(path)?;
    write_csv(records, file)?;
    log::info!("Wrote {} rows to {}", records.len(), path.display());
    Ok(())
}

/// Write serializable rows (grouped counts, scorecards) as CSV
pub fn write_serialized_csv<T: Serialize, W: Write>(items: &[T], writer: W) -> Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for item in items {
        csv_writer.serialize(item)?;
    }
    csv_writer.flush()?;
    Ok(())
}

/// Whether this build can write spreadsheets
pub fn spreadsheet_export_available() -> bool {
    cfg!(feature = "xlsx")
}

/// Write rows to a single-sheet workbook (`Sheet1`)
#[cfg(feature = "xlsx")]
pub fn write_xlsx_file(records: &RecordSet, path: &Path) -> Result<()> {
    crate::xlsx::write_records_to_xlsx(records, path)?;
    log::info!("Wrote {} rows to {}", records.len(), path.display());
    Ok(())
}

#[cfg(not(feature = "xlsx"))]
pub fn write_xlsx_file(_records: &RecordSet, _path: &Path) -> Result<()> {
    Err(DashboardError::ExportUnavailable(
        "built without the `xlsx` feature".to_string(),
    ))
}

/// Write rows in the format named by the file extension
pub fn write_file(records: &RecordSet, path: &Path) -> Result<()> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();

    match ext.as_str() {
        "csv" => write_csv_file(records, path),
        "xlsx" => write_xlsx_file(records, path),
        _ => Err(DashboardError::UnsupportedFormat(ext)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::RoleCount;
    use crate::input::read_csv;

    #[test]
    fn test_csv_round_trip() {
        let records = RecordSet::from_rows(
            &["Name", "Gender", "Note"],
            &[
                vec!["Asha", "Female", "likes \"quotes\", commas"],
                vec!["Ravi", "", "42"],
            ],
        );

        let bytes = to_csv_bytes(&records).unwrap();
        let reread = read_csv(bytes.as_slice()).unwrap();
        assert_eq!(reread, records);
    }

    #[test]
    fn test_csv_header_only_for_empty_rows() {
        let records = RecordSet::new(vec!["Name".into(), "ROLE".into()]);
        let bytes = to_csv_bytes(&records).unwrap();
        assert_eq!(String::from_utf8(bytes).unwrap(), "Name,ROLE\n");
    }

    #[test]
    fn test_serialized_counts() {
        let counts = vec![
            RoleCount { label: "Testing".into(), count: 1 },
            RoleCount { label: "Frontend".into(), count: 4 },
        ];
        let mut buffer = Vec::new();
        write_serialized_csv(&counts, &mut buffer).unwrap();
        assert_eq!(
            String::from_utf8(buffer).unwrap(),
            "RoleShort,Count\nTesting,1\nFrontend,4\n"
        );
    }

    #[test]
    fn test_default_file_names() {
        assert_eq!(default_file_name(false), "filtered_data.csv");
        assert_eq!(default_file_name(true), "filtered_data.xlsx");
    }

    #[test]
    fn test_unsupported_export_format() {
        let records = RecordSet::new(vec!["Name".into()]);
        assert!(matches!(
            write_file(&records, Path::new("out.json")),
            Err(DashboardError::UnsupportedFormat(_))
        ));
    }
}
