use crate::error::{DashboardError, Result};
use crate::model::{CellValue, RecordSet};
use calamine::{open_workbook_auto, Data, DataType, Reader};
use std::collections::HashMap;
use std::io::Read;
use std::path::{Path, PathBuf};

/// Pick the file for this pass: an uploaded file wins, then the fallback
/// path if it exists. Neither is the one condition that stops the view.
pub fn resolve_source(upload: Option<&Path>, fallback: Option<&Path>) -> Result<PathBuf> {
    if let Some(path) = upload {
        return Ok(path.to_path_buf());
    }

    match fallback {
        Some(path) if path.exists() => {
            log::info!("No upload given, using fallback file {}", path.display());
            Ok(path.to_path_buf())
        }
        Some(path) => {
            log::debug!("Fallback file {} does not exist", path.display());
            Err(DashboardError::NoInput)
        }
        None => Err(DashboardError::NoInput),
    }
}

/// Read a CSV or spreadsheet file, choosing the reader by extension
pub fn read_table_file(path: &Path) -> Result<RecordSet> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();

    let records = match ext.as_str() {
        "csv" => read_csv_file(path)?,
        "xlsx" | "xlsm" | "xls" | "ods" => read_xlsx(path)?,
        _ => return Err(DashboardError::UnsupportedFormat(ext)),
    };

    log::info!(
        "Loaded {} rows x {} columns from {}",
        records.len(),
        records.columns().len(),
        path.display()
    );
    Ok(records)
}

pub fn read_csv_file(path: &Path) -> Result<RecordSet> {
    let file = std::fs::File::open(path)?;
    read_csv(file)
}

/// Read CSV content with a header row; ragged rows are padded
pub fn read_csv<R: Read>(input: R) -> Result<RecordSet> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(input);

    let headers: Vec<String> = reader.headers()?.iter().map(String::from).collect();
    let mut records = RecordSet::new(normalize_headers(headers));

    for result in reader.records() {
        let record = result?;
        records.push_row(record.iter().map(CellValue::parse).collect());
    }

    Ok(records)
}

/// Read the first worksheet of a workbook; the first row holds the headers
pub fn read_xlsx(path: &Path) -> Result<RecordSet> {
    let mut workbook = open_workbook_auto(path)?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or(DashboardError::EmptyWorkbook)??;

    let mut rows = range.rows();
    let headers: Vec<String> = match rows.next() {
        Some(header_row) => header_row
            .iter()
            .map(|cell| cell_from_excel(cell).to_string())
            .collect(),
        None => Vec::new(),
    };

    let mut records = RecordSet::new(normalize_headers(headers));
    for row in rows {
        records.push_row(row.iter().map(cell_from_excel).collect());
    }

    Ok(records)
}

fn cell_from_excel(cell: &Data) -> CellValue {
    if cell.is_empty() {
        return CellValue::Empty;
    }

    if cell.is_datetime() {
        if let Some(dt) = cell.as_datetime() {
            return CellValue::Date(dt);
        }
    }

    if let Some(b) = cell.get_bool() {
        return CellValue::Bool(b);
    }
    if let Some(i) = cell.get_int() {
        return CellValue::Number(i as f64);
    }
    if let Some(f) = cell.get_float() {
        return CellValue::Number(f);
    }
    if let Some(s) = cell.get_string() {
        // Text cells stay text unless they spell a missing value
        return match CellValue::parse(s) {
            CellValue::Empty => CellValue::Empty,
            _ => CellValue::text(s),
        };
    }

    CellValue::text(cell.to_string())
}

/// Name blank headers `Unnamed: N` and suffix repeats with `.1`, `.2`, ...
fn normalize_headers(headers: Vec<String>) -> Vec<String> {
    let mut seen: HashMap<String, usize> = HashMap::new();
    let mut out = Vec::with_capacity(headers.len());

    for (idx, header) in headers.into_iter().enumerate() {
        let base = if header.trim().is_empty() {
            format!("Unnamed: {}", idx)
        } else {
            header
        };

        let count = seen.entry(base.clone()).or_insert(0);
        if *count == 0 {
            out.push(base);
        } else {
            out.push(format!("{}.{}", base, count));
        }
        *count += 1;
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_read_csv_types_fields() {
        let csv = "Name,Gender,Age,Will to Join\nAsha,Female,24,Yes\nRavi,,31,\n";
        let records = read_csv(csv.as_bytes()).unwrap();

        assert_eq!(records.columns(), &["Name", "Gender", "Age", "Will to Join"]);
        assert_eq!(records.len(), 2);
        assert_eq!(records.cell(0, 2), Some(&CellValue::Number(24.0)));
        assert_eq!(records.cell(1, 1), Some(&CellValue::Empty));
        assert_eq!(records.cell(1, 3), Some(&CellValue::Empty));
    }

    #[test]
    fn test_read_csv_pads_short_rows() {
        let csv = "Name,ROLE,Level\nAsha,Frontend\n";
        let records = read_csv(csv.as_bytes()).unwrap();
        assert_eq!(records.rows()[0].len(), 3);
        assert_eq!(records.cell(0, 2), Some(&CellValue::Empty));
    }

    #[test]
    fn test_normalize_headers() {
        let headers = vec![
            "Name".to_string(),
            "".to_string(),
            "Name".to_string(),
            "Name".to_string(),
        ];
        assert_eq!(
            normalize_headers(headers),
            vec!["Name", "Unnamed: 1", "Name.1", "Name.2"]
        );
    }

    #[test]
    fn test_resolve_source() {
        let upload = Path::new("upload.csv");
        assert_eq!(
            resolve_source(Some(upload), None).unwrap(),
            PathBuf::from("upload.csv")
        );

        let missing = Path::new("/definitely/not/here.xlsx");
        assert!(matches!(
            resolve_source(None, Some(missing)),
            Err(DashboardError::NoInput)
        ));
        assert!(matches!(resolve_source(None, None), Err(DashboardError::NoInput)));

        let mut fallback = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
        writeln!(fallback, "Name").unwrap();
        assert_eq!(
            resolve_source(None, Some(fallback.path())).unwrap(),
            fallback.path().to_path_buf()
        );
    }

    #[test]
    fn test_unsupported_extension() {
        assert!(matches!(
            read_table_file(Path::new("people.json")),
            Err(DashboardError::UnsupportedFormat(ext)) if ext == "json"
        ));
    }
}
