use crate::aggregate::{GenderCount, RoleCount, Scorecard};
use crate::dashboard::DashboardView;
use crate::error::Result;
use crate::model::{CellValue, RecordSet};
use rust_xlsxwriter::{
    Chart, ChartDataLabel, ChartFormat, ChartPoint, ChartSolidFill, ChartType, Format,
    FormatAlign, FormatBorder, Workbook, Worksheet,
};
use std::path::Path;

/// Name of the single worksheet in a data export
pub const DATA_SHEET_NAME: &str = "Sheet1";

const MIN_COLUMN_WIDTH: usize = 8;
const MAX_COLUMN_WIDTH: usize = 40;

/// Write rows to an Excel file with one worksheet, `Sheet1`
pub fn write_records_to_xlsx(records: &RecordSet, path: &Path) -> Result<()> {
    let mut workbook = Workbook::new();

    let worksheet = workbook.add_worksheet();
    write_records_sheet(worksheet, records)?;

    workbook.save(path)?;
    Ok(())
}

/// Same workbook as `write_records_to_xlsx`, kept in memory for a download
pub fn records_to_xlsx_buffer(records: &RecordSet) -> Result<Vec<u8>> {
    let mut workbook = Workbook::new();

    let worksheet = workbook.add_worksheet();
    write_records_sheet(worksheet, records)?;

    Ok(workbook.save_to_buffer()?)
}

fn header_format() -> Format {
    Format::new()
        .set_bold()
        .set_align(FormatAlign::Center)
        .set_border_bottom(FormatBorder::Thin)
}

/// Write rows to a worksheet, header first, cells keeping their types
fn write_records_sheet(sheet: &mut Worksheet, records: &RecordSet) -> Result<()> {
    sheet.set_name(DATA_SHEET_NAME)?;

    let header_format = header_format();
    let date_format = Format::new().set_num_format("yyyy-mm-dd");
    let datetime_format = Format::new().set_num_format("yyyy-mm-dd hh:mm:ss");

    for (col, header) in records.columns().iter().enumerate() {
        sheet.write_string_with_format(0, col as u16, header, &header_format)?;
    }

    for (row_idx, cells) in records.rows().iter().enumerate() {
        let row = (row_idx + 1) as u32;

        for (col_idx, cell) in cells.iter().enumerate() {
            let col = col_idx as u16;
            match cell {
                CellValue::Empty => {}
                CellValue::Number(n) if n.is_nan() => {}
                CellValue::Number(n) => {
                    sheet.write_number(row, col, *n)?;
                }
                CellValue::Bool(b) => {
                    sheet.write_boolean(row, col, *b)?;
                }
                CellValue::Text(s) => {
                    sheet.write_string(row, col, s)?;
                }
                CellValue::Date(dt) => {
                    // Midnight timestamps are plain dates
                    let format = if cell.to_string().len() > 10 {
                        &datetime_format
                    } else {
                        &date_format
                    };
                    sheet.write_datetime_with_format(row, col, dt, format)?;
                }
            }
        }
    }

    // Size columns to their widest value
    for (col, header) in records.columns().iter().enumerate() {
        let widest = records
            .column_values(col)
            .map(|v| v.to_string().chars().count())
            .chain(std::iter::once(header.chars().count()))
            .max()
            .unwrap_or(0);
        let width = (widest + 2).clamp(MIN_COLUMN_WIDTH, MAX_COLUMN_WIDTH);
        sheet.set_column_width(col as u16, width as f64)?;
    }

    if !records.columns().is_empty() {
        let last_row = records.len() as u32;
        let last_col = (records.columns().len() - 1) as u16;
        sheet.autofilter(0, 0, last_row, last_col)?;
    }

    Ok(())
}

/// Write the scorecards and both charts of a view to an Excel file
pub fn write_dashboard_to_xlsx(view: &DashboardView, path: &Path) -> Result<()> {
    let mut workbook = Workbook::new();

    let summary_sheet = workbook.add_worksheet();
    write_summary_sheet(summary_sheet, &view.scorecard)?;

    let roles_sheet = workbook.add_worksheet();
    write_roles_sheet(roles_sheet, &view.role_counts)?;

    let gender_sheet = workbook.add_worksheet();
    write_gender_sheet(gender_sheet, &view.gender_counts)?;

    let data_sheet = workbook.add_worksheet();
    write_records_sheet(data_sheet, &view.records)?;

    workbook.save(path)?;
    log::info!("Wrote dashboard workbook to {}", path.display());
    Ok(())
}

/// Write the four scorecards as label/value rows
fn write_summary_sheet(sheet: &mut Worksheet, card: &Scorecard) -> Result<()> {
    sheet.set_name("Summary")?;

    sheet.set_column_width(0, 18)?; // Metric
    sheet.set_column_width(1, 10)?; // Value
    sheet.set_column_width(2, 10)?; // Percent
    sheet.set_column_width(3, 32)?; // Description

    let header_format = header_format();
    let center_format = Format::new().set_align(FormatAlign::Center);
    let pct_format = Format::new().set_align(FormatAlign::Center).set_num_format("0.0");

    let headers = ["Metric", "Value", "%", "Description"];
    for (col, header) in headers.iter().enumerate() {
        sheet.write_string_with_format(0, col as u16, *header, &header_format)?;
    }

    let rows: [(&str, usize, Option<f64>, &str); 4] = [
        ("Total Pipeline", card.total_pipeline, None, "Total Applied"),
        (
            "Will to Join",
            card.will_to_join,
            card.will_to_join_pct,
            "Applicant Who Answered Yes",
        ),
        (
            "Experienced",
            card.experienced,
            card.experienced_pct,
            "Level contains 'Experienced'",
        ),
        ("Total Roles", card.distinct_roles, None, "Count ROLE"),
    ];

    for (row_idx, (metric, value, pct, description)) in rows.iter().enumerate() {
        let row = (row_idx + 1) as u32;
        sheet.write_string(row, 0, *metric)?;
        sheet.write_number_with_format(row, 1, *value as f64, &center_format)?;
        if let Some(pct) = pct {
            sheet.write_number_with_format(row, 2, *pct, &pct_format)?;
        }
        sheet.write_string(row, 3, *description)?;
    }

    Ok(())
}

/// Role counts table with a horizontal bar chart beside it
fn write_roles_sheet(sheet: &mut Worksheet, counts: &[RoleCount]) -> Result<()> {
    sheet.set_name("Roles")?;

    sheet.set_column_width(0, 28)?; // Role
    sheet.set_column_width(1, 10)?; // Count

    let header_format = header_format();
    sheet.write_string_with_format(0, 0, "Role", &header_format)?;
    sheet.write_string_with_format(0, 1, "Count", &header_format)?;

    for (row_idx, count) in counts.iter().enumerate() {
        let row = (row_idx + 1) as u32;
        sheet.write_string(row, 0, &count.label)?;
        sheet.write_number(row, 1, count.count as f64)?;
    }

    if counts.is_empty() {
        return Ok(());
    }

    let last_row = counts.len() as u32;
    let mut chart = Chart::new(ChartType::Bar);
    chart
        .add_series()
        .set_categories(("Roles", 1, 0, last_row, 0))
        .set_values(("Roles", 1, 1, last_row, 1))
        .set_data_label(ChartDataLabel::new().show_value());
    chart.title().set_name("Employees by Role");
    chart.x_axis().set_name("Role");
    chart.y_axis().set_name("Applied");
    chart.legend().set_hidden();

    sheet.insert_chart(1, 3, &chart)?;
    Ok(())
}

/// Gender counts table with a doughnut chart beside it
fn write_gender_sheet(sheet: &mut Worksheet, counts: &[GenderCount]) -> Result<()> {
    sheet.set_name("Gender")?;

    sheet.set_column_width(0, 12)?; // Gender
    sheet.set_column_width(1, 10)?; // Count

    let header_format = header_format();
    sheet.write_string_with_format(0, 0, "Gender", &header_format)?;
    sheet.write_string_with_format(0, 1, "Count", &header_format)?;

    for (row_idx, count) in counts.iter().enumerate() {
        let row = (row_idx + 1) as u32;
        sheet.write_string(row, 0, count.category.as_str())?;
        sheet.write_number(row, 1, count.count as f64)?;
    }

    if counts.is_empty() {
        return Ok(());
    }

    // One point per slice, coloured by category
    let points: Vec<ChartPoint> = counts
        .iter()
        .map(|c| {
            ChartPoint::new().set_format(
                ChartFormat::new().set_solid_fill(ChartSolidFill::new().set_color(c.category.color())),
            )
        })
        .collect();

    let last_row = counts.len() as u32;
    let mut chart = Chart::new(ChartType::Doughnut);
    chart
        .add_series()
        .set_categories(("Gender", 1, 0, last_row, 0))
        .set_values(("Gender", 1, 1, last_row, 1))
        .set_points(&points)
        .set_data_label(ChartDataLabel::new().show_value().show_percentage());
    chart.title().set_name("Gender Ratio");

    sheet.insert_chart(1, 3, &chart)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use calamine::Reader;
    use crate::dashboard::render_view;
    use crate::model::FilterSelection;

    fn records() -> RecordSet {
        RecordSet::from_rows(
            &["Name", "Gender", "ROLE", "Level", "DOJ"],
            &[
                vec!["Asha", "Female", "Frontend", "Experienced", "2025-03-06"],
                vec!["Ravi", "Male", "Backend", "Fresher", "2024-01-10"],
            ],
        )
    }

    #[test]
    fn test_records_buffer_is_a_zip() {
        let buffer = records_to_xlsx_buffer(&records()).unwrap();
        assert!(buffer.starts_with(b"PK"));
    }

    #[test]
    fn test_records_round_trip_through_reader() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("filtered_data.xlsx");
        write_records_to_xlsx(&records(), &path).unwrap();

        let reread = crate::input::read_xlsx(&path).unwrap();
        assert_eq!(reread.columns(), records().columns());
        assert_eq!(reread.len(), 2);
        assert_eq!(reread.cell(1, 0), Some(&CellValue::text("Ravi")));

        let workbook = calamine::open_workbook_auto(&path).unwrap();
        assert_eq!(workbook.sheet_names(), vec![DATA_SHEET_NAME.to_string()]);
    }

    #[test]
    fn test_dashboard_workbook() {
        let view = render_view(&records(), &FilterSelection::new());
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dashboard.xlsx");
        write_dashboard_to_xlsx(&view, &path).unwrap();
        assert!(path.exists());
    }
}
