//! Editable copy of the filtered rows

use crate::error::{DashboardError, Result};
use crate::model::{CellValue, RecordSet};
use std::str::FromStr;

/// One change to the worksheet grid
#[derive(Debug, Clone, PartialEq)]
pub enum Edit {
    /// Append a blank row
    AddRow,
    /// Remove the row at this index
    RemoveRow(usize),
    /// Replace one cell, typed as a loaded field would be
    SetCell {
        row: usize,
        column: String,
        value: String,
    },
}

impl FromStr for Edit {
    type Err = DashboardError;

    /// Parse `ROW:COLUMN=VALUE` into a `SetCell` edit
    fn from_str(s: &str) -> Result<Self> {
        let invalid = || DashboardError::InvalidEdit(s.to_string());

        let (target, value) = s.split_once('=').ok_or_else(invalid)?;
        let (row, column) = target.split_once(':').ok_or_else(invalid)?;
        let row = row.trim().parse::<usize>().map_err(|_| invalid())?;

        Ok(Edit::SetCell {
            row,
            column: column.trim().to_string(),
            value: value.to_string(),
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Worksheet {
    records: RecordSet,
    dirty: bool,
}

impl Worksheet {
    pub fn new(records: RecordSet) -> Self {
        Self {
            records,
            dirty: false,
        }
    }

    pub fn records(&self) -> &RecordSet {
        &self.records
    }

    /// True once any edit has been applied
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn add_row(&mut self) {
        let blank = vec![CellValue::Empty; self.records.columns().len()];
        self.records.push_row(blank);
        self.dirty = true;
    }

    pub fn remove_row(&mut self, row: usize) -> Result<()> {
        self.records.remove_row(row)?;
        self.dirty = true;
        Ok(())
    }

    pub fn set_cell(&mut self, row: usize, column: &str, value: &str) -> Result<()> {
        self.records.set_cell(row, column, CellValue::parse(value))?;
        self.dirty = true;
        Ok(())
    }

    pub fn apply(&mut self, edit: &Edit) -> Result<()> {
        match edit {
            Edit::AddRow => {
                self.add_row();
                Ok(())
            }
            Edit::RemoveRow(row) => self.remove_row(*row),
            Edit::SetCell { row, column, value } => self.set_cell(*row, column, value),
        }
    }

    /// Apply edits in order, stopping at the first that fails
    pub fn apply_all<'a>(&mut self, edits: impl IntoIterator<Item = &'a Edit>) -> Result<()> {
        for edit in edits {
            self.apply(edit)?;
            log::debug!("Applied worksheet edit {:?}", edit);
        }
        Ok(())
    }

    pub fn into_records(self) -> RecordSet {
        self.records
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sheet() -> Worksheet {
        Worksheet::new(RecordSet::from_rows(
            &["Name", "Gender"],
            &[vec!["Asha", "Female"], vec!["Ravi", "Male"]],
        ))
    }

    #[test]
    fn test_parse_set_cell_edit() {
        let edit: Edit = "1:Gender=Female".parse().unwrap();
        assert_eq!(
            edit,
            Edit::SetCell {
                row: 1,
                column: "Gender".to_string(),
                value: "Female".to_string(),
            }
        );
        assert!("Gender=Female".parse::<Edit>().is_err());
        assert!("x:Gender=Female".parse::<Edit>().is_err());
    }

    #[test]
    fn test_apply_edits() {
        let mut sheet = sheet();
        assert!(!sheet.is_dirty());

        sheet
            .apply_all(&[
                Edit::AddRow,
                Edit::SetCell {
                    row: 2,
                    column: "Name".into(),
                    value: "Kiran".into(),
                },
                Edit::RemoveRow(0),
            ])
            .unwrap();

        assert!(sheet.is_dirty());
        let records = sheet.into_records();
        assert_eq!(records.len(), 2);
        assert_eq!(records.cell(1, 0), Some(&CellValue::text("Kiran")));
        assert_eq!(records.cell(1, 1), Some(&CellValue::Empty));
    }

    #[test]
    fn test_bad_edit_is_rejected() {
        let mut sheet = sheet();
        assert!(sheet.apply(&Edit::RemoveRow(5)).is_err());
        assert!(sheet.set_cell(0, "Salary", "10").is_err());
        assert!(!sheet.is_dirty());
    }
}
