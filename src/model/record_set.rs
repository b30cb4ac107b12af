use super::cell::CellValue;
use crate::error::{DashboardError, Result};
use std::collections::HashSet;

/// An ordered table of rows keyed by column name
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordSet {
    columns: Vec<String>,
    rows: Vec<Vec<CellValue>>,
}

impl RecordSet {
    pub fn new(columns: Vec<String>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    /// Build from string rows, typing each field with `CellValue::parse`
    pub fn from_rows<S: AsRef<str>>(columns: &[&str], rows: &[Vec<S>]) -> Self {
        let mut records = Self::new(columns.iter().map(|c| c.to_string()).collect());
        for row in rows {
            records.push_row(row.iter().map(|v| CellValue::parse(v.as_ref())).collect());
        }
        records
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<CellValue>] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Exact, case-sensitive column lookup
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.column_index(name).is_some()
    }

    pub fn cell(&self, row: usize, col: usize) -> Option<&CellValue> {
        self.rows.get(row).and_then(|r| r.get(col))
    }

    /// Iterate the values of one column; short rows yield `Empty`
    pub fn column_values(&self, col: usize) -> impl Iterator<Item = &CellValue> + '_ {
        const EMPTY: &CellValue = &CellValue::Empty;
        self.rows.iter().map(move |r| r.get(col).unwrap_or(EMPTY))
    }

    /// Distinct present values of a column, in order of first appearance
    pub fn distinct_values(&self, name: &str) -> Vec<String> {
        let Some(col) = self.column_index(name) else {
            return Vec::new();
        };

        let mut seen = HashSet::new();
        let mut values = Vec::new();
        for value in self.column_values(col).filter_map(|v| v.as_text()) {
            if seen.insert(value.clone()) {
                values.push(value);
            }
        }
        values
    }

    /// Number of distinct present values of a column
    pub fn distinct_count(&self, name: &str) -> usize {
        self.distinct_values(name).len()
    }

    /// Append a row, padding or truncating it to the column count
    pub fn push_row(&mut self, mut row: Vec<CellValue>) {
        row.resize(self.columns.len(), CellValue::Empty);
        self.rows.push(row);
    }

    pub fn remove_row(&mut self, row: usize) -> Result<Vec<CellValue>> {
        if row >= self.rows.len() {
            return Err(DashboardError::RowOutOfRange {
                row,
                len: self.rows.len(),
            });
        }
        Ok(self.rows.remove(row))
    }

    pub fn set_cell(&mut self, row: usize, column: &str, value: CellValue) -> Result<()> {
        let col = self
            .column_index(column)
            .ok_or_else(|| DashboardError::UnknownColumn(column.to_string()))?;
        let len = self.rows.len();
        let cells = self
            .rows
            .get_mut(row)
            .ok_or(DashboardError::RowOutOfRange { row, len })?;
        cells[col] = value;
        Ok(())
    }

    /// Replace a column's values, appending the column if it does not exist
    pub fn set_column(&mut self, name: &str, values: Vec<CellValue>) {
        let col = match self.column_index(name) {
            Some(col) => col,
            None => {
                self.columns.push(name.to_string());
                for row in &mut self.rows {
                    row.push(CellValue::Empty);
                }
                self.columns.len() - 1
            }
        };

        for (row, value) in self.rows.iter_mut().zip(values) {
            row[col] = value;
        }
    }

    /// Keep only the rows matching the predicate, preserving order
    pub fn retain_rows<F>(&mut self, mut keep: F)
    where
        F: FnMut(&[CellValue]) -> bool,
    {
        self.rows.retain(|row| keep(row));
    }

    /// Copy of this set holding only the rows matching the predicate
    pub fn filtered<F>(&self, keep: F) -> Self
    where
        F: FnMut(&[CellValue]) -> bool,
    {
        let mut subset = self.clone();
        subset.retain_rows(keep);
        subset
    }
}
