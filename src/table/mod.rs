//! Result tables
//!
//! Extraction and zonal runs both produce an `AttributeTable`: one row per
//! input geometry, keyed by its identifier, and named numeric columns that
//! are only ever appended.

mod writer;


use std::collections::HashSet;

use crate::errors::{ProbeError, ProbeResult};

/// Named column of one value per row
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub name: String,
    pub values: Vec<f64>,
}

/// Append-only table keyed by geometry identifier
#[derive(Debug, Clone, PartialEq)]
pub struct AttributeTable {
    ids: Vec<usize>,
    columns: Vec<Column>,
}

impl AttributeTable {
    /// Empty table with one row per identifier
    pub fn new(ids: Vec<usize>) -> Self {
        AttributeTable {
            ids,
            columns: Vec::new(),
        }
    }

    pub fn ids(&self) -> &[usize] {
        &self.ids
    }

    pub fn row_count(&self) -> usize {
        self.ids.len()
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Column names in insertion order
    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    /// Values of the named column
    pub fn column(&self, name: &str) -> Option<&[f64]> {
        self.columns.iter()
            .find(|c| c.name == name)
            .map(|c| c.values.as_slice())
    }

    /// Value of the named column at `row`
    pub fn value(&self, row: usize, name: &str) -> Option<f64> {
        self.column(name).and_then(|values| values.get(row).copied())
    }

    fn check_column(&self, name: &str, len: usize) -> ProbeResult<()> {
        if len != self.ids.len() {
            return Err(ProbeError::ColumnLength {
                column: name.to_string(),
                expected: self.ids.len(),
                actual: len,
            });
        }
        if self.column(name).is_some() {
            return Err(ProbeError::DuplicateColumn(name.to_string()));
        }
        Ok(())
    }

    /// Append a column. Existing columns are never overwritten.
    pub fn add_column(&mut self, name: impl Into<String>, values: Vec<f64>) -> ProbeResult<()> {
        let name = name.into();
        self.check_column(&name, values.len())?;
        self.columns.push(Column { name, values });
        Ok(())
    }

    /// Append several columns at once; either all are added or none are
    pub fn extend_columns(&mut self, columns: Vec<Column>) -> ProbeResult<()> {
        let mut seen = HashSet::new();
        for column in &columns {
            self.check_column(&column.name, column.values.len())?;
            if !seen.insert(column.name.as_str()) {
                return Err(ProbeError::DuplicateColumn(column.name.clone()));
            }
        }
        self.columns.extend(columns);
        Ok(())
    }

    /// Append the columns of another table over the same rows
    pub fn append(&mut self, other: AttributeTable) -> ProbeResult<()> {
        if other.ids != self.ids {
            return Err(ProbeError::ShapeMismatch(
                "tables are keyed by different identifiers".to_string()
            ));
        }
        self.extend_columns(other.columns)
    }
}
