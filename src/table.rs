use allocative::Allocative;

use crate::column::Column;
use crate::error::{Error, Result};
use crate::value::Value;

/// One stored row, positionally aligned with the owning table's columns.
pub type Row = Vec<Value>;

/// A named table: its column list and its rows in insertion order.
#[derive(Debug, Clone, Allocative)]
pub struct Table {
    /// Name as written in the `CREATE TABLE` statement.
    pub name: String,
    columns: Vec<Column>,
    rows: Vec<Row>,
}

impl Table {
    pub fn new(name: impl Into<String>, columns: Vec<Column>) -> Self {
        Self {
            name: name.into(),
            columns,
            rows: Vec::new(),
        }
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Appends a row.
    ///
    /// # Errors
    /// Returns [Error::ColumnCountMismatch] if the row's arity differs from the
    /// column count. Nothing is stored in that case.
    pub fn insert(&mut self, values: Row) -> Result<()> {
        if values.len() != self.columns.len() {
            return Err(Error::ColumnCountMismatch {
                table: self.name.clone(),
                expected: self.columns.len(),
                actual: values.len(),
            });
        }
        self.rows.push(values);
        Ok(())
    }

    pub fn get_row(&self, row_idx: usize) -> Option<&Row> {
        self.rows.get(row_idx)
    }

    /// Position of the first column whose name matches case-insensitively.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|col| col.matches(name))
    }
}
