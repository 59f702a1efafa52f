use std::fmt;

use crate::value::Value;

/// The uniform result of every statement.
///
/// `SELECT` fills both fields; every other statement returns an empty result
/// with no columns and no rows.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryResult {
    /// The names of the columns included in the result set, in selection order.
    pub columns: Vec<String>,
    /// Copied rows, each aligned with `columns`.
    pub rows: Vec<Vec<Value>>,
}

impl QueryResult {
    /// The result of a statement that returns no data.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty() && self.rows.is_empty()
    }

    /// Renders the result as CSV: a header line then one line per row.
    ///
    /// Fields holding a comma, a double quote or a line break are quoted and
    /// inner quotes doubled. `NULL` becomes an empty field.
    pub fn to_csv(&self) -> String {
        let mut out = String::new();
        push_csv_line(&mut out, self.columns.iter().map(String::as_str));
        for row in &self.rows {
            let fields: Vec<String> = row
                .iter()
                .map(|v| if v.is_null() { String::new() } else { v.to_string() })
                .collect();
            push_csv_line(&mut out, fields.iter().map(String::as_str));
        }
        out
    }
}

fn push_csv_line<'a>(out: &mut String, fields: impl Iterator<Item = &'a str>) {
    for (i, field) in fields.enumerate() {
        if i > 0 {
            out.push(',');
        }
        if field.contains([',', '"', '\n', '\r']) {
            out.push('"');
            out.push_str(&field.replace('"', "\"\""));
            out.push('"');
        } else {
            out.push_str(field);
        }
    }
    out.push('\n');
}

/// Aligned plain-text table, one header row and a separator line.
impl fmt::Display for QueryResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.columns.is_empty() {
            return Ok(());
        }

        let cells: Vec<Vec<String>> = self
            .rows
            .iter()
            .map(|row| row.iter().map(Value::to_string).collect())
            .collect();

        let mut widths: Vec<usize> = self.columns.iter().map(|c| c.chars().count()).collect();
        for row in &cells {
            for (width, cell) in widths.iter_mut().zip(row) {
                *width = (*width).max(cell.chars().count());
            }
        }

        let write_line = |f: &mut fmt::Formatter<'_>, line: &[String]| -> fmt::Result {
            let padded: Vec<String> = line
                .iter()
                .zip(&widths)
                .map(|(cell, &width)| format!("{cell:<width$}"))
                .collect();
            writeln!(f, "{}", padded.join(" | ").trim_end())
        };

        write_line(f, &self.columns[..])?;
        let separator: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
        writeln!(f, "{}", separator.join("-+-"))?;
        for row in &cells {
            write_line(f, &row[..])?;
        }
        write!(f, "({} row{})", cells.len(), if cells.len() == 1 { "" } else { "s" })
    }
}
