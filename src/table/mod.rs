//! In-memory table value threaded through the pipeline stages.
//!
//! A [`Table`] is an ordered list of column names plus rows of cells. Cells
//! are JSON values: strings as read from the input files, integers after
//! label expansion. Every row has exactly one cell per column.

use serde_json::{Map, Value};

/// A rectangular, column-ordered table.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    columns: Vec<String>,
    rows: Vec<Vec<Value>>,
}

impl Table {
    /// Create an empty table with the given column names.
    pub fn new(columns: Vec<String>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    /// Column names, in order.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// All rows, in order.
    pub fn rows(&self) -> &[Vec<Value>] {
        &self.rows
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// True if the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Number of columns.
    pub fn width(&self) -> usize {
        self.columns.len()
    }

    /// Position of a column by name, if present.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// True if a column with this name exists.
    pub fn has_column(&self, name: &str) -> bool {
        self.column_index(name).is_some()
    }

    /// Append a row. The row must have one cell per column.
    pub fn push_row(&mut self, row: Vec<Value>) {
        assert_eq!(
            row.len(),
            self.columns.len(),
            "row width must match column count"
        );
        self.rows.push(row);
    }

    /// Cell at (row, column name), if both exist.
    pub fn cell(&self, row: usize, column: &str) -> Option<&Value> {
        let idx = self.column_index(column)?;
        self.rows.get(row).map(|r| &r[idx])
    }

    /// Rows as JSON objects keyed by column name.
    ///
    /// Used for debug output; the authoritative column order lives in
    /// [`Table::columns`].
    pub fn to_records(&self) -> Vec<Value> {
        self.rows
            .iter()
            .map(|row| {
                let mut obj = Map::new();
                for (name, cell) in self.columns.iter().zip(row) {
                    obj.insert(name.clone(), cell.clone());
                }
                Value::Object(obj)
            })
            .collect()
    }
}

/// Cell content as text.
///
/// String cells yield their content; other values their JSON rendering.
pub(crate) fn cell_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> Table {
        let mut t = Table::new(vec!["id".into(), "message".into()]);
        t.push_row(vec![json!("1"), json!("help")]);
        t.push_row(vec![json!("2"), json!("water")]);
        t
    }

    #[test]
    fn test_column_lookup() {
        let t = sample();
        assert_eq!(t.column_index("message"), Some(1));
        assert_eq!(t.column_index("genre"), None);
        assert!(t.has_column("id"));
    }

    #[test]
    fn test_cell_access() {
        let t = sample();
        assert_eq!(t.cell(1, "message"), Some(&json!("water")));
        assert_eq!(t.cell(2, "message"), None);
    }

    #[test]
    fn test_to_records() {
        let records = sample().to_records();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0]["id"], "1");
        assert_eq!(records[1]["message"], "water");
    }

    #[test]
    #[should_panic(expected = "row width")]
    fn test_push_row_width_mismatch() {
        let mut t = sample();
        t.push_row(vec![json!("3")]);
    }

    #[test]
    fn test_cell_text() {
        assert_eq!(cell_text(&json!("water")), "water");
        assert_eq!(cell_text(&json!(7)), "7");
    }
}
