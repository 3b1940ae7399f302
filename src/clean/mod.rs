//! Row cleaning: duplicate removal and sentinel filtering.
//!
//! Pure table-to-table stage, no I/O. Two rules, applied in order:
//!
//! 1. exact full-row duplicates are dropped, keeping the first occurrence;
//! 2. rows whose `related` label holds the out-of-domain sentinel `2` are
//!    dropped (the nominal label domain is {0,1}).

use std::collections::HashSet;

use serde_json::Value;

use crate::error::{TransformError, TransformResult};
use crate::table::Table;

/// Primary label column checked for the sentinel.
pub const RELATED_COLUMN: &str = "related";

/// Out-of-domain value marking a row as invalid rather than classified.
pub const SENTINEL: i64 = 2;

/// Apply both cleaning rules. Idempotent.
pub fn clean(table: Table) -> TransformResult<Table> {
    drop_invalid(drop_duplicates(table))
}

/// Drop rows that are exact duplicates across every column, keeping the
/// first occurrence. Row order is otherwise unchanged.
pub fn drop_duplicates(table: Table) -> Table {
    let mut seen: HashSet<String> = HashSet::new();
    let mut out = Table::new(table.columns().to_vec());

    for row in table.rows() {
        if seen.insert(fingerprint(row)) {
            out.push_row(row.clone());
        }
    }

    out
}

/// Drop rows whose `related` cell equals the sentinel.
///
/// Fails if the `related` column is absent.
pub fn drop_invalid(table: Table) -> TransformResult<Table> {
    let related = table
        .column_index(RELATED_COLUMN)
        .ok_or_else(|| TransformError::MissingColumn(RELATED_COLUMN.to_string()))?;

    let mut out = Table::new(table.columns().to_vec());
    for row in table.rows() {
        if !is_sentinel(&row[related]) {
            out.push_row(row.clone());
        }
    }

    Ok(out)
}

fn is_sentinel(cell: &Value) -> bool {
    match cell {
        Value::Number(n) => n.as_i64() == Some(SENTINEL),
        Value::String(s) => s.trim().parse::<i64>() == Ok(SENTINEL),
        _ => false,
    }
}

/// Stable textual identity of a full row, used for duplicate detection.
fn fingerprint(row: &[Value]) -> String {
    let mut key = String::new();
    for cell in row {
        // JSON rendering escapes the separator, so cell boundaries are unambiguous
        key.push_str(&cell.to_string());
        key.push('\u{1e}');
    }
    key
}
