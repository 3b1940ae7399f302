//! SQLite persistence with replace semantics.
//!
//! The cleaned table is written into a single named table (default
//! `Response`): drop the previous table if present, recreate it from the
//! table's columns, insert every row. All three steps run inside one
//! transaction, so a failed save leaves the previous contents intact.
//!
//! The connection is scoped to the single write and dropped after commit.

use std::path::Path;

use rusqlite::{types, Connection};
use serde_json::Value;
use tracing::debug;

use crate::error::{StorageError, StorageResult};
use crate::table::Table;

/// Default destination table name.
pub const DEFAULT_TABLE: &str = "Response";

/// Column affinity declared at CREATE TABLE time.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Affinity {
    Integer,
    Text,
}

impl Affinity {
    fn as_sql(self) -> &'static str {
        match self {
            Affinity::Integer => "INTEGER",
            Affinity::Text => "TEXT",
        }
    }
}

/// Write `table` into `table_name` at `destination`, replacing any prior
/// table of that name. Returns the number of rows written.
///
/// The database file is created if absent. No index is created.
pub fn save<P: AsRef<Path>>(table: &Table, destination: P, table_name: &str) -> StorageResult<usize> {
    if table.width() == 0 {
        return Err(StorageError::NoColumns);
    }

    let affinities: Vec<Affinity> = (0..table.width()).map(|i| column_affinity(table, i)).collect();

    let mut conn = Connection::open(destination)?;
    let tx = conn.transaction()?;

    let quoted_name = quote_ident(table_name);
    tx.execute_batch(&format!("DROP TABLE IF EXISTS {quoted_name}"))?;

    let declarations: Vec<String> = table
        .columns()
        .iter()
        .zip(&affinities)
        .map(|(column, affinity)| format!("{} {}", quote_ident(column), affinity.as_sql()))
        .collect();
    tx.execute_batch(&format!(
        "CREATE TABLE {quoted_name} ({})",
        declarations.join(", ")
    ))?;

    let placeholders: Vec<String> = (1..=table.width()).map(|i| format!("?{i}")).collect();
    let insert_sql = format!(
        "INSERT INTO {quoted_name} VALUES ({})",
        placeholders.join(", ")
    );

    {
        let mut stmt = tx.prepare(&insert_sql)?;
        for row in table.rows() {
            let params = row
                .iter()
                .zip(&affinities)
                .map(|(cell, &affinity)| to_sql_value(cell, affinity));
            stmt.execute(rusqlite::params_from_iter(params))?;
        }
    }

    tx.commit()?;
    debug!(table = table_name, rows = table.len(), "table written");
    Ok(table.len())
}

/// INTEGER when every cell in the column is (or reads as) an integer,
/// TEXT otherwise. Matches the dtype mapping the source engine applied.
fn column_affinity(table: &Table, column: usize) -> Affinity {
    let all_integers = !table.is_empty()
        && table
            .rows()
            .iter()
            .all(|row| cell_as_integer(&row[column]).is_some());

    if all_integers {
        Affinity::Integer
    } else {
        Affinity::Text
    }
}

fn cell_as_integer(cell: &Value) -> Option<i64> {
    match cell {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn to_sql_value(cell: &Value, affinity: Affinity) -> types::Value {
    if affinity == Affinity::Integer {
        if let Some(i) = cell_as_integer(cell) {
            return types::Value::Integer(i);
        }
    }
    match cell {
        Value::Null => types::Value::Null,
        Value::String(s) => types::Value::Text(s.clone()),
        Value::Number(n) => match n.as_i64() {
            Some(i) => types::Value::Integer(i),
            None => match n.as_f64() {
                Some(f) => types::Value::Real(f),
                None => types::Value::Text(n.to_string()),
            },
        },
        Value::Bool(b) => types::Value::Integer(i64::from(*b)),
        other => types::Value::Text(other.to_string()),
    }
}

/// Double-quote an SQL identifier, escaping embedded quotes.
fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}
