//! Expansion of the packed label column into discrete integer columns.
//!
//! A packed value looks like `related-1;request-0;offer-0;...`: `name-value`
//! tokens joined by `;`. Column names come from the first data row; every
//! other row must carry the same names in the same order, which is checked
//! explicitly rather than silently trusted.

use serde_json::Value;

use crate::error::{TransformError, TransformResult};
use crate::table::{cell_text, Table};

/// Delimiter between `name-value` tokens inside the packed column.
pub const TOKEN_SEPARATOR: char = ';';

/// Replace the packed `column` with one integer column per label.
///
/// Output columns are the original columns minus `column`, followed by the
/// label columns in row-0 token order. A label name appearing twice keeps
/// its first position and the later token's value wins.
pub fn expand(table: Table, column: &str) -> TransformResult<Table> {
    let packed = table
        .column_index(column)
        .ok_or_else(|| TransformError::MissingColumn(column.to_string()))?;

    let mut columns: Vec<String> = table
        .columns()
        .iter()
        .enumerate()
        .filter(|&(i, _)| i != packed)
        .map(|(_, c)| c.clone())
        .collect();

    // Schema comes from row 0; an empty table keeps only the surviving columns.
    let schema = match table.rows().first() {
        Some(row) => parse_names(&cell_text(&row[packed]), 1)?,
        None => Vec::new(),
    };

    // Duplicate names collapse onto their first slot.
    let mut label_columns: Vec<String> = Vec::new();
    let mut slot_of_token: Vec<usize> = Vec::with_capacity(schema.len());
    for name in &schema {
        match label_columns.iter().position(|c| c == name) {
            Some(slot) => slot_of_token.push(slot),
            None => {
                slot_of_token.push(label_columns.len());
                label_columns.push(name.clone());
            }
        }
    }
    columns.extend(label_columns.iter().cloned());

    let schema_refs: Vec<&str> = schema.iter().map(String::as_str).collect();

    let mut expanded = Table::new(columns);
    for (idx, row) in table.rows().iter().enumerate() {
        let row_number = idx + 1;
        let cell = cell_text(&row[packed]);
        let tokens = parse_tokens(&cell, row_number)?;

        let names: Vec<&str> = tokens.iter().map(|(name, _)| *name).collect();
        if names != schema_refs {
            return Err(TransformError::SchemaMismatch {
                row: row_number,
                expected: schema.join(";"),
                found: names.join(";"),
            });
        }

        let mut labels: Vec<Value> = vec![Value::Null; label_columns.len()];
        for (token_idx, (name, raw)) in tokens.iter().enumerate() {
            let value: i64 = raw.trim().parse().map_err(|_| TransformError::NonNumericLabel {
                row: row_number,
                column: (*name).to_string(),
                value: (*raw).to_string(),
            })?;
            labels[slot_of_token[token_idx]] = Value::from(value);
        }

        let mut out_row: Vec<Value> = row
            .iter()
            .enumerate()
            .filter(|&(i, _)| i != packed)
            .map(|(_, cell)| cell.clone())
            .collect();
        out_row.extend(labels);
        expanded.push_row(out_row);
    }

    Ok(expanded)
}

/// Split a packed value into `(name, value)` token pairs.
fn parse_tokens(packed: &str, row: usize) -> TransformResult<Vec<(&str, &str)>> {
    packed
        .split(TOKEN_SEPARATOR)
        .map(|token| {
            let token = token.trim();
            token
                .rsplit_once('-')
                .ok_or_else(|| TransformError::BadToken {
                    row,
                    token: token.to_string(),
                })
        })
        .collect()
}

/// Label names of a packed value, in token order.
fn parse_names(packed: &str, row: usize) -> TransformResult<Vec<String>> {
    Ok(parse_tokens(packed, row)?
        .into_iter()
        .map(|(name, _)| name.to_string())
        .collect())
}
