//! Inner join of two tables on a shared key column.

use std::collections::HashMap;

use crate::error::{TransformError, TransformResult};
use crate::table::{cell_text, Table};

/// Inner-join `left` and `right` on the named key column.
///
/// Output columns are the left columns followed by the right columns minus
/// the key. Left row order is preserved; a key appearing several times on
/// either side multiplies rows per standard join semantics. Rows whose key
/// appears on only one side are dropped.
pub fn inner_join(left: &Table, right: &Table, key: &str) -> TransformResult<Table> {
    let left_key = left
        .column_index(key)
        .ok_or_else(|| TransformError::MissingColumn(key.to_string()))?;
    let right_key = right
        .column_index(key)
        .ok_or_else(|| TransformError::MissingColumn(key.to_string()))?;

    let right_keep: Vec<usize> = (0..right.width()).filter(|&i| i != right_key).collect();

    let mut columns = left.columns().to_vec();
    columns.extend(right_keep.iter().map(|&i| right.columns()[i].clone()));

    let mut by_key: HashMap<String, Vec<usize>> = HashMap::new();
    for (i, row) in right.rows().iter().enumerate() {
        by_key
            .entry(cell_text(&row[right_key]).trim().to_string())
            .or_default()
            .push(i);
    }

    let mut joined = Table::new(columns);
    for left_row in left.rows() {
        let key_text = cell_text(&left_row[left_key]).trim().to_string();
        let Some(matches) = by_key.get(&key_text) else {
            continue;
        };
        for &ri in matches {
            let right_row = &right.rows()[ri];
            let mut row = left_row.clone();
            row.extend(right_keep.iter().map(|&i| right_row[i].clone()));
            joined.push_row(row);
        }
    }

    Ok(joined)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn messages() -> Table {
        let mut t = Table::new(vec!["id".into(), "message".into()]);
        t.push_row(vec![json!("1"), json!("help")]);
        t.push_row(vec![json!("2"), json!("water")]);
        t.push_row(vec![json!("3"), json!("shelter")]);
        t
    }

    fn categories() -> Table {
        let mut t = Table::new(vec!["id".into(), "categories".into()]);
        t.push_row(vec![json!("1"), json!("related-1")]);
        t.push_row(vec![json!("3"), json!("related-0")]);
        t.push_row(vec![json!("4"), json!("related-1")]);
        t
    }

    #[test]
    fn test_inner_join_keeps_matching_ids_only() {
        let joined = inner_join(&messages(), &categories(), "id").unwrap();

        assert_eq!(joined.columns(), ["id", "message", "categories"]);
        assert_eq!(joined.len(), 2);
        assert_eq!(joined.cell(0, "id"), Some(&json!("1")));
        assert_eq!(joined.cell(0, "categories"), Some(&json!("related-1")));
        assert_eq!(joined.cell(1, "id"), Some(&json!("3")));
    }

    #[test]
    fn test_duplicate_keys_multiply() {
        let mut right = Table::new(vec!["id".into(), "categories".into()]);
        right.push_row(vec![json!("1"), json!("related-1")]);
        right.push_row(vec![json!("1"), json!("related-0")]);

        let joined = inner_join(&messages(), &right, "id").unwrap();
        assert_eq!(joined.len(), 2);
        assert_eq!(joined.cell(0, "message"), Some(&json!("help")));
        assert_eq!(joined.cell(1, "message"), Some(&json!("help")));
    }

    #[test]
    fn test_left_order_preserved() {
        let joined = inner_join(&messages(), &categories(), "id").unwrap();
        let ids: Vec<_> = joined
            .rows()
            .iter()
            .map(|r| r[0].as_str().unwrap().to_string())
            .collect();
        assert_eq!(ids, ["1", "3"]);
    }

    #[test]
    fn test_missing_key_column() {
        let mut no_id = Table::new(vec!["message".into()]);
        no_id.push_row(vec![json!("help")]);

        let result = inner_join(&no_id, &categories(), "id");
        assert!(matches!(result, Err(TransformError::MissingColumn(c)) if c == "id"));
    }

    #[test]
    fn test_no_matches_yields_empty_table() {
        let mut right = Table::new(vec!["id".into(), "categories".into()]);
        right.push_row(vec![json!("99"), json!("related-1")]);

        let joined = inner_join(&messages(), &right, "id").unwrap();
        assert!(joined.is_empty());
        assert_eq!(joined.columns(), ["id", "message", "categories"]);
    }
}
