//! High-level pipeline API: load, clean, and save in one call.
//!
//! # Example
//!
//! ```rust,ignore
//! use msgload::{run, ProcessOptions};
//! use std::path::Path;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let report = run(
//!         Path::new("messages.csv"),
//!         Path::new("categories.csv"),
//!         Path::new("response.db"),
//!         &ProcessOptions::default(),
//!     )?;
//!     println!("Wrote {} rows", report.rows_written);
//!     Ok(())
//! }
//! ```

use serde::Serialize;
use std::path::Path;
use tracing::{debug, info};

use crate::clean::{drop_duplicates, drop_invalid};
use crate::error::{InputError, PipelineResult};
use crate::parser;
use crate::storage;
use crate::table::Table;

use super::categories::expand;
use super::join::inner_join;

/// Key column shared by both source files.
pub const ID_COLUMN: &str = "id";

/// Packed label column in the categories file.
pub const CATEGORIES_COLUMN: &str = "categories";

/// Options for the pipeline.
#[derive(Debug, Clone)]
pub struct ProcessOptions {
    /// Destination table name.
    pub table_name: String,

    /// Field delimiter for both input files (auto-detect per file if `None`).
    pub delimiter: Option<char>,
}

impl Default for ProcessOptions {
    fn default() -> Self {
        Self {
            table_name: storage::DEFAULT_TABLE.to_string(),
            delimiter: None,
        }
    }
}

/// Summary of a completed pipeline run.
#[derive(Debug, Clone, Serialize)]
pub struct ProcessReport {
    /// Rows read from the messages file.
    pub messages_rows: usize,

    /// Rows read from the categories file.
    pub categories_rows: usize,

    /// Rows surviving the inner join.
    pub joined_rows: usize,

    /// Label columns derived from the packed category string.
    pub label_columns: Vec<String>,

    /// Exact-duplicate rows removed.
    pub duplicates_removed: usize,

    /// Rows removed for carrying the sentinel label value.
    pub invalid_removed: usize,

    /// Rows written to the destination table.
    pub rows_written: usize,
}

/// Read both source files, inner-join them on `id`, and expand the packed
/// label column into integer columns.
pub fn load(
    messages_path: &Path,
    categories_path: &Path,
    options: &ProcessOptions,
) -> PipelineResult<Table> {
    Ok(load_parts(messages_path, categories_path, options)?.0)
}

struct LoadStats {
    messages_rows: usize,
    categories_rows: usize,
    label_columns: Vec<String>,
}

fn load_parts(
    messages_path: &Path,
    categories_path: &Path,
    options: &ProcessOptions,
) -> PipelineResult<(Table, LoadStats)> {
    let messages = parser::read_file(messages_path, options.delimiter)?;
    debug!(
        file = %messages_path.display(),
        encoding = %messages.encoding,
        delimiter = %messages.delimiter,
        rows = messages.table.len(),
        "read messages file"
    );
    require_column(&messages.table, ID_COLUMN, messages_path)?;

    let categories = parser::read_file(categories_path, options.delimiter)?;
    debug!(
        file = %categories_path.display(),
        encoding = %categories.encoding,
        delimiter = %categories.delimiter,
        rows = categories.table.len(),
        "read categories file"
    );
    require_column(&categories.table, ID_COLUMN, categories_path)?;
    require_column(&categories.table, CATEGORIES_COLUMN, categories_path)?;

    let joined = inner_join(&messages.table, &categories.table, ID_COLUMN)?;
    info!(
        messages = messages.table.len(),
        categories = categories.table.len(),
        joined = joined.len(),
        "joined datasets on id"
    );

    let joined_width = joined.width();
    let expanded = expand(joined, CATEGORIES_COLUMN)?;
    let label_columns: Vec<String> = expanded.columns()[joined_width - 1..].to_vec();
    info!(labels = label_columns.len(), "expanded packed label column");

    let stats = LoadStats {
        messages_rows: messages.table.len(),
        categories_rows: categories.table.len(),
        label_columns,
    };
    Ok((expanded, stats))
}

/// Run the whole pipeline: load, clean, save. Returns a run summary.
pub fn run(
    messages_path: &Path,
    categories_path: &Path,
    database_path: &Path,
    options: &ProcessOptions,
) -> PipelineResult<ProcessReport> {
    let (table, stats) = load_parts(messages_path, categories_path, options)?;
    let joined_rows = table.len();

    let deduped = drop_duplicates(table);
    let duplicates_removed = joined_rows - deduped.len();
    let deduped_rows = deduped.len();

    let cleaned = drop_invalid(deduped)?;
    let invalid_removed = deduped_rows - cleaned.len();
    info!(duplicates_removed, invalid_removed, "cleaned rows");

    let rows_written = storage::save(&cleaned, database_path, &options.table_name)?;
    info!(
        database = %database_path.display(),
        table = %options.table_name,
        rows = rows_written,
        "saved cleaned data"
    );

    Ok(ProcessReport {
        messages_rows: stats.messages_rows,
        categories_rows: stats.categories_rows,
        joined_rows,
        label_columns: stats.label_columns,
        duplicates_removed,
        invalid_removed,
        rows_written,
    })
}

fn require_column(table: &Table, column: &str, file: &Path) -> Result<(), InputError> {
    if table.has_column(column) {
        return Ok(());
    }
    Err(InputError::MissingColumn {
        column: column.to_string(),
        file: file.display().to_string(),
    })
}
