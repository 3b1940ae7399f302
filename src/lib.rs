//! # msgload - categorized-message ETL pipeline
//!
//! msgload joins a free-text messages CSV with a packed multi-label
//! categories CSV, expands the labels into integer columns, removes
//! duplicate and sentinel rows, and writes the result into an SQLite table.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────┐     ┌─────────────┐     ┌────────────┐     ┌────────────┐
//! │ messages.csv │────▶│  Parser +   │────▶│   Cleaner  │────▶│   SQLite   │
//! │categories.csv│     │ Join/Expand │     │(dedupe + 2)│     │ `Response` │
//! └──────────────┘     └─────────────┘     └────────────┘     └────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use msgload::{run, ProcessOptions};
//! use std::path::Path;
//!
//! fn main() {
//!     let report = run(
//!         Path::new("messages.csv"),
//!         Path::new("categories.csv"),
//!         Path::new("response.db"),
//!         &ProcessOptions::default(),
//!     ).unwrap();
//!     println!("Wrote {} rows", report.rows_written);
//! }
//! ```
//!
//! ## Modules
//!
//! - [`error`] - Hierarchical error types
//! - [`table`] - The table value threaded through the stages
//! - [`parser`] - Delimited-file reading with auto-detection
//! - [`transform`] - Join, label expansion, and pipeline
//! - [`clean`] - Duplicate removal and sentinel filtering
//! - [`storage`] - SQLite writer with replace semantics

// Core modules
pub mod error;
pub mod table;

// Parsing
pub mod parser;

// Transformation
pub mod transform;

// Cleaning
pub mod clean;

// Storage
pub mod storage;

// =============================================================================
// Re-exports - Error types
// =============================================================================

pub use error::{InputError, PipelineError, StorageError, TransformError};

// =============================================================================
// Re-exports - Table
// =============================================================================

pub use table::Table;

// =============================================================================
// Re-exports - Parsing
// =============================================================================

pub use parser::{decode_content, detect_delimiter, detect_encoding, parse_str, read_file, ParsedFile};

// =============================================================================
// Re-exports - Transformation
// =============================================================================

pub use transform::{expand, inner_join, load, run, ProcessOptions, ProcessReport};
pub use transform::pipeline::{CATEGORIES_COLUMN, ID_COLUMN};

// =============================================================================
// Re-exports - Cleaning
// =============================================================================

pub use clean::{clean, drop_duplicates, drop_invalid, RELATED_COLUMN, SENTINEL};

// =============================================================================
// Re-exports - Storage
// =============================================================================

pub use storage::{save, DEFAULT_TABLE};
