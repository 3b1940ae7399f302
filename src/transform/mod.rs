//! Transformation module.
//!
//! - Join: inner join of the two source tables on `id`
//! - Categories: packed label-string expansion
//! - Pipeline: load → clean → save orchestration

pub mod categories;
pub mod join;
pub mod pipeline;

pub use categories::expand;
pub use join::inner_join;
pub use pipeline::{load, run, ProcessOptions, ProcessReport};
