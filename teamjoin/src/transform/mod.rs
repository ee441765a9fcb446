//! Schedule transformation.
//!
//! - Normalize: fixed row width and header detection
//! - Join: team and competition lookups, output schema
//! - Pipeline: file-to-file run

pub mod join;
pub mod normalize;
pub mod pipeline;

pub use join::{join_tables, output_header, JoinOutput, JoinSummary};
pub use normalize::{is_numeric_like, looks_like_header, normalize_row, split_header};
pub use pipeline::{run, RunReport};
