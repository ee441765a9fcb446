//! # teamjoin - enrich fixture schedules with team and competition ids
//!
//! Joins a schedule table against a team reference table and appends the
//! stable identifiers (and categories, competition ids) of each fixture.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────┐     ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │ schedule.csv │────▶│   Parser    │────▶│  Normalize  │────▶│    Join     │────▶ out.csv
//! │  (UTF8/SJIS) │     │ (auto-enc)  │     │ (pad/header)│     │ (ids, cat.) │
//! └──────────────┘     └─────────────┘     └─────────────┘     └─────────────┘
//!                                                                     ▲
//! ┌──────────────┐     ┌─────────────┐     ┌─────────────┐            │
//! │  teams.csv   │────▶│   Parser    │────▶│  TeamIndex  │────────────┘
//! └──────────────┘     └─────────────┘     └─────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use teamjoin::{run, JoinOptions};
//!
//! let report = run(&JoinOptions::new("schedule.csv", "team_ids.csv", "out.csv"))?;
//! println!("{} fixtures joined", report.summary.output_rows);
//! ```
//!
//! ## Modules
//!
//! - [`error`] - Error types
//! - [`config`] - Options, environment defaults
//! - [`logs`] - Run logging
//! - [`parser`] - CSV reading/writing with auto-detection
//! - [`lookup`] - Team and competition lookups
//! - [`transform`] - Normalization, join, and pipeline

// Core modules
pub mod config;
pub mod error;
pub mod logs;

// Parsing
pub mod parser;

// Lookups
pub mod lookup;

// Transformation
pub mod transform;

// =============================================================================
// Re-exports
// =============================================================================

pub use config::{EnvDefaults, HeaderMode, JoinOptions, JoinSettings, OutputSchema};

pub use error::{ConfigError, CsvError, JoinError};

pub use lookup::{Competitions, DuplicateName, TeamIndex, TeamRecord};

pub use parser::{
    decode_content, detect_delimiter, detect_encoding, parse_bytes, parse_rows, read_table,
    write_csv, Table,
};

pub use transform::{join_tables, output_header, run, JoinOutput, JoinSummary, RunReport};
