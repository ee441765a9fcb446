//! File-to-file join.
//!
//! # Example
//!
//! ```rust,ignore
//! use teamjoin::{run, JoinOptions};
//!
//! let options = JoinOptions::new("schedule.csv", "team_ids.csv", "out/schedule_ids.csv");
//! let report = run(&options)?;
//! println!("{} rows written", report.summary.output_rows);
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::config::JoinOptions;
use crate::error::{JoinError, JoinResult};
use crate::logs::{LogEntry, RunLog};
use crate::lookup::{Competitions, TeamIndex};
use crate::parser::{read_table, write_csv, Table};
use super::join::{join_tables, JoinSummary};

/// How many unknown names are listed in the log
const MAX_LISTED: usize = 10;

/// What one run read, wrote and found
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RunReport {
    pub generated_at: String,
    pub schedule: PathBuf,
    pub teams: PathBuf,
    pub out: PathBuf,
    pub schedule_encoding: String,
    pub teams_encoding: String,
    pub summary: JoinSummary,
    pub warnings: Vec<LogEntry>,
}

/// Read both tables, join them and write the output (and report, if asked).
pub fn run(options: &JoinOptions) -> JoinResult<RunReport> {
    options.settings.validate()?;
    let mut log = RunLog::new();

    log.info(format!("Reading teams: {}", options.teams.display()));
    let teams_table = read_table(&options.teams, options.delimiter)?;
    describe_table(&mut log, &teams_table);
    let teams = TeamIndex::from_rows(&teams_table.rows);
    log.success(format!(
        "{} team names indexed from {} rows",
        teams.len(),
        teams.record_count()
    ));
    if teams.skipped_count() > 0 {
        log.warning(format!(
            "{} reference rows skipped (fewer than 3 columns)",
            teams.skipped_count()
        ));
    }
    for dup in teams.duplicates() {
        log.warning_indent(
            format!(
                "Duplicate team name '{}': id {} replaced by {}",
                dup.name, dup.replaced_id, dup.kept_id
            ),
            1,
        );
    }

    let mut competitions = Competitions::builtin();
    if let Some(path) = &options.competitions {
        let count = competitions.load_overrides(path)?;
        log.success(format!("{} competition ids loaded from {}", count, path.display()));
    }

    log.info(format!("Reading schedule: {}", options.schedule.display()));
    let schedule_table = read_table(&options.schedule, options.delimiter)?;
    describe_table(&mut log, &schedule_table);
    let schedule_encoding = schedule_table.encoding.clone();

    let output = join_tables(schedule_table.rows, &teams, &competitions, &options.settings);
    log_summary(&mut log, &output.summary);

    write_csv(&options.out, &output.header, &output.rows)?;
    log.success(format!(
        "{} rows written to {} ({} schema)",
        output.rows.len(),
        options.out.display(),
        output.summary.schema
    ));

    let report = RunReport {
        generated_at: chrono::Utc::now().to_rfc3339(),
        schedule: options.schedule.clone(),
        teams: options.teams.clone(),
        out: options.out.clone(),
        schedule_encoding,
        teams_encoding: teams_table.encoding,
        summary: output.summary,
        warnings: log.warnings(),
    };

    if let Some(path) = &options.report {
        write_report(path, &report)?;
        log.success(format!("Report saved to {}", path.display()));
    }

    Ok(report)
}

fn write_report(path: &Path, report: &RunReport) -> JoinResult<()> {
    let fail = |message: String| JoinError::Report {
        path: path.to_path_buf(),
        message,
    };

    let content = serde_json::to_string_pretty(report).map_err(|e| fail(e.to_string()))?;
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| fail(e.to_string()))?;
    }
    fs::write(path, content).map_err(|e| fail(e.to_string()))
}

fn describe_table(log: &mut RunLog, table: &Table) {
    log.info_indent(
        format!(
            "{} rows, encoding {}, delimiter '{}'",
            table.rows.len(),
            table.encoding,
            format_delimiter(table.delimiter)
        ),
        1,
    );
}

fn log_summary(log: &mut RunLog, summary: &JoinSummary) {
    if summary.header_detected {
        log.info("Schedule header row dropped");
    }
    log.success(format!(
        "Joined {} rows: {} team lookups matched, {} unmatched",
        summary.output_rows, summary.matched_teams, summary.unmatched_teams
    ));
    if summary.padded_rows > 0 || summary.truncated_rows > 0 {
        log.info_indent(
            format!(
                "{} short rows padded, {} long rows truncated",
                summary.padded_rows, summary.truncated_rows
            ),
            1,
        );
    }

    if !summary.unknown_team_names.is_empty() {
        log.warning(format!(
            "{} team names not found in reference table",
            summary.unknown_team_names.len()
        ));
        for name in summary.unknown_team_names.iter().take(MAX_LISTED) {
            log.warning_indent(name.clone(), 1);
        }
        if summary.unknown_team_names.len() > MAX_LISTED {
            log.warning_indent(
                format!("... +{}", summary.unknown_team_names.len() - MAX_LISTED),
                1,
            );
        }
    }

    if !summary.unknown_competitions.is_empty() {
        let names: Vec<&str> = summary
            .unknown_competitions
            .iter()
            .map(String::as_str)
            .collect();
        log.warning(format!("Unknown competitions: {}", names.join(", ")));
    }
}

fn format_delimiter(d: char) -> String {
    match d {
        '\t' => "TAB".to_string(),
        c => c.to_string(),
    }
}
