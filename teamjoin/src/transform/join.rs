//! Join schedule rows against the team and competition lookups.
//!
//! # Output
//!
//! ```text
//! year,category,…,other │ homeTeamId,awayTeamId │ homeTeamCategory,awayTeamCategory,competitionId
//! ───── 11 fixture ─────┼──────── ids ──────────┼──────────────── full only ───────────────────
//! ```
//!
//! The header is fixed per [`OutputSchema`]. Every row has exactly the
//! header's width. A name or competition that is not found gives `""`.

use std::collections::BTreeSet;

use serde::Serialize;

use crate::config::{JoinSettings, OutputSchema};
use crate::lookup::{Competitions, DuplicateName, TeamIndex};
use crate::transform::normalize::{
    normalize_row, split_header, CATEGORY_IDX, MIN_WIDTH, SCHEDULE_COLUMNS,
};

/// Columns appended by the `ids` schema
pub const ID_COLUMNS: &[&str] = &["homeTeamId", "awayTeamId"];

/// Columns appended on top of [`ID_COLUMNS`] by the `full` schema
pub const FULL_COLUMNS: &[&str] = &["homeTeamCategory", "awayTeamCategory", "competitionId"];

/// Fixed output header of a schema
pub fn output_header(schema: OutputSchema) -> Vec<&'static str> {
    let mut header: Vec<&'static str> =
        SCHEDULE_COLUMNS.iter().chain(ID_COLUMNS).copied().collect();
    if schema == OutputSchema::Full {
        header.extend_from_slice(FULL_COLUMNS);
    }
    header
}

/// Counters and findings of one join
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JoinSummary {
    pub schema: OutputSchema,
    pub header_detected: bool,
    /// Schedule rows read, header included
    pub input_rows: usize,
    pub output_rows: usize,
    pub padded_rows: usize,
    pub truncated_rows: usize,
    /// Reference rows that produced lookups
    pub team_records: usize,
    pub matched_teams: usize,
    pub unmatched_teams: usize,
    /// Home/away cells that were blank or out of range
    pub blank_team_names: usize,
    pub unknown_team_names: BTreeSet<String>,
    pub unknown_competitions: BTreeSet<String>,
    pub duplicate_team_names: Vec<DuplicateName>,
}

/// Joined table ready to be written
#[derive(Debug, Clone)]
pub struct JoinOutput {
    pub header: Vec<&'static str>,
    pub rows: Vec<Vec<String>>,
    pub summary: JoinSummary,
}

/// Join every schedule row; see the module docs for the layout.
pub fn join_tables(
    rows: Vec<Vec<String>>,
    teams: &TeamIndex,
    competitions: &Competitions,
    settings: &JoinSettings,
) -> JoinOutput {
    let mut summary = JoinSummary {
        schema: settings.schema,
        input_rows: rows.len(),
        team_records: teams.record_count(),
        duplicate_team_names: teams.duplicates().to_vec(),
        ..JoinSummary::default()
    };

    let (header_detected, data) = split_header(rows, settings.header);
    summary.header_detected = header_detected;

    let joined: Vec<Vec<String>> = data
        .into_iter()
        .map(|row| join_row(row, teams, competitions, settings, &mut summary))
        .collect();
    summary.output_rows = joined.len();

    JoinOutput {
        header: output_header(settings.schema),
        rows: joined,
        summary,
    }
}

fn join_row(
    mut row: Vec<String>,
    teams: &TeamIndex,
    competitions: &Competitions,
    settings: &JoinSettings,
    summary: &mut JoinSummary,
) -> Vec<String> {
    match row.len() {
        n if n < MIN_WIDTH => summary.padded_rows += 1,
        n if n > MIN_WIDTH => summary.truncated_rows += 1,
        _ => {}
    }

    // Names are read before truncation so an index past the fixture columns
    // still reaches a long row's extra cells.
    if row.len() < MIN_WIDTH {
        row.resize(MIN_WIDTH, String::new());
    }
    let home = cell(&row, settings.home_idx);
    let away = cell(&row, settings.away_idx);

    let home_id = lookup_team(teams, &home, summary);
    let away_id = lookup_team(teams, &away, summary);

    let mut out = normalize_row(row, MIN_WIDTH);
    out.push(home_id);
    out.push(away_id);

    if settings.schema == OutputSchema::Full {
        let competition = out[CATEGORY_IDX].trim().to_string();
        let competition_id = competitions.competition_id(&competition).unwrap_or_default();
        if competition_id.is_empty() && !competition.is_empty() {
            summary.unknown_competitions.insert(competition);
        }

        out.push(teams.category(&home).unwrap_or_default().to_string());
        out.push(teams.category(&away).unwrap_or_default().to_string());
        out.push(competition_id.to_string());
    }

    out
}

fn cell(row: &[String], idx: usize) -> String {
    row.get(idx).map(|c| c.trim().to_string()).unwrap_or_default()
}

fn lookup_team(teams: &TeamIndex, name: &str, summary: &mut JoinSummary) -> String {
    if name.is_empty() {
        summary.blank_team_names += 1;
        return String::new();
    }
    match teams.team_id(name) {
        Some(id) => {
            summary.matched_teams += 1;
            id.to_string()
        }
        None => {
            summary.unmatched_teams += 1;
            summary.unknown_team_names.insert(name.to_string());
            String::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::HeaderMode;

    fn row(cells: &[&str]) -> Vec<String> {
        cells.iter().map(|c| c.to_string()).collect()
    }

    fn teams() -> TeamIndex {
        TeamIndex::from_rows(&[
            row(&["id", "name", "short", "category"]),
            row(&["11", "鹿島アントラーズ", "鹿島", "J1"]),
            row(&["12", "浦和レッズ", "浦和", "J1"]),
            row(&["21", "ベガルタ仙台", "仙台", ""]),
        ])
    }

    fn fixture(competition: &str, home: &str, away: &str) -> Vec<String> {
        row(&[
            "2024", competition, "第1節第1日", "02/24(土)", "14:00", home, "2-1", away,
            "県立カシマサッカースタジアム", "35,000", "",
        ])
    }

    fn settings(schema: OutputSchema) -> JoinSettings {
        JoinSettings {
            header: HeaderMode::Auto,
            schema,
            ..JoinSettings::default()
        }
    }

    #[test]
    fn test_headers() {
        let ids = output_header(OutputSchema::Ids);
        assert_eq!(ids.len(), 13);
        assert_eq!(ids[..2], ["year", "category"]);
        assert_eq!(ids[11..], ["homeTeamId", "awayTeamId"]);

        let full = output_header(OutputSchema::Full);
        assert_eq!(full.len(), 16);
        assert_eq!(full[13..], ["homeTeamCategory", "awayTeamCategory", "competitionId"]);
    }

    #[test]
    fn test_ids_schema_matches_first_revision() {
        let out = join_tables(
            vec![fixture("J1", "鹿島", "浦和")],
            &teams(),
            &Competitions::builtin(),
            &settings(OutputSchema::Ids),
        );

        assert_eq!(out.rows.len(), 1);
        assert_eq!(out.rows[0].len(), 13);
        assert_eq!(out.rows[0][..11], fixture("J1", "鹿島", "浦和")[..]);
        assert_eq!(out.rows[0][11..], ["11", "12"]);
    }

    #[test]
    fn test_full_schema_adds_categories_and_competition() {
        let out = join_tables(
            vec![fixture("明治安田J1リーグ", "鹿島", "仙台")],
            &teams(),
            &Competitions::builtin(),
            &settings(OutputSchema::Full),
        );

        assert_eq!(out.rows[0][11..], ["11", "21", "J1", "", "1"]);
        assert!(out.summary.unknown_competitions.is_empty());
    }

    #[test]
    fn test_unknown_names_give_empty_fields() {
        let out = join_tables(
            vec![fixture("Friendly", "Arsenal", "浦和")],
            &teams(),
            &Competitions::builtin(),
            &settings(OutputSchema::Full),
        );

        assert_eq!(out.rows[0][11..], ["", "12", "", "J1", ""]);
        assert_eq!(out.summary.matched_teams, 1);
        assert_eq!(out.summary.unmatched_teams, 1);
        assert!(out.summary.unknown_team_names.contains("Arsenal"));
        assert!(out.summary.unknown_competitions.contains("Friendly"));
    }

    #[test]
    fn test_names_are_trimmed_before_lookup() {
        let out = join_tables(
            vec![fixture("J1", "  鹿島 ", "浦和\t")],
            &teams(),
            &Competitions::builtin(),
            &settings(OutputSchema::Ids),
        );

        assert_eq!(out.rows[0][5], "  鹿島 ");
        assert_eq!(out.rows[0][11..], ["11", "12"]);
    }

    #[test]
    fn test_short_row_padded_and_width_fixed() {
        let out = join_tables(
            vec![row(&["2024", "J1"]), row(&[])],
            &teams(),
            &Competitions::builtin(),
            &JoinSettings {
                header: HeaderMode::Absent,
                ..JoinSettings::default()
            },
        );

        assert_eq!(out.rows.len(), 2);
        assert!(out.rows.iter().all(|r| r.len() == out.header.len()));
        assert_eq!(out.rows[0][15], "1");
        assert_eq!(out.summary.padded_rows, 2);
        assert_eq!(out.summary.blank_team_names, 4);
    }

    #[test]
    fn test_long_row_truncated_but_extra_index_readable() {
        let mut long = fixture("J1", "", "浦和");
        long.push("鹿島".into());

        let out = join_tables(
            vec![long],
            &teams(),
            &Competitions::builtin(),
            &JoinSettings {
                home_idx: 11,
                schema: OutputSchema::Ids,
                ..JoinSettings::default()
            },
        );

        assert_eq!(out.rows[0].len(), 13);
        assert_eq!(out.rows[0][11..], ["11", "12"]);
        assert_eq!(out.summary.truncated_rows, 1);
    }

    #[test]
    fn test_out_of_range_index_is_blank() {
        let out = join_tables(
            vec![fixture("J1", "鹿島", "浦和")],
            &teams(),
            &Competitions::builtin(),
            &JoinSettings {
                away_idx: 40,
                schema: OutputSchema::Ids,
                ..JoinSettings::default()
            },
        );

        assert_eq!(out.rows[0][11..], ["11", ""]);
    }

    #[test]
    fn test_row_count_minus_detected_header() {
        let mut rows = vec![row(SCHEDULE_COLUMNS)];
        rows.extend((0..5).map(|_| fixture("J1", "鹿島", "浦和")));

        let out = join_tables(
            rows,
            &teams(),
            &Competitions::builtin(),
            &settings(OutputSchema::Full),
        );

        assert!(out.summary.header_detected);
        assert_eq!(out.summary.input_rows, 6);
        assert_eq!(out.rows.len(), 5);
        assert_eq!(out.summary.output_rows, 5);
    }

    #[test]
    fn test_row_count_without_header() {
        let rows: Vec<_> = (0..4).map(|_| fixture("J2", "仙台", "浦和")).collect();
        let out = join_tables(
            rows,
            &teams(),
            &Competitions::builtin(),
            &settings(OutputSchema::Full),
        );

        assert!(!out.summary.header_detected);
        assert_eq!(out.rows.len(), 4);
    }

    #[test]
    fn test_empty_schedule() {
        let out = join_tables(
            Vec::new(),
            &teams(),
            &Competitions::builtin(),
            &settings(OutputSchema::Full),
        );
        assert!(out.rows.is_empty());
        assert_eq!(out.header.len(), 16);
    }
}
