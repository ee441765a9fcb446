//! Schedule row shaping: fixed width and header detection.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::config::HeaderMode;

/// Fixture columns every schedule row is padded or truncated to
pub const SCHEDULE_COLUMNS: &[&str] = &[
    "year",
    "category",
    "term",
    "date",
    "kickoffdate",
    "homeTeam",
    "score",
    "awayTeam",
    "stadiumName",
    "visitors",
    "other",
];

/// Required width of a normalized schedule row
pub const MIN_WIDTH: usize = 11;

/// Index of the competition name within a schedule row
pub const CATEGORY_IDX: usize = 1;

// Digits with date, time, score and thousands separators.
static NUMERIC_CELL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9\-/:.,+ ]*[0-9][0-9\-/:.,+ ]*$").expect("valid regex"));

/// Whether a cell looks like a number, date, time or score
pub fn is_numeric_like(cell: &str) -> bool {
    let trimmed = cell.trim();
    !trimmed.is_empty() && NUMERIC_CELL.is_match(trimmed)
}

/// Pad with empty cells or truncate to exactly `width` cells
pub fn normalize_row(mut row: Vec<String>, width: usize) -> Vec<String> {
    row.resize(width, String::new());
    row
}

/// Whether the first row is a header.
///
/// A row is a header when at least half of its non-empty cells are known
/// column names, or when every column that is numeric in the second row holds
/// a non-empty, non-numeric cell in the first.
pub fn looks_like_header(first: &[String], second: Option<&[String]>) -> bool {
    let filled: Vec<&str> = first
        .iter()
        .map(|c| c.trim())
        .filter(|c| !c.is_empty())
        .collect();
    if filled.is_empty() {
        return false;
    }

    let known = filled
        .iter()
        .filter(|cell| {
            SCHEDULE_COLUMNS
                .iter()
                .any(|col| col.eq_ignore_ascii_case(cell))
        })
        .count();
    if known * 2 >= filled.len() {
        return true;
    }

    let Some(second) = second else {
        return false;
    };
    let mut numeric_below = second
        .iter()
        .enumerate()
        .filter(|(_, below)| is_numeric_like(below))
        .map(|(idx, _)| first.get(idx).map(|top| top.trim()).unwrap_or(""))
        .peekable();
    numeric_below.peek().is_some()
        && numeric_below.all(|top| !top.is_empty() && !is_numeric_like(top))
}

/// Split off the header row according to `mode`.
///
/// Returns whether a header was dropped, and the data rows.
pub fn split_header(mut rows: Vec<Vec<String>>, mode: HeaderMode) -> (bool, Vec<Vec<String>>) {
    let has_header = match mode {
        HeaderMode::Present => !rows.is_empty(),
        HeaderMode::Absent => false,
        HeaderMode::Auto => match rows.first() {
            Some(first) => looks_like_header(first, rows.get(1).map(Vec::as_slice)),
            None => false,
        },
    };

    if has_header {
        rows.remove(0);
    }
    (has_header, rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(cells: &[&str]) -> Vec<String> {
        cells.iter().map(|c| c.to_string()).collect()
    }

    fn fixture() -> Vec<String> {
        row(&[
            "2024", "J1", "第1節第1日", "02/24(土)", "14:00", "鹿島", "2-1", "浦和",
            "県立カシマサッカースタジアム", "35,000", "",
        ])
    }

    #[test]
    fn test_numeric_like() {
        for cell in ["2024", "02/24", "14:00", "2-1", "35,000", " 7 ", "+3", "1.5"] {
            assert!(is_numeric_like(cell), "{cell}");
        }
        for cell in ["", "  ", "J1", "鹿島", "year", "-", "02/24(土)", "vs"] {
            assert!(!is_numeric_like(cell), "{cell}");
        }
    }

    #[test]
    fn test_short_row_padded() {
        let padded = normalize_row(row(&["2024", "J1"]), MIN_WIDTH);
        assert_eq!(padded.len(), MIN_WIDTH);
        assert_eq!(padded[1], "J1");
        assert!(padded[2..].iter().all(String::is_empty));
    }

    #[test]
    fn test_long_row_truncated() {
        let mut long = fixture();
        long.extend(row(&["999", "888", "777"]));
        let trimmed = normalize_row(long, MIN_WIDTH);
        assert_eq!(trimmed, fixture());
    }

    #[test]
    fn test_empty_row_padded() {
        assert_eq!(normalize_row(Vec::new(), 3), row(&["", "", ""]));
    }

    #[test]
    fn test_known_column_names_are_header() {
        let header = row(&SCHEDULE_COLUMNS[..]);
        assert!(looks_like_header(&header, None));
        assert!(looks_like_header(&row(&["YEAR", "Category", "x"]), None));
    }

    #[test]
    fn test_type_change_below_is_header() {
        let header = row(&[
            "年", "大会", "節", "試合日", "K/O時刻", "ホーム", "スコア", "アウェイ", "スタジアム",
            "入場者数", "備考",
        ]);
        assert!(looks_like_header(&header, Some(&fixture())));
    }

    #[test]
    fn test_short_text_row_is_not_header() {
        assert!(!looks_like_header(&row(&["note"]), Some(&fixture())));
        assert!(!looks_like_header(&row(&["2024年", "J1"]), Some(&fixture())));
    }

    #[test]
    fn test_short_text_row_kept_in_auto_mode() {
        let rows = vec![row(&["note"]), fixture()];
        let (dropped, data) = split_header(rows, HeaderMode::Auto);
        assert!(!dropped);
        assert_eq!(data.len(), 2);
    }

    #[test]
    fn test_fixture_row_is_not_header() {
        let mut second = fixture();
        second[0] = "2025".into();
        assert!(!looks_like_header(&fixture(), Some(&second)));
        assert!(!looks_like_header(&fixture(), None));
    }

    #[test]
    fn test_text_in_numeric_column_is_not_header() {
        let mut first = fixture();
        first[6] = "中止".into();
        first[9] = "-".into();
        assert!(!looks_like_header(&first, Some(&fixture())));
    }

    #[test]
    fn test_blank_first_row_is_not_header() {
        assert!(!looks_like_header(&row(&["", " "]), Some(&fixture())));
    }

    #[test]
    fn test_split_header_modes() {
        let rows = vec![fixture(), fixture()];

        let (dropped, data) = split_header(rows.clone(), HeaderMode::Present);
        assert!(dropped);
        assert_eq!(data.len(), 1);

        let (dropped, data) = split_header(rows.clone(), HeaderMode::Absent);
        assert!(!dropped);
        assert_eq!(data.len(), 2);

        let (dropped, data) = split_header(rows, HeaderMode::Auto);
        assert!(!dropped);
        assert_eq!(data.len(), 2);
    }

    #[test]
    fn test_split_header_auto_detects() {
        let rows = vec![row(&SCHEDULE_COLUMNS[..]), fixture()];
        let (dropped, data) = split_header(rows, HeaderMode::Auto);
        assert!(dropped);
        assert_eq!(data, vec![fixture()]);
    }

    #[test]
    fn test_split_header_on_empty_table() {
        let (dropped, data) = split_header(Vec::new(), HeaderMode::Present);
        assert!(!dropped);
        assert!(data.is_empty());
    }
}
