//! CSV reading with encoding and delimiter auto-detection.
//!
//! Rows come back as plain string cells. No header is assumed and ragged
//! rows are kept as they are; shaping them is the normalizer's job.

pub mod writer;

use std::path::Path;

use csv::ReaderBuilder;

use crate::error::{CsvError, CsvResult};

pub use writer::write_csv;

const UTF8_BOM: &[u8] = &[0xEF, 0xBB, 0xBF];

/// A decoded table with the settings used to read it
#[derive(Debug, Clone)]
pub struct Table {
    pub rows: Vec<Vec<String>>,
    /// Detected or used encoding
    pub encoding: String,
    /// Detected or used delimiter
    pub delimiter: char,
}

/// Detect the encoding of raw bytes.
///
/// Valid UTF-8 wins outright; otherwise chardet decides.
pub fn detect_encoding(bytes: &[u8]) -> String {
    if std::str::from_utf8(bytes).is_ok() {
        return "utf-8".to_string();
    }

    let charset = chardet::detect(bytes).0;
    match charset.to_lowercase().as_str() {
        "ascii" | "utf-8" | "utf8" | "utf-8-sig" => "utf-8".to_string(),
        "shift_jis" | "sjis" | "cp932" | "windows-31j" => "shift_jis".to_string(),
        "euc-jp" | "eucjp" => "euc-jp".to_string(),
        "iso-8859-1" | "iso-8859-15" | "latin-1" | "latin1" => "iso-8859-1".to_string(),
        "windows-1252" | "cp1252" => "windows-1252".to_string(),
        _ => charset,
    }
}

/// Decode bytes with the given encoding label.
///
/// Unknown labels fall back to lossy UTF-8. A known encoding that hits
/// malformed sequences is an error.
pub fn decode_content(bytes: &[u8], encoding: &str) -> CsvResult<String> {
    let label = encoding.to_lowercase();
    if matches!(label.as_str(), "utf-8" | "utf8" | "ascii") {
        let body = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);
        return Ok(String::from_utf8_lossy(body).into_owned());
    }

    let Some(codec) = encoding_rs::Encoding::for_label(label.as_bytes()) else {
        return Ok(String::from_utf8_lossy(bytes).into_owned());
    };
    let (decoded, _, had_errors) = codec.decode(bytes);
    if had_errors {
        return Err(CsvError::Encoding(codec.name().to_string()));
    }
    Ok(decoded.into_owned())
}

/// Detect the delimiter by counting occurrences in the first line.
///
/// Falls back to `,` when no candidate appears.
pub fn detect_delimiter(content: &str) -> char {
    let first_line = content.lines().next().unwrap_or("");

    let separators = [',', ';', '\t', '|'];
    let mut best_sep = ',';
    let mut best_count = 0;

    for &sep in &separators {
        let count = first_line.matches(sep).count();
        if count > best_count {
            best_count = count;
            best_sep = sep;
        }
    }

    best_sep
}

/// Split CSV text into rows of cells.
///
/// A blank line outside a quoted field is kept as an empty row. The `csv`
/// reader drops such lines, so the text is read in chunks between them.
pub fn parse_rows(content: &str, delimiter: char) -> CsvResult<Vec<Vec<String>>> {
    let delimiter_byte = u8::try_from(delimiter).map_err(|_| CsvError::Parse {
        line: 0,
        message: format!("delimiter '{delimiter}' is not a single-byte character"),
    })?;

    let mut rows = Vec::new();
    let mut chunk_start = 0;
    let mut chunk_line = 1;
    let mut offset = 0;
    let mut in_quotes = false;

    for (line_no, line) in (1u64..).zip(content.split_inclusive('\n')) {
        let end = offset + line.len();
        if !in_quotes && line.trim_end_matches(['\r', '\n']).is_empty() {
            read_records(&content[chunk_start..offset], delimiter_byte, chunk_line, &mut rows)?;
            rows.push(Vec::new());
            chunk_start = end;
            chunk_line = line_no + 1;
        } else if line.matches('"').count() % 2 == 1 {
            in_quotes = !in_quotes;
        }
        offset = end;
    }
    read_records(&content[chunk_start..], delimiter_byte, chunk_line, &mut rows)?;

    Ok(rows)
}

fn read_records(
    chunk: &str,
    delimiter: u8,
    first_line: u64,
    rows: &mut Vec<Vec<String>>,
) -> CsvResult<()> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .delimiter(delimiter)
        .from_reader(chunk.as_bytes());

    for result in reader.records() {
        let record = result.map_err(|e| CsvError::Parse {
            line: e
                .position()
                .map(|p| first_line + p.line().saturating_sub(1))
                .unwrap_or(0),
            message: e.to_string(),
        })?;
        rows.push(record.iter().map(str::to_string).collect());
    }
    Ok(())
}

/// Decode bytes and split them into rows.
pub fn parse_bytes(bytes: &[u8], delimiter: Option<char>) -> CsvResult<Table> {
    let encoding = detect_encoding(bytes);
    let content = decode_content(bytes, &encoding)?;
    let delimiter = delimiter.unwrap_or_else(|| detect_delimiter(&content));
    let rows = parse_rows(&content, delimiter)?;

    Ok(Table {
        rows,
        encoding,
        delimiter,
    })
}

/// Read a CSV file, detecting encoding and (unless given) the delimiter.
pub fn read_table<P: AsRef<Path>>(path: P, delimiter: Option<char>) -> CsvResult<Table> {
    let path = path.as_ref();
    let bytes = std::fs::read(path).map_err(|e| CsvError::io(path, e))?;
    parse_bytes(&bytes, delimiter)
}
