//! Comma-separated output.

use std::fs;
use std::io::Write;
use std::path::Path;

use csv::WriterBuilder;

use crate::error::{CsvError, CsvResult};

/// Write `header` followed by `rows` to any writer.
pub fn write_rows<W: Write>(sink: W, header: &[&str], rows: &[Vec<String>]) -> CsvResult<()> {
    let mut writer = WriterBuilder::new()
        .has_headers(false)
        .flexible(false)
        .from_writer(sink);

    writer.write_record(header)?;
    for row in rows {
        writer.write_record(row)?;
    }
    writer
        .flush()
        .map_err(|e| CsvError::Write(csv::Error::from(e)))?;
    Ok(())
}

/// Write a CSV file, creating its parent directory when missing.
pub fn write_csv(path: &Path, header: &[&str], rows: &[Vec<String>]) -> CsvResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| CsvError::io(parent, e))?;
    }
    let file = fs::File::create(path).map_err(|e| CsvError::io(path, e))?;
    write_rows(file, header, rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_then_rows() {
        let mut buf = Vec::new();
        let rows = vec![vec!["1".to_string(), "Kashima, Ibaraki".to_string()]];
        write_rows(&mut buf, &["id", "name"], &rows).unwrap();

        let text = String::from_utf8(buf).unwrap();
        assert_eq!(text, "id,name\n1,\"Kashima, Ibaraki\"\n");
    }

    #[test]
    fn test_creates_parent_directory() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/out/schedule.csv");

        write_csv(&path, &["a"], &[vec!["x".to_string()]]).unwrap();

        let text = fs::read_to_string(&path).unwrap();
        assert_eq!(text, "a\nx\n");
    }
}
