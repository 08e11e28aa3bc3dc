//! Header row reading and normalization.

use std::collections::BTreeSet;
use std::path::Path;

use covid_model::canonical_column_name;

use crate::error::{LoadError, Result};

/// Header row of a delimited file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvHeaders {
    /// Headers exactly as written, without a BOM.
    pub raw: Vec<String>,
    /// Canonical upper-case column names, position for position.
    pub columns: Vec<String>,
}

impl CsvHeaders {
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn contains(&self, column: &str) -> bool {
        self.columns.iter().any(|c| c == column)
    }
}

/// Normalizes raw header cells, rejecting blank and duplicate names.
pub fn normalize_headers<S: AsRef<str>>(path: &Path, raw: &[S]) -> Result<CsvHeaders> {
    let mut seen = BTreeSet::new();
    let mut columns = Vec::with_capacity(raw.len());
    for (position, cell) in raw.iter().enumerate() {
        let column = canonical_column_name(cell.as_ref());
        if column.is_empty() {
            return Err(LoadError::EmptyColumnName {
                path: path.to_path_buf(),
                position,
            });
        }
        if !seen.insert(column.clone()) {
            return Err(LoadError::DuplicateColumn {
                column,
                path: path.to_path_buf(),
            });
        }
        columns.push(column);
    }
    Ok(CsvHeaders {
        raw: raw
            .iter()
            .map(|cell| cell.as_ref().trim_start_matches('\u{feff}').to_string())
            .collect(),
        columns,
    })
}

/// Reads and normalizes the first record of a delimited file.
pub fn read_headers(path: &Path, delimiter: u8) -> Result<CsvHeaders> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(true)
        .from_path(path)
        .map_err(|e| csv_error(path, &e))?;
    let record = reader.headers().map_err(|e| csv_error(path, &e))?;
    if record.is_empty() || record.iter().all(|cell| cell.trim().is_empty()) {
        return Err(LoadError::EmptyCsv {
            path: path.to_path_buf(),
        });
    }
    let raw: Vec<&str> = record.iter().collect();
    normalize_headers(path, &raw)
}

fn csv_error(path: &Path, error: &csv::Error) -> LoadError {
    if let csv::ErrorKind::Io(io) = error.kind() {
        return LoadError::FileRead {
            path: path.to_path_buf(),
            source: std::io::Error::new(io.kind(), io.to_string()),
        };
    }
    LoadError::CsvParse {
        path: path.to_path_buf(),
        message: error.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn create_temp_csv(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{}", content).unwrap();
        file
    }

    #[test]
    fn test_read_headers_uppercases() {
        let file = create_temp_csv("sex,age_group,Icu\nFEMALE,30-39,NO\n");
        let headers = read_headers(file.path(), b',').unwrap();

        assert_eq!(headers.columns, vec!["SEX", "AGE_GROUP", "ICU"]);
        assert_eq!(headers.raw, vec!["sex", "age_group", "Icu"]);
    }

    #[test]
    fn test_read_headers_with_bom() {
        let file = create_temp_csv("\u{feff}sex,icu\nMALE,YES\n");
        let headers = read_headers(file.path(), b',').unwrap();

        assert_eq!(headers.columns, vec!["SEX", "ICU"]);
    }

    #[test]
    fn test_read_headers_semicolon() {
        let file = create_temp_csv("sex;icu\nMALE;YES\n");
        let headers = read_headers(file.path(), b';').unwrap();

        assert_eq!(headers.columns, vec!["SEX", "ICU"]);
    }

    #[test]
    fn test_read_headers_empty_file() {
        let file = create_temp_csv("");
        let result = read_headers(file.path(), b',');

        assert!(matches!(result, Err(LoadError::EmptyCsv { .. })));
    }

    #[test]
    fn test_duplicate_after_normalization() {
        let file = create_temp_csv("sex,SEX\nMALE,MALE\n");
        let result = read_headers(file.path(), b',');

        assert!(matches!(
            result,
            Err(LoadError::DuplicateColumn { column, .. }) if column == "SEX"
        ));
    }

    #[test]
    fn test_blank_header_cell() {
        let file = create_temp_csv("sex,,icu\nMALE,x,YES\n");
        let result = read_headers(file.path(), b',');

        assert!(matches!(
            result,
            Err(LoadError::EmptyColumnName { position: 1, .. })
        ));
    }
}
