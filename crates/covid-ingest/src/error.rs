//! Error types for dataset loading and column access.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that make a dataset impossible to load.
#[derive(Debug, Error)]
pub enum LoadError {
    // === File System Errors ===
    /// CSV file not found.
    #[error("CSV file not found: {path}")]
    FileNotFound { path: PathBuf },

    /// Failed to read file.
    #[error("failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // === CSV Structure Errors ===
    /// Failed to parse CSV.
    #[error("failed to parse CSV {path}: {message}")]
    CsvParse { path: PathBuf, message: String },

    /// CSV file has no header row.
    #[error("CSV file is empty: {path}")]
    EmptyCsv { path: PathBuf },

    /// A header cell is blank.
    #[error("empty column name at position {position} in {path}")]
    EmptyColumnName { path: PathBuf, position: usize },

    /// Two headers normalize to the same column name.
    #[error("duplicate column '{column}' in {path}")]
    DuplicateColumn { column: String, path: PathBuf },

    // === Schema Errors ===
    /// Required columns are absent from the header.
    #[error("missing required columns in {path}: {}", .columns.join(", "))]
    MissingColumns { path: PathBuf, columns: Vec<String> },
}

/// A requested field does not exist in a loaded dataset.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SchemaError {
    /// Column not found in the dataset.
    #[error("column '{column}' not found in dataset")]
    ColumnNotFound { column: String },

    /// Column exists but cannot be read as text.
    #[error("column '{column}' cannot be read as text: {message}")]
    ColumnType { column: String, message: String },
}

/// Result type for loading operations.
pub type Result<T> = std::result::Result<T, LoadError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = LoadError::FileNotFound {
            path: PathBuf::from("/path/to/analysis.csv"),
        };
        assert_eq!(err.to_string(), "CSV file not found: /path/to/analysis.csv");
    }

    #[test]
    fn test_missing_columns_lists_every_name() {
        let err = LoadError::MissingColumns {
            path: PathBuf::from("analysis.csv"),
            columns: vec!["ICU".to_string(), "SEX".to_string()],
        };
        assert_eq!(
            err.to_string(),
            "missing required columns in analysis.csv: ICU, SEX"
        );
    }

    #[test]
    fn test_schema_error_display() {
        let err = SchemaError::ColumnNotFound {
            column: "nonexistent_field".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "column 'nonexistent_field' not found in dataset"
        );
    }
}
