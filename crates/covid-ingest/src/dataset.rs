//! The loaded case dataset.

use std::path::{Path, PathBuf};

use polars::prelude::*;

use covid_model::{CaseInsensitiveSet, canonical_column_name};

use crate::error::{LoadError, SchemaError};
use crate::polars_utils::any_to_string;
use crate::read::header::normalize_headers;

/// An owned, read-only table of case records.
///
/// Column names are canonical (upper case). Field lookups go through
/// [`Dataset::resolve_column`], which accepts any case and fails with
/// [`SchemaError`] for unknown names.
#[derive(Debug, Clone)]
pub struct Dataset {
    frame: DataFrame,
    source: Option<PathBuf>,
    columns: CaseInsensitiveSet,
}

impl Dataset {
    /// Wraps a frame whose column names are already canonical.
    pub(crate) fn from_parts(frame: DataFrame, source: Option<PathBuf>) -> Self {
        let columns = CaseInsensitiveSet::new(frame.get_column_names());
        Self {
            frame,
            source,
            columns,
        }
    }

    /// Wraps an in-memory frame, normalizing its column names.
    pub fn from_frame(mut frame: DataFrame) -> Result<Self, LoadError> {
        let raw: Vec<String> = frame
            .get_column_names()
            .into_iter()
            .map(|name| name.to_string())
            .collect();
        let path = Path::new("<memory>");
        let headers = normalize_headers(path, &raw)?;
        if headers.columns != raw {
            frame
                .set_column_names(headers.columns.iter().map(String::as_str))
                .map_err(|e| LoadError::CsvParse {
                    path: path.to_path_buf(),
                    message: e.to_string(),
                })?;
        }
        Ok(Self::from_parts(frame, None))
    }

    pub fn frame(&self) -> &DataFrame {
        &self.frame
    }

    /// File the dataset was loaded from, if any.
    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    /// Number of records (rows).
    pub fn record_count(&self) -> usize {
        self.frame.height()
    }

    /// Number of columns.
    pub fn column_count(&self) -> usize {
        self.frame.width()
    }

    /// Number of cells (rows × columns).
    pub fn cell_count(&self) -> u64 {
        self.frame.height() as u64 * self.frame.width() as u64
    }

    pub fn is_empty(&self) -> bool {
        self.frame.height() == 0
    }

    pub fn column_names(&self) -> Vec<String> {
        self.frame
            .get_column_names()
            .into_iter()
            .map(|name| name.to_string())
            .collect()
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.columns.contains(&canonical_column_name(name))
    }

    /// Resolves a field name, in any case, to the dataset's column name.
    pub fn resolve_column(&self, name: &str) -> Result<&str, SchemaError> {
        self.columns
            .get(&canonical_column_name(name))
            .ok_or_else(|| SchemaError::ColumnNotFound {
                column: name.to_string(),
            })
    }

    /// Checks that every name resolves; reports the first that does not.
    pub fn require_columns<S: AsRef<str>>(&self, names: &[S]) -> Result<(), SchemaError> {
        for name in names {
            self.resolve_column(name.as_ref())?;
        }
        Ok(())
    }

    /// Returns a column as text, casting non-string columns.
    pub fn string_column(&self, name: &str) -> Result<StringChunked, SchemaError> {
        let resolved = self.resolve_column(name)?;
        let type_error = |e: PolarsError| SchemaError::ColumnType {
            column: resolved.to_string(),
            message: e.to_string(),
        };
        let column = self.frame.column(resolved).map_err(type_error)?;
        let text = column.cast(&DataType::String).map_err(type_error)?;
        let chunked = text.str().map_err(type_error)?;
        Ok(chunked.clone())
    }

    /// First `limit` records rendered as text, one `Vec` per row.
    pub fn preview_rows(&self, limit: usize) -> Vec<Vec<String>> {
        let head = self.frame.head(Some(limit));
        (0..head.height())
            .map(|idx| {
                head.get_columns()
                    .iter()
                    .map(|column| column.get(idx).map(any_to_string).unwrap_or_default())
                    .collect()
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Dataset {
        let frame = df!(
            "sex" => ["FEMALE", "MALE", "FEMALE"],
            "Icu" => ["YES", "YES", "NO"],
            "diabetes" => ["YES", "NO", "YES"]
        )
        .unwrap();
        Dataset::from_frame(frame).unwrap()
    }

    #[test]
    fn from_frame_normalizes_names() {
        let dataset = sample();
        assert_eq!(dataset.column_names(), vec!["SEX", "ICU", "DIABETES"]);
        assert_eq!(dataset.record_count(), 3);
        assert_eq!(dataset.cell_count(), 9);
        assert!(dataset.source().is_none());
    }

    #[test]
    fn resolve_column_ignores_case() {
        let dataset = sample();
        assert_eq!(dataset.resolve_column("sex"), Ok("SEX"));
        assert_eq!(dataset.resolve_column("Diabetes"), Ok("DIABETES"));
        assert_eq!(
            dataset.resolve_column("nonexistent_field"),
            Err(SchemaError::ColumnNotFound {
                column: "nonexistent_field".to_string()
            })
        );
    }

    #[test]
    fn string_column_casts_numbers() {
        let frame = df!("age" => [30i64, 41]).unwrap();
        let dataset = Dataset::from_frame(frame).unwrap();
        let column = dataset.string_column("AGE").unwrap();
        assert_eq!(column.get(0), Some("30"));
    }

    #[test]
    fn preview_rows_limits_output() {
        let dataset = sample();
        let rows = dataset.preview_rows(2);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0], vec!["FEMALE", "YES", "YES"]);
    }
}
