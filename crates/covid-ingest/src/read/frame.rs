//! Body reading with Polars.

use std::path::Path;

use polars::prelude::*;

use crate::error::{LoadError, Result};

use super::header::CsvHeaders;

/// Reads a delimited file into a DataFrame with every column as text.
///
/// Empty and whitespace-only fields, quoted or not, become nulls. Columns
/// are renamed to the normalized `headers`, which must have been read from
/// the same file. Rows with more fields than the header fail as
/// [`LoadError::CsvParse`].
pub fn read_frame(path: &Path, headers: &CsvHeaders, delimiter: u8) -> Result<DataFrame> {
    let parse_error = |e: PolarsError| LoadError::CsvParse {
        path: path.to_path_buf(),
        message: e.to_string(),
    };
    let mut df = CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(Some(0))
        .map_parse_options(|options| options.with_separator(delimiter))
        .try_into_reader_with_file_path(Some(path.to_path_buf()))
        .map_err(parse_error)?
        .finish()
        .map_err(parse_error)?;

    df.set_column_names(headers.columns.iter().map(String::as_str))
        .map_err(parse_error)?;
    blanks_to_null(&df).map_err(parse_error)
}

/// Replaces blank cells with nulls so missing values are never counted as
/// a category.
fn blanks_to_null(df: &DataFrame) -> PolarsResult<DataFrame> {
    let columns = df
        .get_columns()
        .iter()
        .map(|column| {
            let cleaned: StringChunked = column
                .str()?
                .iter()
                .map(|value| value.filter(|v| !v.trim().is_empty()))
                .collect();
            Ok(cleaned.with_name(column.name().clone()).into_column())
        })
        .collect::<PolarsResult<Vec<Column>>>()?;
    DataFrame::new(columns)
}
