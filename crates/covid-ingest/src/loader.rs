//! Dataset loading entry point.

use std::path::Path;
use std::time::Instant;

use tracing::{debug, info, info_span};

use crate::dataset::Dataset;
use crate::error::{LoadError, Result};
use crate::options::LoadOptions;
use crate::read::{read_frame, read_headers};

/// Loads a delimited file into a [`Dataset`].
///
/// Headers are normalized to canonical upper case before the required column
/// check, so `sex` in the file satisfies a `SEX` requirement. Every missing
/// required column is reported at once.
pub fn load_dataset(path: &Path, options: &LoadOptions) -> Result<Dataset> {
    let span = info_span!("load_dataset", path = %path.display());
    let _guard = span.enter();
    let start = Instant::now();

    let metadata = std::fs::metadata(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            LoadError::FileNotFound {
                path: path.to_path_buf(),
            }
        } else {
            LoadError::FileRead {
                path: path.to_path_buf(),
                source: e,
            }
        }
    })?;
    if metadata.is_dir() {
        return Err(LoadError::FileRead {
            path: path.to_path_buf(),
            source: std::io::Error::other("path is a directory"),
        });
    }

    let headers = read_headers(path, options.delimiter)?;
    debug!(raw = ?headers.raw, columns = ?headers.columns, "normalized headers");

    let missing: Vec<String> = options
        .required_columns
        .iter()
        .filter(|column| !headers.contains(column))
        .cloned()
        .collect();
    if !missing.is_empty() {
        return Err(LoadError::MissingColumns {
            path: path.to_path_buf(),
            columns: missing,
        });
    }

    let frame = read_frame(path, &headers, options.delimiter)?;
    let dataset = Dataset::from_parts(frame, Some(path.to_path_buf()));
    info!(
        rows = dataset.record_count(),
        columns = dataset.column_count(),
        duration_ms = start.elapsed().as_millis(),
        "dataset loaded"
    );
    Ok(dataset)
}
