//! Error types for aggregation.

use thiserror::Error;

use covid_ingest::SchemaError;

#[derive(Debug, Error)]
pub enum AggregateError {
    /// A requested field is not in the dataset.
    #[error(transparent)]
    Schema(#[from] SchemaError),

    /// Failed DataFrame operation.
    #[error("DataFrame operation failed: {message}")]
    DataFrame { message: String },

    /// A row filter produced a mask of the wrong length.
    #[error("filter '{filter}' produced {found} rows, expected {expected}")]
    MaskLength {
        filter: String,
        expected: usize,
        found: usize,
    },

    /// Bucket boundaries are not a strictly ascending list of at least two finite numbers.
    #[error("invalid bucket boundaries: {reason}")]
    InvalidBoundaries { reason: String },

    /// Bucket labels and midpoints cannot be paired one to one.
    #[error("{labels} age-group labels cannot be aligned with {buckets} buckets")]
    BucketCountMismatch { labels: usize, buckets: usize },

    /// A bucket label does not start at its bucket's lower boundary.
    #[error("age group '{label}' does not start at bucket boundary {expected}")]
    BucketLabelMismatch { label: String, expected: f64 },
}

impl From<polars::prelude::PolarsError> for AggregateError {
    fn from(err: polars::prelude::PolarsError) -> Self {
        Self::DataFrame {
            message: err.to_string(),
        }
    }
}

/// Result type for aggregation operations.
pub type Result<T> = std::result::Result<T, AggregateError>;
