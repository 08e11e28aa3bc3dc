//! Dataset size metrics.

use serde::Serialize;

use covid_ingest::Dataset;

/// Size of a dataset, with records and cells kept distinct.
///
/// `record_count` is the number of cases. `cell_count` is records times
/// columns and is not a case count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DatasetMetrics {
    pub record_count: u64,
    pub column_count: u64,
    pub cell_count: u64,
}

impl DatasetMetrics {
    pub fn of(dataset: &Dataset) -> Self {
        Self {
            record_count: dataset.record_count() as u64,
            column_count: dataset.column_count() as u64,
            cell_count: dataset.cell_count(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::prelude::*;

    #[test]
    fn cell_count_is_not_record_count() {
        let dataset = Dataset::from_frame(
            df!(
                "sex" => ["FEMALE", "MALE"],
                "icu" => ["YES", "NO"],
                "copd" => ["NO", "NO"]
            )
            .unwrap(),
        )
        .unwrap();
        let metrics = DatasetMetrics::of(&dataset);
        assert_eq!(metrics.record_count, 2);
        assert_eq!(metrics.column_count, 3);
        assert_eq!(metrics.cell_count, 6);
    }
}
