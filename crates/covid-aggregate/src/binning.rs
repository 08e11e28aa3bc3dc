//! Age-bucket midpoints for histogram rendering.
//!
//! The dataset stores pre-bucketed age-group labels, not raw ages. These
//! helpers only relabel an age-group count with numeric bucket midpoints;
//! they never re-bucket records.

use serde::Serialize;
use tracing::warn;

use covid_model::{AgeGroup, CategoryCount, CategoryOrder};

use crate::error::{AggregateError, Result};

/// Ten-year bucket boundaries from 0 to 100.
pub const DEFAULT_AGE_BOUNDARIES: [f64; 11] = [
    0.0, 10.0, 20.0, 30.0, 40.0, 50.0, 60.0, 70.0, 80.0, 90.0, 100.0,
];

/// Returns the midpoint of each consecutive pair of boundaries.
///
/// `[0, 10, ..., 100]` yields `[5, 15, ..., 95]`.
pub fn bucket_midpoints(boundaries: &[f64]) -> Result<Vec<f64>> {
    if boundaries.len() < 2 {
        return Err(AggregateError::InvalidBoundaries {
            reason: format!("need at least 2 boundaries, got {}", boundaries.len()),
        });
    }
    if let Some(value) = boundaries.iter().find(|value| !value.is_finite()) {
        return Err(AggregateError::InvalidBoundaries {
            reason: format!("boundary {value} is not finite"),
        });
    }
    if let Some(pair) = boundaries.windows(2).find(|pair| pair[0] >= pair[1]) {
        return Err(AggregateError::InvalidBoundaries {
            reason: format!("boundaries must ascend strictly ({} >= {})", pair[0], pair[1]),
        });
    }
    Ok(boundaries
        .windows(2)
        .map(|pair| (pair[0] + pair[1]) / 2.0)
        .collect())
}

/// One histogram bar: an age bucket and its record count.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistogramBin {
    pub label: String,
    pub lower: f64,
    pub upper: f64,
    pub midpoint: f64,
    pub count: u64,
}

/// Pairs an age-group count with the buckets defined by `boundaries`.
///
/// Labels are sorted by lower bound and matched to buckets by position.
/// The number of labels must equal the number of buckets, and each label's
/// lower bound must equal its bucket's lower boundary; otherwise the
/// mismatch is returned as an error rather than a misaligned histogram.
pub fn align_midpoints(counts: &CategoryCount, boundaries: &[f64]) -> Result<Vec<HistogramBin>> {
    let midpoints = bucket_midpoints(boundaries)?;
    let sorted = counts.sorted(CategoryOrder::AgeBucket);
    if sorted.len() != midpoints.len() {
        warn!(
            labels = sorted.len(),
            buckets = midpoints.len(),
            "age groups do not match histogram buckets"
        );
        return Err(AggregateError::BucketCountMismatch {
            labels: sorted.len(),
            buckets: midpoints.len(),
        });
    }

    sorted
        .iter()
        .zip(midpoints)
        .enumerate()
        .map(|(idx, ((label, count), midpoint))| {
            let lower = boundaries[idx];
            let parsed = AgeGroup::parse(label).lower_bound().map(f64::from);
            if parsed != Some(lower) {
                return Err(AggregateError::BucketLabelMismatch {
                    label: label.to_string(),
                    expected: lower,
                });
            }
            Ok(HistogramBin {
                label: label.to_string(),
                lower,
                upper: boundaries[idx + 1],
                midpoint,
                count,
            })
        })
        .collect()
}
