//! Aggregation pipeline for the case dashboard.
//!
//! Four pure query operations turn a loaded [`Dataset`] into summary tables:
//!
//! - [`count_by_category`]: records per value of one field
//! - [`count_by_two_categories`]: records per observed pair of two fields
//! - [`count_conditional`]: per-condition counts within a [`RowFilter`]
//! - [`bucket_midpoints`]: numeric midpoints of age-bucket boundaries
//!
//! None of them mutate the dataset; calling one twice with the same
//! arguments yields identical tables. The [`view`] module composes them into
//! the summary and chart views rendered by the dashboard.
//!
//! [`Dataset`]: covid_ingest::Dataset

pub mod binning;
pub mod conditional;
pub mod counts;
pub mod error;
pub mod filter;
pub mod metrics;
pub mod view;

pub use binning::{DEFAULT_AGE_BOUNDARIES, HistogramBin, align_midpoints, bucket_midpoints};
pub use conditional::count_conditional;
pub use counts::{count_by_category, count_by_two_categories};
pub use error::{AggregateError, Result};
pub use filter::{AllRecords, FieldEquals, FieldPresent, Predicate, RowFilter, deceased, icu_admitted};
pub use metrics::DatasetMetrics;
pub use view::{ChartPanel, ChartTab, ChartView, DeathSummary, SummaryView};
