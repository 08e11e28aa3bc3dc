//! View models composed from the aggregation operations.
//!
//! Each view is computed from one dataset in a single call and owns its
//! tables; nothing is shared between views.

mod charts;
mod summary;

pub use charts::{ChartPanel, ChartTab, ChartView};
pub use summary::{DeathSummary, SummaryView};
