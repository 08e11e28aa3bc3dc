//! Category and grouped counters.
//!
//! Both counters run a Polars `group_by` over the requested columns, cast to
//! text, with null keys filtered out first. A record with a null in any
//! requested field is therefore excluded from that count, while every
//! non-null value (including values such as `UNKNOWN`) is its own category.

use polars::prelude::*;
use tracing::{debug, debug_span, warn};

use covid_ingest::Dataset;
use covid_model::{CategoryCount, GroupedCount};

use crate::error::Result;

const KEY_A: &str = "__key_a";
const KEY_B: &str = "__key_b";
const COUNT: &str = "__count";

/// Counts records per distinct non-null value of `field`.
///
/// The table is in lexical order; use [`CategoryCount::sorted`] for another
/// display order. Values absent from the dataset are omitted.
pub fn count_by_category(dataset: &Dataset, field: &str) -> Result<CategoryCount> {
    let column = dataset.resolve_column(field)?;
    let span = debug_span!("count_by_category", field = column);
    let _guard = span.enter();

    let grouped = dataset
        .frame()
        .clone()
        .lazy()
        .select([col(column).cast(DataType::String).alias(KEY_A)])
        .filter(col(KEY_A).is_not_null())
        .group_by([col(KEY_A)])
        .agg([len().alias(COUNT)])
        .collect()?;

    let keys = grouped.column(KEY_A)?.str()?;
    let counts = grouped.column(COUNT)?.cast(&DataType::UInt64)?;
    let counts = counts.as_materialized_series().u64()?;
    let table = CategoryCount::new(
        column,
        keys.into_iter()
            .zip(counts.into_iter())
            .filter_map(|(key, count)| Some((key?, count?))),
    );

    if table.is_empty() {
        warn!(field = column, "no records to count");
    } else {
        debug!(field = column, categories = table.len(), "category count complete");
    }
    Ok(table)
}

/// Counts records per observed `(field_a, field_b)` pair.
///
/// Records with a null in either field are excluded. Pairs with no records
/// are absent; [`GroupedCount::dense_grid`] zero-fills them.
pub fn count_by_two_categories(
    dataset: &Dataset,
    field_a: &str,
    field_b: &str,
) -> Result<GroupedCount> {
    let column_a = dataset.resolve_column(field_a)?;
    let column_b = dataset.resolve_column(field_b)?;
    let span = debug_span!("count_by_two_categories", field_a = column_a, field_b = column_b);
    let _guard = span.enter();

    let grouped = dataset
        .frame()
        .clone()
        .lazy()
        .select([
            col(column_a).cast(DataType::String).alias(KEY_A),
            col(column_b).cast(DataType::String).alias(KEY_B),
        ])
        .filter(col(KEY_A).is_not_null().and(col(KEY_B).is_not_null()))
        .group_by([col(KEY_A), col(KEY_B)])
        .agg([len().alias(COUNT)])
        .collect()?;

    let keys_a = grouped.column(KEY_A)?.str()?;
    let keys_b = grouped.column(KEY_B)?.str()?;
    let counts = grouped.column(COUNT)?.cast(&DataType::UInt64)?;
    let counts = counts.as_materialized_series().u64()?;
    let table = GroupedCount::new(
        column_a,
        column_b,
        keys_a
            .into_iter()
            .zip(keys_b.into_iter())
            .zip(counts.into_iter())
            .filter_map(|((a, b), count)| Some(((a?, b?), count?))),
    );

    if table.is_empty() {
        warn!(field_a = column_a, field_b = column_b, "no records to count");
    } else {
        debug!(
            field_a = column_a,
            field_b = column_b,
            pairs = table.len(),
            "grouped count complete"
        );
    }
    Ok(table)
}
