//! Conditional counter: condition prevalence within a filtered subset.

use polars::prelude::ChunkCompareEq;
use tracing::{debug, debug_span, warn};

use covid_ingest::Dataset;
use covid_model::{ConditionalCount, POSITIVE_FLAG};

use crate::error::{AggregateError, Result};
use crate::filter::RowFilter;

/// Counts, for each condition field, the records that pass `filter` and have
/// that field set to `YES`.
///
/// The output follows `conditions` exactly, in order and spelling. Every
/// condition field is resolved before any counting, so an unknown name fails
/// the whole call instead of producing a silent zero.
pub fn count_conditional<F, S>(
    dataset: &Dataset,
    filter: &F,
    conditions: &[S],
) -> Result<ConditionalCount>
where
    F: RowFilter + ?Sized,
    S: AsRef<str>,
{
    let description = filter.describe();
    let span = debug_span!("count_conditional", filter = %description);
    let _guard = span.enter();

    dataset.require_columns(conditions)?;

    let mask = filter.mask(dataset)?;
    if mask.len() != dataset.record_count() {
        return Err(AggregateError::MaskLength {
            filter: description,
            expected: dataset.record_count(),
            found: mask.len(),
        });
    }
    let filtered_total = mask.num_trues() as u64;

    let mut counts = Vec::with_capacity(conditions.len());
    for condition in conditions {
        let name = condition.as_ref();
        let positive = dataset.string_column(name)?.equal(POSITIVE_FLAG);
        let matched = &mask & &positive;
        counts.push((name.to_string(), matched.num_trues() as u64));
    }

    let table = ConditionalCount::new(description.clone(), filtered_total, counts);
    if filtered_total == 0 {
        warn!(filter = %description, "no records pass filter");
    } else {
        debug!(
            filter = %description,
            filtered_total,
            conditions = table.len(),
            "conditional count complete"
        );
    }
    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::{AllRecords, icu_admitted};
    use covid_ingest::SchemaError;
    use polars::prelude::*;

    fn sample() -> Dataset {
        Dataset::from_frame(
            df!(
                "sex" => ["FEMALE", "MALE", "FEMALE"],
                "icu" => ["YES", "YES", "NO"],
                "diabetes" => ["YES", "NO", "YES"],
                "asthma" => ["NO", "YES", "NO"]
            )
            .unwrap(),
        )
        .unwrap()
    }

    #[test]
    fn counts_within_filter() {
        let table = count_conditional(&sample(), &icu_admitted(), &["diabetes"]).unwrap();
        assert_eq!(table.iter().collect::<Vec<_>>(), vec![("diabetes", 1)]);
        assert_eq!(table.filtered_total, 2);
    }

    #[test]
    fn output_follows_input_order() {
        let table = count_conditional(&sample(), &AllRecords, &["ASTHMA", "DIABETES"]).unwrap();
        assert_eq!(table.conditions(), vec!["ASTHMA", "DIABETES"]);

        let reversed =
            count_conditional(&sample(), &AllRecords, &["DIABETES", "ASTHMA"]).unwrap();
        assert_eq!(reversed.conditions(), vec!["DIABETES", "ASTHMA"]);
        assert_eq!(reversed.get("DIABETES"), Some(2));
    }

    #[test]
    fn unknown_condition_is_schema_error() {
        let result = count_conditional(&sample(), &AllRecords, &["DIABETES", "GOUT"]);
        assert!(matches!(
            result,
            Err(AggregateError::Schema(SchemaError::ColumnNotFound { column })) if column == "GOUT"
        ));
    }

    #[test]
    fn mask_of_wrong_length_is_rejected() {
        let short = crate::filter::Predicate::new("short", |_: &Dataset| {
            Ok(BooleanChunked::from_slice("mask".into(), &[true]))
        });
        let result = count_conditional(&sample(), &short, &["DIABETES"]);
        assert!(matches!(result, Err(AggregateError::MaskLength { .. })));
    }
}
