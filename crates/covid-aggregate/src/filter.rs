//! Row filters for the conditional counter.
//!
//! A filter turns a dataset into a boolean mask, one entry per record.
//! Filters are plain values so they can be built, described, and tested
//! independently of the counting that consumes them.

use polars::prelude::*;

use covid_ingest::Dataset;
use covid_model::{DATE_OF_DEATH, ICU, POSITIVE_FLAG};

use crate::error::Result;

/// A row-level predicate over a [`Dataset`].
pub trait RowFilter {
    /// Returns a mask with one entry per record; `true` keeps the record.
    ///
    /// Null entries are treated as `false`.
    fn mask(&self, dataset: &Dataset) -> Result<BooleanChunked>;

    /// Short human readable description, e.g. `ICU == YES`.
    fn describe(&self) -> String;
}

/// Keeps every record.
#[derive(Debug, Clone, Copy, Default)]
pub struct AllRecords;

impl RowFilter for AllRecords {
    fn mask(&self, dataset: &Dataset) -> Result<BooleanChunked> {
        let keep = vec![true; dataset.record_count()];
        Ok(BooleanChunked::from_slice("mask".into(), &keep))
    }

    fn describe(&self) -> String {
        "all records".to_string()
    }
}

/// Keeps records whose `field` equals `value` exactly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldEquals {
    pub field: String,
    pub value: String,
}

impl FieldEquals {
    pub fn new(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            value: value.into(),
        }
    }
}

impl RowFilter for FieldEquals {
    fn mask(&self, dataset: &Dataset) -> Result<BooleanChunked> {
        let column = dataset.string_column(&self.field)?;
        Ok(column.equal(self.value.as_str()))
    }

    fn describe(&self) -> String {
        format!("{} == {}", self.field, self.value)
    }
}

/// Keeps records where `field` holds a non-blank value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldPresent {
    pub field: String,
}

impl FieldPresent {
    pub fn new(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
        }
    }
}

impl RowFilter for FieldPresent {
    fn mask(&self, dataset: &Dataset) -> Result<BooleanChunked> {
        let column = dataset.string_column(&self.field)?;
        let keep: Vec<bool> = column
            .iter()
            .map(|value| value.is_some_and(|v| !v.trim().is_empty()))
            .collect();
        Ok(BooleanChunked::from_slice("mask".into(), &keep))
    }

    fn describe(&self) -> String {
        format!("{} is present", self.field)
    }
}

/// A filter defined by a closure.
pub struct Predicate<F> {
    description: String,
    func: F,
}

impl<F> Predicate<F>
where
    F: Fn(&Dataset) -> Result<BooleanChunked>,
{
    pub fn new(description: impl Into<String>, func: F) -> Self {
        Self {
            description: description.into(),
            func,
        }
    }

    /// An unnamed closure filter, described as `custom`.
    pub fn custom(func: F) -> Self {
        Self::new("custom", func)
    }
}

impl<F> RowFilter for Predicate<F>
where
    F: Fn(&Dataset) -> Result<BooleanChunked>,
{
    fn mask(&self, dataset: &Dataset) -> Result<BooleanChunked> {
        (self.func)(dataset)
    }

    fn describe(&self) -> String {
        self.description.clone()
    }
}

/// Patients admitted to intensive care (`ICU == YES`).
pub fn icu_admitted() -> FieldEquals {
    FieldEquals::new(ICU, POSITIVE_FLAG)
}

/// Patients with a recorded date of death.
pub fn deceased() -> FieldPresent {
    FieldPresent::new(DATE_OF_DEATH)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Dataset {
        Dataset::from_frame(
            df!(
                "icu" => [Some("YES"), Some("NO"), None, Some("YES")],
                "date_of_death" => [None, Some("2020-04-01"), Some("  "), Some("2020-05-02")]
            )
            .unwrap(),
        )
        .unwrap()
    }

    #[test]
    fn field_equals_matches_exact_value() {
        let mask = icu_admitted().mask(&sample()).unwrap();
        assert_eq!(mask.num_trues(), 2);
        assert_eq!(icu_admitted().describe(), "ICU == YES");
    }

    #[test]
    fn field_present_ignores_null_and_blank() {
        let mask = deceased().mask(&sample()).unwrap();
        assert_eq!(mask.len(), 4);
        assert_eq!(mask.num_trues(), 2);
    }

    #[test]
    fn all_records_keeps_everything() {
        let mask = AllRecords.mask(&sample()).unwrap();
        assert_eq!(mask.num_trues(), 4);
    }

    #[test]
    fn predicate_wraps_closure() {
        let filter = Predicate::new("first record", |ds: &Dataset| {
            let keep: Vec<bool> = (0..ds.record_count()).map(|idx| idx == 0).collect();
            Ok(BooleanChunked::from_slice("mask".into(), &keep))
        });
        assert_eq!(filter.mask(&sample()).unwrap().num_trues(), 1);
        assert_eq!(filter.describe(), "first record");

        let custom = Predicate::custom(|ds: &Dataset| AllRecords.mask(ds));
        assert_eq!(custom.describe(), "custom");
    }

    #[test]
    fn unknown_field_fails() {
        let filter = FieldEquals::new("WARD", "A");
        assert!(filter.mask(&sample()).is_err());
    }
}
