//! Summary tables produced by aggregation.
//!
//! Every table is an owned, immutable snapshot: aggregators build them once
//! and consumers only read. Counts are `u64` and always equal the number of
//! matching records.

use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

use crate::age::age_group_cmp;

/// Display order for a [`CategoryCount`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CategoryOrder {
    /// Byte-wise order of the category value.
    #[default]
    Lexical,
    /// Age buckets by parsed lower bound.
    AgeBucket,
    /// Largest count first, ties broken lexically.
    CountDescending,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryEntry {
    pub value: String,
    pub count: u64,
}

/// Count of records per distinct value of one field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryCount {
    pub field: String,
    entries: Vec<CategoryEntry>,
}

impl CategoryCount {
    /// Builds a table in [`CategoryOrder::Lexical`] order.
    pub fn new<I, S>(field: impl Into<String>, counts: I) -> Self
    where
        I: IntoIterator<Item = (S, u64)>,
        S: Into<String>,
    {
        let mut merged: BTreeMap<String, u64> = BTreeMap::new();
        for (value, count) in counts {
            *merged.entry(value.into()).or_insert(0) += count;
        }
        Self {
            field: field.into(),
            entries: merged
                .into_iter()
                .map(|(value, count)| CategoryEntry { value, count })
                .collect(),
        }
    }

    pub fn entries(&self) -> &[CategoryEntry] {
        &self.entries
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.entries
            .iter()
            .map(|entry| (entry.value.as_str(), entry.count))
    }

    pub fn values(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|entry| entry.value.as_str())
    }

    pub fn get(&self, value: &str) -> Option<u64> {
        self.entries
            .iter()
            .find(|entry| entry.value == value)
            .map(|entry| entry.count)
    }

    pub fn total(&self) -> u64 {
        self.entries.iter().map(|entry| entry.count).sum()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns a copy of this table in the requested order.
    #[must_use]
    pub fn sorted(&self, order: CategoryOrder) -> Self {
        let mut entries = self.entries.clone();
        match order {
            CategoryOrder::Lexical => entries.sort_by(|a, b| a.value.cmp(&b.value)),
            CategoryOrder::AgeBucket => entries.sort_by(|a, b| age_group_cmp(&a.value, &b.value)),
            CategoryOrder::CountDescending => entries.sort_by(|a, b| match b.count.cmp(&a.count) {
                Ordering::Equal => a.value.cmp(&b.value),
                other => other,
            }),
        }
        Self {
            field: self.field.clone(),
            entries,
        }
    }

    /// Returns a copy covering exactly `universe`, in its order.
    ///
    /// Values missing from the table get a zero count. Observed values
    /// outside `universe` are appended after it so no record is lost.
    #[must_use]
    pub fn zero_filled<S: AsRef<str>>(&self, universe: &[S]) -> Self {
        let mut entries: Vec<CategoryEntry> = universe
            .iter()
            .map(|value| CategoryEntry {
                value: value.as_ref().to_string(),
                count: self.get(value.as_ref()).unwrap_or(0),
            })
            .collect();
        for entry in &self.entries {
            if !universe.iter().any(|value| value.as_ref() == entry.value) {
                entries.push(entry.clone());
            }
        }
        Self {
            field: self.field.clone(),
            entries,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GroupedEntry {
    pub a: String,
    pub b: String,
    pub count: u64,
}

/// Count of records per observed pair of values of two fields.
///
/// The representation is sparse: pairs with no records are absent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GroupedCount {
    pub field_a: String,
    pub field_b: String,
    entries: Vec<GroupedEntry>,
}

impl GroupedCount {
    /// Builds a table sorted by `(a, b)`, dropping zero counts.
    pub fn new<I, A, B>(field_a: impl Into<String>, field_b: impl Into<String>, counts: I) -> Self
    where
        I: IntoIterator<Item = ((A, B), u64)>,
        A: Into<String>,
        B: Into<String>,
    {
        let mut merged: BTreeMap<(String, String), u64> = BTreeMap::new();
        for ((a, b), count) in counts {
            *merged.entry((a.into(), b.into())).or_insert(0) += count;
        }
        Self {
            field_a: field_a.into(),
            field_b: field_b.into(),
            entries: merged
                .into_iter()
                .filter(|(_, count)| *count > 0)
                .map(|((a, b), count)| GroupedEntry { a, b, count })
                .collect(),
        }
    }

    pub fn entries(&self) -> &[GroupedEntry] {
        &self.entries
    }

    pub fn get(&self, a: &str, b: &str) -> Option<u64> {
        self.entries
            .iter()
            .find(|entry| entry.a == a && entry.b == b)
            .map(|entry| entry.count)
    }

    pub fn total(&self) -> u64 {
        self.entries.iter().map(|entry| entry.count).sum()
    }

    pub fn total_for_a(&self, a: &str) -> u64 {
        self.entries
            .iter()
            .filter(|entry| entry.a == a)
            .map(|entry| entry.count)
            .sum()
    }

    /// Distinct first-dimension values, sorted.
    pub fn a_values(&self) -> Vec<&str> {
        let set: BTreeSet<&str> = self.entries.iter().map(|entry| entry.a.as_str()).collect();
        set.into_iter().collect()
    }

    /// Distinct second-dimension values, sorted.
    pub fn b_values(&self) -> Vec<&str> {
        let set: BTreeSet<&str> = self.entries.iter().map(|entry| entry.b.as_str()).collect();
        set.into_iter().collect()
    }

    /// Zero-filled grid: one row per `a_values` entry, one column per
    /// `b_values` entry.
    pub fn dense_grid(&self) -> Vec<Vec<u64>> {
        let b_values = self.b_values();
        self.a_values()
            .into_iter()
            .map(|a| {
                b_values
                    .iter()
                    .map(|b| self.get(a, b).unwrap_or(0))
                    .collect()
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConditionEntry {
    pub condition: String,
    pub count: u64,
}

/// Per-condition count of records passing a filter with that condition set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConditionalCount {
    /// Description of the row filter applied.
    pub filter: String,
    /// Records passing the filter, regardless of condition flags.
    pub filtered_total: u64,
    entries: Vec<ConditionEntry>,
}

impl ConditionalCount {
    /// Builds a table keeping `counts` in the given order.
    pub fn new<I, S>(filter: impl Into<String>, filtered_total: u64, counts: I) -> Self
    where
        I: IntoIterator<Item = (S, u64)>,
        S: Into<String>,
    {
        Self {
            filter: filter.into(),
            filtered_total,
            entries: counts
                .into_iter()
                .map(|(condition, count)| ConditionEntry {
                    condition: condition.into(),
                    count,
                })
                .collect(),
        }
    }

    pub fn entries(&self) -> &[ConditionEntry] {
        &self.entries
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.entries
            .iter()
            .map(|entry| (entry.condition.as_str(), entry.count))
    }

    pub fn conditions(&self) -> Vec<&str> {
        self.entries
            .iter()
            .map(|entry| entry.condition.as_str())
            .collect()
    }

    pub fn get(&self, condition: &str) -> Option<u64> {
        self.entries
            .iter()
            .find(|entry| entry.condition == condition)
            .map(|entry| entry.count)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// True when no condition has a positive count.
    pub fn is_all_zero(&self) -> bool {
        self.entries.iter().all(|entry| entry.count == 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_count_merges_duplicates_and_sorts() {
        let table = CategoryCount::new("SEX", [("MALE", 1), ("FEMALE", 2), ("MALE", 3)]);
        assert_eq!(table.values().collect::<Vec<_>>(), vec!["FEMALE", "MALE"]);
        assert_eq!(table.get("MALE"), Some(4));
        assert_eq!(table.total(), 6);
    }

    #[test]
    fn count_descending_breaks_ties_lexically() {
        let table = CategoryCount::new("INTUBATED", [("NO", 5), ("YES", 2), ("UNKNOWN", 2)]);
        let sorted = table.sorted(CategoryOrder::CountDescending);
        assert_eq!(
            sorted.values().collect::<Vec<_>>(),
            vec!["NO", "UNKNOWN", "YES"]
        );
    }

    #[test]
    fn zero_fill_keeps_values_outside_universe() {
        let table = CategoryCount::new("SEX", [("FEMALE", 2), ("UNKNOWN", 1)]);
        let filled = table.zero_filled(&["MALE", "FEMALE"]);
        assert_eq!(
            filled.iter().collect::<Vec<_>>(),
            vec![("MALE", 0), ("FEMALE", 2), ("UNKNOWN", 1)]
        );
        assert_eq!(filled.total(), table.total());
    }

    #[test]
    fn grouped_dense_grid_zero_fills_missing_pairs() {
        let table = GroupedCount::new(
            "AGE_GROUP",
            "SEX",
            [(("0-9", "FEMALE"), 1), (("10-19", "MALE"), 2), (("0-9", "MALE"), 0)],
        );
        assert_eq!(table.len(), 2);
        assert_eq!(table.a_values(), vec!["0-9", "10-19"]);
        assert_eq!(table.b_values(), vec!["FEMALE", "MALE"]);
        assert_eq!(table.dense_grid(), vec![vec![1, 0], vec![0, 2]]);
        assert_eq!(table.total_for_a("10-19"), 2);
    }

    #[test]
    fn conditional_count_keeps_input_order() {
        let table = ConditionalCount::new("ICU == YES", 3, [("ASTHMA", 0), ("DIABETES", 1)]);
        assert_eq!(table.conditions(), vec!["ASTHMA", "DIABETES"]);
        assert!(!table.is_all_zero());
    }
}
