//! Domain vocabulary for the COVID-19 case dashboard.
//!
//! This crate holds the canonical column names of the case dataset, the
//! pre-existing condition catalogue, categorical value types, and the
//! immutable summary tables produced by aggregation. It performs no I/O.

pub mod age;
pub mod columns;
pub mod enums;
pub mod error;
pub mod lookup;
pub mod summary;

pub use age::{AgeGroup, age_group_cmp};
pub use columns::{
    AGE_GROUP, COLUMN_ALIASES, Condition, DATE_OF_DEATH, DECEASED_CONDITIONS, ICU,
    ICU_CONDITIONS, INTUBATED, POSITIVE_FLAG, SEX, canonical_column_name, required_columns,
};
pub use enums::{IntubationStatus, Sex};
pub use error::{ModelError, Result};
pub use lookup::CaseInsensitiveSet;
pub use summary::{
    CategoryCount, CategoryEntry, CategoryOrder, ConditionEntry, ConditionalCount, GroupedCount,
    GroupedEntry,
};
