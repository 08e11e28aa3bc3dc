//! Canonical column names of the case dataset.
//!
//! Column names are compared in upper case throughout the workspace. The
//! loader normalizes every header to this form, so downstream code can refer
//! to the constants below directly.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ModelError;

pub const SEX: &str = "SEX";
pub const AGE_GROUP: &str = "AGE_GROUP";
pub const INTUBATED: &str = "INTUBATED";
pub const ICU: &str = "ICU";
pub const DATE_OF_DEATH: &str = "DATE_OF_DEATH";

/// Value marking a flag column (ICU, INTUBATED, condition flags) as set.
pub const POSITIVE_FLAG: &str = "YES";

/// Alternative header spellings and the canonical column they map to.
pub const COLUMN_ALIASES: &[(&str, &str)] = &[("IMMUNOSUPPRESSION", "INMUSUPR")];

/// Conditions charted against ICU admission, in display order.
pub const ICU_CONDITIONS: [Condition; 9] = [
    Condition::Diabetes,
    Condition::Copd,
    Condition::Asthma,
    Condition::Immunosuppression,
    Condition::Hypertension,
    Condition::Cardiovascular,
    Condition::Obesity,
    Condition::ChronicKidney,
    Condition::Tobacco,
];

/// Conditions charted among deceased patients, in display order.
pub const DECEASED_CONDITIONS: [Condition; 10] = [
    Condition::Pneumonia,
    Condition::Diabetes,
    Condition::Copd,
    Condition::Asthma,
    Condition::Immunosuppression,
    Condition::Hypertension,
    Condition::Cardiovascular,
    Condition::Obesity,
    Condition::ChronicKidney,
    Condition::Tobacco,
];

/// Pre-existing condition flag columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Condition {
    Diabetes,
    Copd,
    Asthma,
    Immunosuppression,
    Hypertension,
    Cardiovascular,
    Obesity,
    ChronicKidney,
    Tobacco,
    Pneumonia,
}

impl Condition {
    pub const ALL: [Condition; 10] = [
        Condition::Diabetes,
        Condition::Copd,
        Condition::Asthma,
        Condition::Immunosuppression,
        Condition::Hypertension,
        Condition::Cardiovascular,
        Condition::Obesity,
        Condition::ChronicKidney,
        Condition::Tobacco,
        Condition::Pneumonia,
    ];

    /// Column holding this condition's flag in the case dataset.
    pub fn column(&self) -> &'static str {
        match self {
            Condition::Diabetes => "DIABETES",
            Condition::Copd => "COPD",
            Condition::Asthma => "ASTHMA",
            Condition::Immunosuppression => "INMUSUPR",
            Condition::Hypertension => "HYPERTENSION",
            Condition::Cardiovascular => "CARDIOVASCULAR",
            Condition::Obesity => "OBESITY",
            Condition::ChronicKidney => "CHRONIC_KIDNEY",
            Condition::Tobacco => "TOBACCO",
            Condition::Pneumonia => "PNEUMONIA",
        }
    }

    /// Human readable name.
    pub fn label(&self) -> &'static str {
        match self {
            Condition::Diabetes => "Diabetes",
            Condition::Copd => "COPD",
            Condition::Asthma => "Asthma",
            Condition::Immunosuppression => "Immunosuppression",
            Condition::Hypertension => "Hypertension",
            Condition::Cardiovascular => "Cardiovascular",
            Condition::Obesity => "Obesity",
            Condition::ChronicKidney => "Chronic kidney disease",
            Condition::Tobacco => "Tobacco",
            Condition::Pneumonia => "Pneumonia",
        }
    }

    /// Column names for a list of conditions, preserving order.
    pub fn columns(conditions: &[Condition]) -> Vec<&'static str> {
        conditions.iter().map(Condition::column).collect()
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column())
    }
}

impl FromStr for Condition {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let canonical = canonical_column_name(s);
        Condition::ALL
            .into_iter()
            .find(|condition| condition.column() == canonical)
            .ok_or_else(|| ModelError::UnknownCondition(s.to_string()))
    }
}

/// Normalizes a raw header to its canonical column name.
///
/// Strips a UTF-8 BOM, trims, joins internal whitespace runs with `_`,
/// upper-cases, and resolves [`COLUMN_ALIASES`].
pub fn canonical_column_name(raw: &str) -> String {
    let trimmed = raw.trim_start_matches('\u{feff}').trim();
    let upper = trimmed
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("_")
        .to_ascii_uppercase();
    COLUMN_ALIASES
        .iter()
        .find(|(alias, _)| *alias == upper)
        .map(|(_, canonical)| (*canonical).to_string())
        .unwrap_or(upper)
}

/// Every column the dashboard views read.
pub fn required_columns() -> Vec<&'static str> {
    let mut columns = vec![SEX, AGE_GROUP, INTUBATED, ICU, DATE_OF_DEATH];
    columns.extend(Condition::ALL.iter().map(Condition::column));
    columns
}
