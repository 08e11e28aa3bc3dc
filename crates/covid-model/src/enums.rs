//! Categorical values of the case dataset.
//!
//! These types label statistic cards; aggregation itself counts the raw
//! string values so that categories outside the known set (for example an
//! unrecorded sex) are still counted as their own category.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ModelError;

/// Patient sex as recorded in the `SEX` column.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Sex {
    Female,
    Male,
    /// Any other recorded value, kept verbatim.
    Other(String),
}

impl Sex {
    pub fn as_str(&self) -> &str {
        match self {
            Sex::Female => "FEMALE",
            Sex::Male => "MALE",
            Sex::Other(value) => value,
        }
    }
}

impl fmt::Display for Sex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Sex {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Ok(match trimmed.to_ascii_uppercase().as_str() {
            "FEMALE" => Sex::Female,
            "MALE" => Sex::Male,
            _ => Sex::Other(trimmed.to_string()),
        })
    }
}

/// Value of the `INTUBATED` column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IntubationStatus {
    Yes,
    No,
    DoesNotApply,
    Unknown,
}

impl IntubationStatus {
    /// Literal value as written in the dataset.
    pub fn as_str(&self) -> &'static str {
        match self {
            IntubationStatus::Yes => "YES",
            IntubationStatus::No => "NO",
            IntubationStatus::DoesNotApply => "DOES NOT APPLY",
            IntubationStatus::Unknown => "UNKNOWN",
        }
    }
}

impl fmt::Display for IntubationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for IntubationStatus {
    type Err = ModelError;

    /// Accepts both `DOES NOT APPLY` and `DOES_NOT_APPLY`, any case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_uppercase().replace('_', " ");
        match normalized.as_str() {
            "YES" => Ok(IntubationStatus::Yes),
            "NO" => Ok(IntubationStatus::No),
            "DOES NOT APPLY" => Ok(IntubationStatus::DoesNotApply),
            "UNKNOWN" => Ok(IntubationStatus::Unknown),
            _ => Err(ModelError::UnknownIntubationStatus(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sex_keeps_unrecognized_values() {
        assert_eq!("female".parse::<Sex>().unwrap(), Sex::Female);
        assert_eq!("MALE".parse::<Sex>().unwrap(), Sex::Male);
        assert_eq!(
            "UNKNOWN".parse::<Sex>().unwrap(),
            Sex::Other("UNKNOWN".to_string())
        );
    }

    #[test]
    fn intubation_status_accepts_both_spellings() {
        assert_eq!(
            "DOES_NOT_APPLY".parse::<IntubationStatus>().unwrap(),
            IntubationStatus::DoesNotApply
        );
        assert_eq!(
            "does not apply".parse::<IntubationStatus>().unwrap(),
            IntubationStatus::DoesNotApply
        );
        assert_eq!(IntubationStatus::DoesNotApply.to_string(), "DOES NOT APPLY");
        assert!("MAYBE".parse::<IntubationStatus>().is_err());
    }
}
