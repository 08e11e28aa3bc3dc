//! Options controlling how a dataset is loaded.

use covid_model::required_columns;

/// Options for [`load_dataset`](crate::load_dataset).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadOptions {
    /// Canonical column names that must be present after normalization.
    /// Defaults to every column the dashboard views read.
    pub required_columns: Vec<String>,

    /// Field delimiter. Defaults to `,`.
    pub delimiter: u8,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            required_columns: required_columns().into_iter().map(String::from).collect(),
            delimiter: b',',
        }
    }
}

impl LoadOptions {
    /// Options that accept any header.
    pub fn permissive() -> Self {
        Self {
            required_columns: Vec::new(),
            ..Self::default()
        }
    }

    /// Replace the required column list.
    #[must_use]
    pub fn with_required_columns<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.required_columns = columns.into_iter().map(Into::into).collect();
        self
    }

    /// Set the field delimiter.
    #[must_use]
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_requires_full_schema() {
        let options = LoadOptions::default();
        assert!(options.required_columns.iter().any(|c| c == "SEX"));
        assert!(options.required_columns.iter().any(|c| c == "INMUSUPR"));
        assert_eq!(options.delimiter, b',');
    }

    #[test]
    fn permissive_requires_nothing() {
        let options = LoadOptions::permissive().with_delimiter(b';');
        assert!(options.required_columns.is_empty());
        assert_eq!(options.delimiter, b';');
    }
}
