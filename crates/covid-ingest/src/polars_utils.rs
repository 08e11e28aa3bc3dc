//! Polars AnyValue utility functions.

use polars::prelude::*;

/// Converts a Polars `AnyValue` to display text.
///
/// Returns an empty string for `Null`.
pub fn any_to_string(value: AnyValue<'_>) -> String {
    match value {
        AnyValue::Null => String::new(),
        AnyValue::String(s) => s.to_string(),
        AnyValue::StringOwned(s) => s.to_string(),
        AnyValue::Boolean(b) => if b { "YES" } else { "NO" }.to_string(),
        other => other.to_string(),
    }
}
