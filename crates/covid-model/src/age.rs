//! Age-group bucket labels.

use std::cmp::Ordering;

/// A pre-bucketed age-group label such as `"30-39"`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgeGroup<'a> {
    label: &'a str,
    lower: Option<u32>,
}

impl<'a> AgeGroup<'a> {
    /// Parses the lower bound of a bucket label.
    ///
    /// `"30-39"` and `"100+"` yield their leading number, `"<10"` yields 0.
    /// Labels without a leading number have no lower bound.
    pub fn parse(label: &'a str) -> Self {
        let trimmed = label.trim();
        let lower = if trimmed.starts_with('<') {
            Some(0)
        } else {
            let digits: String = trimmed.chars().take_while(char::is_ascii_digit).collect();
            digits.parse().ok()
        };
        Self { label, lower }
    }

    pub fn label(&self) -> &'a str {
        self.label
    }

    pub fn lower_bound(&self) -> Option<u32> {
        self.lower
    }
}

impl Ord for AgeGroup<'_> {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self.lower, other.lower) {
            (Some(a), Some(b)) => a.cmp(&b).then_with(|| self.label.cmp(other.label)),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => self.label.cmp(other.label),
        }
    }
}

impl PartialOrd for AgeGroup<'_> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Orders two age-group labels by parsed lower bound.
pub fn age_group_cmp(a: &str, b: &str) -> Ordering {
    AgeGroup::parse(a).cmp(&AgeGroup::parse(b))
}
