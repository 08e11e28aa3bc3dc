use chrono::NaiveDate;
use serde::Serialize;
use tracing::debug;

use covid_ingest::Dataset;
use covid_model::{CategoryCount, DATE_OF_DEATH, INTUBATED, IntubationStatus, SEX, Sex};

use crate::counts::count_by_category;
use crate::error::Result;
use crate::metrics::DatasetMetrics;

const DATE_FORMATS: [&str; 3] = ["%Y-%m-%d", "%d-%m-%Y", "%d/%m/%Y"];

/// Headline statistics for the dashboard's landing view.
///
/// Category statistics are `None` when the category does not occur at all,
/// which the presenter shows as "no data" rather than zero.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryView {
    pub metrics: DatasetMetrics,
    pub female_cases: Option<u64>,
    pub male_cases: Option<u64>,
    pub intubated_cases: Option<u64>,
    pub sex: CategoryCount,
    pub intubation: CategoryCount,
    pub deaths: DeathSummary,
}

impl SummaryView {
    pub fn compute(dataset: &Dataset) -> Result<Self> {
        let sex = count_by_category(dataset, SEX)?;
        let intubation = count_by_category(dataset, INTUBATED)?;
        let deaths = DeathSummary::compute(dataset)?;
        Ok(Self {
            metrics: DatasetMetrics::of(dataset),
            female_cases: sex.get(Sex::Female.as_str()),
            male_cases: sex.get(Sex::Male.as_str()),
            intubated_cases: count_status(&intubation, IntubationStatus::Yes),
            sex,
            intubation,
            deaths,
        })
    }
}

/// Deceased patients and the span of their recorded dates of death.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct DeathSummary {
    /// Records with a non-blank date of death.
    pub deceased: u64,
    pub earliest: Option<NaiveDate>,
    pub latest: Option<NaiveDate>,
    /// Deceased records whose date could not be parsed.
    pub unparsed: u64,
}

impl DeathSummary {
    pub fn compute(dataset: &Dataset) -> Result<Self> {
        let column = dataset.string_column(DATE_OF_DEATH)?;
        let mut summary = Self::default();
        for value in column.iter().flatten() {
            let value = value.trim();
            if value.is_empty() {
                continue;
            }
            summary.deceased += 1;
            match parse_date(value) {
                Some(date) => {
                    summary.earliest = Some(summary.earliest.map_or(date, |d| d.min(date)));
                    summary.latest = Some(summary.latest.map_or(date, |d| d.max(date)));
                }
                None => summary.unparsed += 1,
            }
        }
        if summary.unparsed > 0 {
            debug!(unparsed = summary.unparsed, "dates of death not parsed");
        }
        Ok(summary)
    }
}

/// Sums the categories that parse as `status`, so `yes` and `YES` both
/// count. `None` when no category matches.
fn count_status(intubation: &CategoryCount, status: IntubationStatus) -> Option<u64> {
    intubation
        .iter()
        .filter(|(value, _)| value.parse::<IntubationStatus>().ok() == Some(status))
        .map(|(_, count)| count)
        .reduce(|total, count| total + count)
}

fn parse_date(value: &str) -> Option<NaiveDate> {
    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(value, format).ok())
}
