use serde::Serialize;
use tracing::warn;

use covid_ingest::Dataset;
use covid_model::{
    AGE_GROUP, CategoryCount, CategoryOrder, Condition, ConditionalCount, DECEASED_CONDITIONS,
    GroupedCount, ICU_CONDITIONS, INTUBATED, SEX,
};

use crate::binning::{DEFAULT_AGE_BOUNDARIES, HistogramBin, align_midpoints};
use crate::conditional::count_conditional;
use crate::counts::{count_by_category, count_by_two_categories};
use crate::error::{AggregateError, Result};
use crate::filter::{deceased, icu_admitted};

/// The chart tabs of the dashboard, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartTab {
    AgeGroups,
    AgeSex,
    Intubation,
    IcuConditions,
    DeceasedConditions,
}

impl ChartTab {
    pub const ALL: [ChartTab; 5] = [
        ChartTab::AgeGroups,
        ChartTab::AgeSex,
        ChartTab::Intubation,
        ChartTab::IcuConditions,
        ChartTab::DeceasedConditions,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            ChartTab::AgeGroups => "Covid Cases by Age Group",
            ChartTab::AgeSex => "Covid Cases by Gender and Age Group",
            ChartTab::Intubation => "Total Intubated Patients",
            ChartTab::IcuConditions => "ICU Admission Among Diseases",
            ChartTab::DeceasedConditions => "Total Deceased Patients in Other Diseases",
        }
    }

    /// Caption of the chart drawn on the tab.
    pub fn chart_title(&self) -> &'static str {
        match self {
            ChartTab::AgeGroups => "Number of Cases by Age Group",
            ChartTab::AgeSex => "Distribution of COVID-19 Cases by Gender and Age Group",
            ChartTab::Intubation => "Distribution of Intubation Cases",
            ChartTab::IcuConditions => "ICU Patients based on the Diseases",
            ChartTab::DeceasedConditions => "Common Diseases in Deceased Patients",
        }
    }
}

/// The computed tables behind one chart tab.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "tab", rename_all = "snake_case")]
pub enum ChartPanel {
    /// Cases per age group (bar chart) and the same counts over bucket
    /// midpoints (histogram). When the age groups cannot be aligned to the
    /// ten-year buckets the histogram is empty and `histogram_note` says why.
    AgeGroups {
        counts: CategoryCount,
        histogram: Vec<HistogramBin>,
        histogram_note: Option<String>,
    },
    /// Cases per age group and sex (grouped bar chart).
    AgeSex { counts: GroupedCount },
    /// Cases per intubation status, most frequent first.
    Intubation { counts: CategoryCount },
    /// ICU patients with each condition (line chart).
    IcuConditions { counts: ConditionalCount },
    /// Deceased patients with each condition (horizontal bar chart).
    DeceasedConditions { counts: ConditionalCount },
}

impl ChartPanel {
    pub fn compute(dataset: &Dataset, tab: ChartTab) -> Result<Self> {
        match tab {
            ChartTab::AgeGroups => {
                let counts =
                    count_by_category(dataset, AGE_GROUP)?.sorted(CategoryOrder::AgeBucket);
                let (histogram, histogram_note) =
                    match align_midpoints(&counts, &DEFAULT_AGE_BOUNDARIES) {
                        Ok(bins) => (bins, None),
                        Err(
                            err @ (AggregateError::BucketCountMismatch { .. }
                            | AggregateError::BucketLabelMismatch { .. }),
                        ) => {
                            warn!(error = %err, "age histogram skipped");
                            (Vec::new(), Some(err.to_string()))
                        }
                        Err(err) => return Err(err),
                    };
                Ok(ChartPanel::AgeGroups {
                    counts,
                    histogram,
                    histogram_note,
                })
            }
            ChartTab::AgeSex => Ok(ChartPanel::AgeSex {
                counts: count_by_two_categories(dataset, AGE_GROUP, SEX)?,
            }),
            ChartTab::Intubation => Ok(ChartPanel::Intubation {
                counts: count_by_category(dataset, INTUBATED)?
                    .sorted(CategoryOrder::CountDescending),
            }),
            ChartTab::IcuConditions => Ok(ChartPanel::IcuConditions {
                counts: count_conditional(
                    dataset,
                    &icu_admitted(),
                    &Condition::columns(&ICU_CONDITIONS),
                )?,
            }),
            ChartTab::DeceasedConditions => Ok(ChartPanel::DeceasedConditions {
                counts: count_conditional(
                    dataset,
                    &deceased(),
                    &Condition::columns(&DECEASED_CONDITIONS),
                )?,
            }),
        }
    }

    pub fn tab(&self) -> ChartTab {
        match self {
            ChartPanel::AgeGroups { .. } => ChartTab::AgeGroups,
            ChartPanel::AgeSex { .. } => ChartTab::AgeSex,
            ChartPanel::Intubation { .. } => ChartTab::Intubation,
            ChartPanel::IcuConditions { .. } => ChartTab::IcuConditions,
            ChartPanel::DeceasedConditions { .. } => ChartTab::DeceasedConditions,
        }
    }

    /// True when the panel has nothing to plot.
    pub fn is_empty(&self) -> bool {
        match self {
            ChartPanel::AgeGroups { counts, .. } | ChartPanel::Intubation { counts } => {
                counts.is_empty()
            }
            ChartPanel::AgeSex { counts } => counts.is_empty(),
            ChartPanel::IcuConditions { counts } | ChartPanel::DeceasedConditions { counts } => {
                counts.is_all_zero()
            }
        }
    }
}

/// All requested chart panels for one dataset.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartView {
    pub panels: Vec<ChartPanel>,
}

impl ChartView {
    /// Computes every tab.
    pub fn compute(dataset: &Dataset) -> Result<Self> {
        Self::compute_tabs(dataset, &ChartTab::ALL)
    }

    /// Computes the given tabs, in the given order.
    pub fn compute_tabs(dataset: &Dataset, tabs: &[ChartTab]) -> Result<Self> {
        let panels = tabs
            .iter()
            .map(|tab| ChartPanel::compute(dataset, *tab))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { panels })
    }

    pub fn panel(&self, tab: ChartTab) -> Option<&ChartPanel> {
        self.panels.iter().find(|panel| panel.tab() == tab)
    }
}
