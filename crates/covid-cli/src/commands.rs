use std::time::Instant;

use anyhow::{Context, Result};
use tracing::{debug, info, info_span};

use covid_aggregate::{ChartPanel, ChartTab, ChartView, SummaryView};
use covid_cli::render::{
    columns_table, render_charts, render_panel, render_preview, render_summary,
};
use covid_ingest::{Dataset, DatasetCache, LoadOptions, load_dataset};
use covid_model::required_columns;

use crate::cli::{ChartsArgs, DataArgs, OutputArg, ReportArgs, SummaryArgs};

pub fn run_summary(args: &SummaryArgs) -> Result<()> {
    let dataset = load(&args.data, LoadOptions::default())?;
    let view = SummaryView::compute(&dataset).context("compute summary")?;
    match args.output {
        OutputArg::Json => println!("{}", serde_json::to_string_pretty(&view)?),
        OutputArg::Table => {
            println!("{}", render_summary(&view));
            if args.preview > 0 {
                println!();
                println!(
                    "{}",
                    render_preview(&dataset.column_names(), &dataset.preview_rows(args.preview))
                );
            }
        }
    }
    Ok(())
}

pub fn run_charts(args: &ChartsArgs) -> Result<()> {
    let dataset = load(&args.data, LoadOptions::default())?;
    let view = ChartView::compute_tabs(&dataset, &args.tab.tabs()).context("compute charts")?;
    match args.output {
        OutputArg::Json => println!("{}", serde_json::to_string_pretty(&view)?),
        OutputArg::Table => println!("{}", render_charts(&view, args.bar_width)),
    }
    Ok(())
}

/// Renders the summary and every chart tab, fetching the dataset through a
/// cache for each page so the file is parsed once.
pub fn run_report(args: &ReportArgs) -> Result<()> {
    let path = &args.data.data;
    let span = info_span!("report", path = %path.display());
    let _guard = span.enter();
    let start = Instant::now();
    let options = load_options(&args.data, LoadOptions::default());
    let mut cache = DatasetCache::new();

    let dataset = cache
        .get_or_load(path, &options)
        .with_context(|| format!("load {}", path.display()))?;
    let summary = SummaryView::compute(&dataset).context("compute summary")?;

    let mut panels = Vec::with_capacity(ChartTab::ALL.len());
    for tab in ChartTab::ALL {
        let dataset = cache
            .get_or_load(path, &options)
            .with_context(|| format!("load {}", path.display()))?;
        let panel = ChartPanel::compute(&dataset, tab)
            .with_context(|| format!("compute {}", tab.title()))?;
        debug!(tab = tab.title(), "chart computed");
        panels.push(panel);
    }
    let charts = ChartView { panels };
    info!(
        cached = cache.len(),
        duration_ms = start.elapsed().as_millis(),
        "report complete"
    );

    match args.output {
        OutputArg::Json => {
            let report = serde_json::json!({ "summary": summary, "charts": charts });
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        OutputArg::Table => {
            println!("{}", render_summary(&summary));
            for panel in &charts.panels {
                println!();
                println!("{}", render_panel(panel, args.bar_width));
            }
        }
    }
    Ok(())
}

/// Lists normalized columns; returns false when required columns are missing.
pub fn run_columns(args: &DataArgs) -> Result<bool> {
    let dataset = load(args, LoadOptions::permissive())?;
    let present = dataset.column_names();
    let required = required_columns();
    let complete = required.iter().all(|name| dataset.has_column(name));
    println!("{}", columns_table(&present, &required));
    if !complete {
        eprintln!("error: dataset is missing required columns");
    }
    Ok(complete)
}

fn load(args: &DataArgs, base: LoadOptions) -> Result<Dataset> {
    let options = load_options(args, base);
    load_dataset(&args.data, &options).with_context(|| format!("load {}", args.data.display()))
}

fn load_options(args: &DataArgs, base: LoadOptions) -> LoadOptions {
    base.with_delimiter(args.delimiter)
}
