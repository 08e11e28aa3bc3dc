//! Terminal rendering of the summary and chart views.
//!
//! Each chart tab becomes a `comfy-table` with a proportional bar column.
//! Rendering never recomputes data; it only lays out the view models.

use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use covid_aggregate::{ChartPanel, ChartTab, ChartView, HistogramBin, SummaryView};
use covid_model::{
    CategoryCount, Condition, ConditionalCount, GroupedCount, Sex, age_group_cmp,
};

/// Default width of the bar column, in characters.
pub const DEFAULT_BAR_WIDTH: usize = 40;

const BAR: &str = "█";
const NO_DATA: &str = "no data";

/// A bar proportional to `count / max`, at most `width` characters.
///
/// Non-zero counts always get at least one block so small categories stay
/// visible next to large ones.
pub fn bar(count: u64, max: u64, width: usize) -> String {
    if count == 0 || max == 0 || width == 0 {
        return String::new();
    }
    let scaled = (count as f64 / max as f64 * width as f64).round() as usize;
    BAR.repeat(scaled.clamp(1, width))
}

/// Plain-text horizontal bar chart, one line per entry.
pub fn bar_chart_lines<'a, I>(entries: I, width: usize) -> Vec<String>
where
    I: IntoIterator<Item = (&'a str, u64)>,
{
    let entries: Vec<(&str, u64)> = entries.into_iter().collect();
    let label_width = entries
        .iter()
        .map(|(label, _)| label.chars().count())
        .max()
        .unwrap_or(0);
    let count_width = entries
        .iter()
        .map(|(_, count)| count.to_string().len())
        .max()
        .unwrap_or(0);
    let max = entries.iter().map(|(_, count)| *count).max().unwrap_or(0);
    entries
        .iter()
        .map(|(label, count)| {
            let line = format!(
                "{label:<label_width$}  {count:>count_width$}  {}",
                bar(*count, max, width)
            );
            line.trim_end().to_string()
        })
        .collect()
}

/// Headline cards followed by the sex and intubation breakdowns.
///
/// The sex breakdown always lists `FEMALE` and `MALE`, with zero when absent.
pub fn render_summary(view: &SummaryView) -> String {
    let mut table = Table::new();
    table.set_header(vec![header_cell("Metric"), header_cell("Value")]);
    apply_card_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);

    table.add_row(vec![
        label_cell("Total Cases"),
        Cell::new(view.metrics.record_count).add_attribute(Attribute::Bold),
    ]);
    table.add_row(vec![
        label_cell("Total Cells"),
        dim_cell(view.metrics.cell_count),
    ]);
    table.add_row(vec![label_cell("Female Cases"), optional_cell(view.female_cases)]);
    table.add_row(vec![label_cell("Male Cases"), optional_cell(view.male_cases)]);
    table.add_row(vec![
        label_cell("Intubated Patients"),
        optional_cell(view.intubated_cases),
    ]);
    table.add_row(vec![
        label_cell("Deceased Patients"),
        Cell::new(view.deaths.deceased),
    ]);
    if let (Some(earliest), Some(latest)) = (view.deaths.earliest, view.deaths.latest) {
        table.add_row(vec![
            label_cell("Deaths Recorded"),
            Cell::new(format!("{earliest} to {latest}")),
        ]);
    }

    let mut out = table.to_string();
    out.push_str("\n\n");
    let sex = view
        .sex
        .zero_filled(&[Sex::Female.as_str(), Sex::Male.as_str()]);
    out.push_str(&category_table("Sex", &sex, DEFAULT_BAR_WIDTH).to_string());
    out.push_str("\n\n");
    out.push_str(&category_table("Intubated", &view.intubation, DEFAULT_BAR_WIDTH).to_string());
    out
}

/// First rows of the dataset, as the dashboard's data preview.
pub fn render_preview(columns: &[String], rows: &[Vec<String>]) -> String {
    let mut table = Table::new();
    table.set_header(columns.iter().map(|name| header_cell(name)));
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
    for row in rows {
        table.add_row(row.iter().map(|value| {
            if value.is_empty() {
                dim_cell("-")
            } else {
                Cell::new(value)
            }
        }));
    }
    table.to_string()
}

/// Every panel of a chart view, each under its tab title.
pub fn render_charts(view: &ChartView, bar_width: usize) -> String {
    view.panels
        .iter()
        .map(|panel| render_panel(panel, bar_width))
        .collect::<Vec<_>>()
        .join("\n\n")
}

pub fn render_panel(panel: &ChartPanel, bar_width: usize) -> String {
    let tab = panel.tab();
    let mut out = format!("{}\n", tab.title());
    if panel.is_empty() {
        out.push_str(NO_DATA);
        return out;
    }
    out.push_str(tab.chart_title());
    out.push('\n');
    match panel {
        ChartPanel::AgeGroups {
            counts,
            histogram,
            histogram_note,
        } => {
            out.push_str(&category_table("Age Group", counts, bar_width).to_string());
            out.push_str("\n\nHistogram of COVID-19 Cases by Age\n");
            match histogram_note {
                Some(note) => out.push_str(&format!("histogram unavailable: {note}")),
                None => out.push_str(&histogram_table(histogram, bar_width).to_string()),
            }
        }
        ChartPanel::AgeSex { counts } => {
            out.push_str(&grouped_table(counts).to_string());
        }
        ChartPanel::Intubation { counts } => {
            out.push_str(&category_table("Intubated", counts, bar_width).to_string());
        }
        ChartPanel::IcuConditions { counts } | ChartPanel::DeceasedConditions { counts } => {
            out.push_str(&conditional_table(tab, counts, bar_width).to_string());
        }
    }
    out
}

pub fn category_table(label: &str, counts: &CategoryCount, bar_width: usize) -> Table {
    let mut table = Table::new();
    table.set_header(vec![header_cell(label), header_cell("Cases"), header_cell("")]);
    apply_chart_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    let max = counts.iter().map(|(_, count)| count).max().unwrap_or(0);
    for (value, count) in counts.iter() {
        table.add_row(vec![
            Cell::new(value),
            Cell::new(count),
            bar_cell(count, max, bar_width),
        ]);
    }
    table
}

/// Age group rows in bucket order against one column per sex, zero-filled,
/// with row totals.
pub fn grouped_table(counts: &GroupedCount) -> Table {
    let b_values = counts.b_values();
    let mut header = vec![header_cell(&title_case(&counts.field_a))];
    header.extend(b_values.iter().map(|value| header_cell(value)));
    header.push(header_cell("Total"));

    let mut table = Table::new();
    table.set_header(header);
    apply_chart_style(&mut table);
    for idx in 1..=b_values.len() + 1 {
        align_column(&mut table, idx, CellAlignment::Right);
    }
    let mut rows: Vec<(&str, Vec<u64>)> =
        counts.a_values().into_iter().zip(counts.dense_grid()).collect();
    rows.sort_by(|left, right| age_group_cmp(left.0, right.0));
    for (a, row) in rows {
        let mut cells = vec![Cell::new(a)];
        cells.extend(row.into_iter().map(|count| {
            if count == 0 {
                dim_cell(count)
            } else {
                Cell::new(count)
            }
        }));
        cells.push(Cell::new(counts.total_for_a(a)).add_attribute(Attribute::Bold));
        table.add_row(cells);
    }
    table
}

pub fn conditional_table(tab: ChartTab, counts: &ConditionalCount, bar_width: usize) -> Table {
    let patients = match tab {
        ChartTab::DeceasedConditions => "Deceased Patients",
        _ => "ICU Patients",
    };
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Disease"),
        header_cell(patients),
        header_cell(""),
    ]);
    apply_chart_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    let max = counts.iter().map(|(_, count)| count).max().unwrap_or(0);
    for (condition, count) in counts.iter() {
        table.add_row(vec![
            Cell::new(condition_label(condition)),
            Cell::new(count),
            bar_cell(count, max, bar_width),
        ]);
    }
    table.add_row(vec![
        dim_cell(format!("of {}", counts.filter)),
        dim_cell(counts.filtered_total),
        dim_cell(""),
    ]);
    table
}

pub fn histogram_table(bins: &[HistogramBin], bar_width: usize) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Age"),
        header_cell("Midpoint"),
        header_cell("Cases"),
        header_cell(""),
    ]);
    apply_chart_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    align_column(&mut table, 2, CellAlignment::Right);
    let max = bins.iter().map(|bin| bin.count).max().unwrap_or(0);
    for bin in bins {
        table.add_row(vec![
            Cell::new(format!("{}-{}", bin.lower, bin.upper)),
            dim_cell(bin.midpoint),
            Cell::new(bin.count),
            bar_cell(bin.count, max, bar_width),
        ]);
    }
    table
}

/// Normalized columns with their required-column status.
pub fn columns_table(present: &[String], required: &[&str]) -> Table {
    let mut table = Table::new();
    table.set_header(vec![header_cell("Column"), header_cell("Required"), header_cell("Present")]);
    apply_card_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Center);
    align_column(&mut table, 2, CellAlignment::Center);
    for name in present {
        let is_required = required.iter().any(|r| r == name);
        table.add_row(vec![
            Cell::new(name),
            if is_required { Cell::new("yes") } else { dim_cell("-") },
            Cell::new("✓").fg(Color::Green).add_attribute(Attribute::Bold),
        ]);
    }
    for name in required.iter().filter(|r| !present.iter().any(|p| p == *r)) {
        table.add_row(vec![
            Cell::new(*name).fg(Color::Red),
            Cell::new("yes"),
            Cell::new("missing").fg(Color::Red).add_attribute(Attribute::Bold),
        ]);
    }
    table
}

fn condition_label(column: &str) -> String {
    column
        .parse::<Condition>()
        .map(|condition| condition.label().to_string())
        .unwrap_or_else(|_| column.to_string())
}

fn title_case(field: &str) -> String {
    field
        .split('_')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_string() + &chars.as_str().to_lowercase(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn apply_chart_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn apply_card_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn label_cell(label: &str) -> Cell {
    Cell::new(label).fg(Color::Blue).add_attribute(Attribute::Bold)
}

fn bar_cell(count: u64, max: u64, width: usize) -> Cell {
    Cell::new(bar(count, max, width)).fg(Color::Cyan)
}

fn optional_cell(count: Option<u64>) -> Cell {
    match count {
        Some(value) => Cell::new(value),
        None => dim_cell(NO_DATA),
    }
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bar_scales_to_width() {
        assert_eq!(bar(10, 10, 4), "████");
        assert_eq!(bar(5, 10, 4), "██");
        assert_eq!(bar(1, 1000, 4), "█");
        assert_eq!(bar(0, 10, 4), "");
    }

    #[test]
    fn title_case_splits_on_underscore() {
        assert_eq!(title_case("AGE_GROUP"), "Age Group");
        assert_eq!(title_case("SEX"), "Sex");
    }

    #[test]
    fn condition_label_falls_back_to_column() {
        assert_eq!(condition_label("CHRONIC_KIDNEY"), "Chronic kidney disease");
        assert_eq!(condition_label("WARD"), "WARD");
    }
}
