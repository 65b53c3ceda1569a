use colored::Colorize;
use comfy_table::{modifiers::UTF8_ROUND_CORNERS, presets::UTF8_FULL, Cell, ContentArrangement, Table};

use crate::analysis::{CleaningReport, SalesMetrics};
use crate::models::RawTable;
use crate::report::{format_money, format_number, format_quantity};

use super::ChartPaths;

fn new_table(header: Vec<&str>) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(header);
    table
}

/// Format the load status: shape and column names.
pub fn format_load_summary(table: &RawTable) -> String {
    let (rows, cols) = table.shape();
    let mut output = String::new();
    output.push_str(&format!(
        "{} Shape: ({rows}, {cols})\n",
        "Data loaded successfully.".green()
    ));
    output.push_str(&format!("Columns: {:?}\n", table.columns));
    output
}

/// Print the load status.
pub fn print_load_summary(table: &RawTable) {
    print!("{}", format_load_summary(table));
}

/// Format missing-value counts and the fills applied during cleaning.
pub fn format_cleaning_report(report: &CleaningReport) -> String {
    let mut output = String::new();
    output.push_str(&format!("\n{}\n", "Data Cleaning Steps".bold().green()));
    output.push_str(&format!("{}\n", "=".repeat(50)));

    let mut table = new_table(vec!["Column", "Missing"]);
    for (column, count) in &report.missing {
        table.add_row(vec![Cell::new(column), Cell::new(count)]);
    }
    output.push_str(&format!("{table}\n"));

    for fill in &report.fills {
        output.push_str(&format!(
            "  - Filled missing values in '{}' with mean: {}\n",
            fill.column,
            format_number(fill.mean, 2)
        ));
    }
    output.push_str(&format!("{}\n", "Data cleaning completed.".green()));
    output
}

/// Print the cleaning summary.
pub fn print_cleaning_report(report: &CleaningReport) {
    print!("{}", format_cleaning_report(report));
}

/// Format the five metrics as console tables.
pub fn format_metrics(metrics: &SalesMetrics, currency: &str) -> String {
    let mut output = String::new();
    output.push_str(&format!("\n{}\n", "Sales Metrics".bold().green()));
    output.push_str(&format!("{}\n", "=".repeat(50)));

    let mut summary = new_table(vec!["Metric", "Value"]);
    summary.add_row(vec![
        Cell::new("Total Sales Revenue"),
        Cell::new(format_money(metrics.total_sales, currency)),
    ]);
    summary.add_row(vec![
        Cell::new("Best-selling Product"),
        Cell::new(format!(
            "{} ({} units sold)",
            metrics.best_product,
            format_quantity(metrics.best_product_qty)
        )),
    ]);
    summary.add_row(vec![
        Cell::new("Average Transaction Value"),
        Cell::new(format_money(metrics.avg_transaction, currency)),
    ]);
    output.push_str(&format!("{summary}\n"));

    output.push_str(&format!("\n{}\n", "Regional Sales".bold()));
    let mut regions = new_table(vec!["Region", "Revenue", "% Total"]);
    for (group, (_, share)) in metrics.regional_sales.iter().zip(metrics.region_shares()) {
        regions.add_row(vec![
            Cell::new(&group.key),
            Cell::new(format_money(group.total, currency)),
            Cell::new(format!("{share:.1}%")),
        ]);
    }
    output.push_str(&format!("{regions}\n"));

    output.push_str(&format!("\n{}\n", "Monthly Sales Trend".bold()));
    let mut months = new_table(vec!["Month", "Revenue"]);
    for group in &metrics.monthly_sales {
        months.add_row(vec![
            Cell::new(&group.key),
            Cell::new(format_money(group.total, currency)),
        ]);
    }
    output.push_str(&format!("{months}\n"));
    output
}

/// Print the metrics tables.
pub fn print_metrics(metrics: &SalesMetrics, currency: &str) {
    print!("{}", format_metrics(metrics, currency));
}

/// Format the list of chart files written.
pub fn format_chart_paths(paths: &ChartPaths) -> String {
    let mut output = String::new();
    output.push_str(&format!("\n{}\n", "Visualizations".bold().green()));
    for path in paths.all() {
        output.push_str(&format!("  {} {}\n", "Saved:".green(), path.display()));
    }
    output
}

/// Print the chart files written.
pub fn print_chart_paths(paths: &ChartPaths) {
    print!("{}", format_chart_paths(paths));
}
