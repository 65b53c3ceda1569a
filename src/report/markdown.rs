use std::path::Path;

use chrono::NaiveDateTime;

use crate::analysis::SalesMetrics;
use crate::error::SalesError;
use crate::models::SalesTable;

use super::format::{format_count, format_money, format_quantity};

/// Format of the `Generated on:` line.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Build the markdown analysis report.
///
/// Pure: the same table, metrics, timestamp and currency always give the same text.
pub fn build_report(
    table: &SalesTable,
    metrics: &SalesMetrics,
    generated_at: NaiveDateTime,
    currency: &str,
) -> String {
    let records = format_count(table.num_records());
    let period = match table.date_range() {
        Some((start, end)) => format!("{} to {}", start.format(DATE_FORMAT), end.format(DATE_FORMAT)),
        None => "n/a".to_string(),
    };

    let mut output = String::new();
    output.push_str("# Sales Analysis Report\n");
    output.push_str(&format!("Generated on: {}\n\n", generated_at.format(TIMESTAMP_FORMAT)));

    output.push_str("## Executive Summary\n");
    output.push_str(&format!("Total Sales Period: {period}\n"));
    output.push_str(&format!("Total Records Analyzed: {records}\n\n"));

    output.push_str("## Key Metrics\n");
    output.push_str(&format!(
        "1. **Total Revenue**: {}\n",
        format_money(metrics.total_sales, currency)
    ));
    output.push_str(&format!(
        "2. **Average Transaction Value**: {}\n",
        format_money(metrics.avg_transaction, currency)
    ));
    output.push_str(&format!(
        "3. **Best-selling Product**: {} ({} units)\n\n",
        metrics.best_product,
        format_quantity(metrics.best_product_qty)
    ));

    output.push_str("## Regional Performance\n");
    for (group, (_, share)) in metrics.regional_sales.iter().zip(metrics.region_shares()) {
        output.push_str(&format!(
            "- **{}**: {} ({share:.1}%)\n",
            group.key,
            format_money(group.total, currency)
        ));
    }

    output.push_str("\n## Monthly Trends\n");
    for month in &metrics.monthly_sales {
        output.push_str(&format!(
            "- **{}**: {}\n",
            month.key,
            format_money(month.total, currency)
        ));
    }

    output.push_str("\n## Data Quality\n");
    output.push_str("- Missing Values Handled: Yes\n");
    output.push_str("- Data Types Validated: Yes\n");
    output.push_str(&format!("- Records Processed: {records}\n\n"));

    output.push_str("## Recommendations\n");
    output.push_str(&format!(
        "1. Focus on promoting {} as it's the best seller\n",
        metrics.best_product
    ));
    output.push_str("2. Investigate opportunities in underperforming regions\n");
    output.push_str("3. Analyze seasonal trends for inventory planning\n");

    output
}

/// Write the report, replacing any previous file. Missing parent directories are created.
pub fn write_report(path: impl AsRef<Path>, content: &str) -> Result<(), SalesError> {
    let path = path.as_ref();
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, content)?;
    tracing::info!(path = %path.display(), bytes = content.len(), "saved analysis report");
    Ok(())
}

/// Build the report, write it to `path`, and return its text.
pub fn generate_report(
    table: &SalesTable,
    metrics: &SalesMetrics,
    generated_at: NaiveDateTime,
    currency: &str,
    path: impl AsRef<Path>,
) -> Result<String, SalesError> {
    let content = build_report(table, metrics, generated_at, currency);
    write_report(path, &content)?;
    Ok(content)
}
