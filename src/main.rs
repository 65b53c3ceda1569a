use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use tracing_subscriber::EnvFilter;

use sales_analyzer::{Analyzer, AnalyzerConfig, MonthSelection, RunOutcome};

#[derive(Parser)]
#[command(
    name = "sales-analyzer",
    about = "Sales Data Analysis Tool - cleans sales records, computes metrics, draws charts and writes a report",
    version,
    author
)]
struct Cli {
    /// TOML file with input, output and currency settings
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Path to input file (CSV or JSON) [default: sales_data.csv]
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Directory for chart images [default: screenshots]
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Path of the markdown report [default: analysis_report.md]
    #[arg(short, long)]
    report: Option<PathBuf>,

    /// Currency symbol for amounts
    #[arg(long)]
    currency: Option<String>,

    /// Limit the trend chart to January through April
    #[arg(long)]
    legacy_months: bool,
}

fn build_config(cli: &Cli) -> Result<AnalyzerConfig> {
    let mut config = match &cli.config {
        Some(path) => AnalyzerConfig::from_file(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?,
        None => AnalyzerConfig::default(),
    };

    if let Some(input) = &cli.input {
        config.input = input.clone();
    }
    if let Some(dir) = &cli.output_dir {
        config.output_dir = dir.clone();
    }
    if let Some(report) = &cli.report {
        config.report_path = report.clone();
    }
    if let Some(currency) = &cli.currency {
        config.currency = currency.clone();
    }
    if cli.legacy_months {
        config.month_selection = MonthSelection::Legacy;
    }
    Ok(config)
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();
    let cli = Cli::parse();
    let config = build_config(&cli)?;

    println!("{}", "=".repeat(60));
    println!("{}", "SALES DATA ANALYSIS TOOL".bold().cyan());
    println!("{}", "=".repeat(60));

    let analyzer = Analyzer::new(config).with_console(true);
    match analyzer.run()? {
        RunOutcome::Completed(run) => {
            println!("\n{}", "=".repeat(60));
            println!("{}", "ANALYSIS COMPLETED SUCCESSFULLY!".bold().green());
            println!("{}", "=".repeat(60));
            println!("\nOutput Files Generated:");
            println!("  - {} (Detailed analysis)", run.report_path.display());
            println!(
                "  - {} (Visualization charts)",
                analyzer.config().output_dir.display()
            );
        }
        // Already reported by the loader; a missing input is not a failure.
        RunOutcome::InputMissing(_) => {}
    }

    Ok(())
}
