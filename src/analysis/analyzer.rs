use std::path::PathBuf;

use chrono::{Local, NaiveDateTime};
use colored::Colorize;

use crate::analysis::{clean_table, compute_sales_metrics, CleaningReport, SalesMetrics};
use crate::config::AnalyzerConfig;
use crate::error::SalesError;
use crate::io::read_table;
use crate::models::{RawTable, SalesTable};
use crate::report::generate_report;
use crate::visualization::{
    generate_charts, print_chart_paths, print_cleaning_report, print_load_summary, print_metrics,
    ChartPaths,
};

/// Everything one completed run produced.
#[derive(Debug, Clone)]
pub struct AnalysisRun {
    pub table: SalesTable,
    pub cleaning: CleaningReport,
    pub metrics: SalesMetrics,
    pub charts: ChartPaths,
    pub report: String,
    pub report_path: PathBuf,
}

/// How a run ended without a fatal error.
#[derive(Debug, Clone)]
pub enum RunOutcome {
    Completed(Box<AnalysisRun>),
    /// The input file does not exist; nothing after loading ran.
    InputMissing(PathBuf),
}

/// Runs the load, clean, metrics, charts, report pipeline.
///
/// Each stage takes the previous stage's output by value or reference and
/// returns a new value, so stages cannot run out of order.
pub struct Analyzer {
    config: AnalyzerConfig,
    console: bool,
}

impl Analyzer {
    /// Create an analyzer that prints nothing to stdout.
    pub fn new(config: AnalyzerConfig) -> Self {
        Self {
            config,
            console: false,
        }
    }

    /// Print stage progress and tables to stdout.
    pub fn with_console(mut self, console: bool) -> Self {
        self.console = console;
        self
    }

    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    /// Load the input table. `Ok(None)` means the input file does not exist.
    pub fn load(&self) -> Result<Option<RawTable>, SalesError> {
        match read_table(&self.config.input) {
            Ok(table) => {
                if self.console {
                    print_load_summary(&table);
                }
                Ok(Some(table))
            }
            Err(SalesError::InputNotFound(path)) => {
                tracing::warn!(path = %path.display(), "input file not found");
                if self.console {
                    println!("{} {}", "File not found:".red().bold(), path.display());
                }
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }

    pub fn clean(&self, raw: RawTable) -> Result<(SalesTable, CleaningReport), SalesError> {
        let (table, report) = clean_table(raw)?;
        if self.console {
            print_cleaning_report(&report);
        }
        Ok((table, report))
    }

    pub fn calculate_metrics(&self, table: &SalesTable) -> Result<SalesMetrics, SalesError> {
        let metrics = compute_sales_metrics(table)?;
        if self.console {
            print_metrics(&metrics, &self.config.currency);
        }
        Ok(metrics)
    }

    pub fn visualize(&self, table: &SalesTable, metrics: &SalesMetrics) -> Result<ChartPaths, SalesError> {
        let paths = generate_charts(
            table,
            metrics,
            &self.config.output_dir,
            self.config.month_selection,
        )?;
        if self.console {
            print_chart_paths(&paths);
        }
        Ok(paths)
    }

    pub fn report(
        &self,
        table: &SalesTable,
        metrics: &SalesMetrics,
        generated_at: NaiveDateTime,
    ) -> Result<String, SalesError> {
        let text = generate_report(
            table,
            metrics,
            generated_at,
            &self.config.currency,
            &self.config.report_path,
        )?;
        if self.console {
            println!(
                "\n{} {}",
                "Report saved as".green(),
                self.config.report_path.display()
            );
        }
        Ok(text)
    }

    /// Run every stage, stamping the report with the current local time.
    pub fn run(&self) -> Result<RunOutcome, SalesError> {
        self.run_at(Local::now().naive_local())
    }

    /// Run every stage with a fixed report timestamp.
    pub fn run_at(&self, generated_at: NaiveDateTime) -> Result<RunOutcome, SalesError> {
        let Some(raw) = self.load()? else {
            return Ok(RunOutcome::InputMissing(self.config.input.clone()));
        };

        let (table, cleaning) = self.clean(raw)?;
        let metrics = self.calculate_metrics(&table)?;
        let charts = self.visualize(&table, &metrics)?;
        let report = self.report(&table, &metrics, generated_at)?;

        Ok(RunOutcome::Completed(Box::new(AnalysisRun {
            table,
            cleaning,
            metrics,
            charts,
            report,
            report_path: self.config.report_path.clone(),
        })))
    }
}
