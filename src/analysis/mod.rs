mod analyzer;
mod cleaning;
mod grouping;
mod metrics;

pub use analyzer::{AnalysisRun, Analyzer, RunOutcome};
pub use cleaning::{clean_table, fill_missing_with_mean, month_of, parse_date, CleaningReport, ColumnFill};
pub use grouping::{first_max, group_sum, sort_descending, GroupTotal};
pub use metrics::{compute_sales_metrics, product_summary, ProductSummary, SalesMetrics};
