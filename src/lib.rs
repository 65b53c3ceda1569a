pub mod analysis;
pub mod config;
pub mod error;
pub mod io;
pub mod models;
pub mod report;
pub mod visualization;

pub use analysis::{Analyzer, RunOutcome};
pub use config::{AnalyzerConfig, MonthSelection};
pub use error::SalesError;
pub use io::{read_table, TableReader};
pub use models::{RawRecord, RawTable, SalesRecord, SalesTable};
