use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::SalesError;

/// Which months the sales trend chart plots.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MonthSelection {
    /// Every month present in the data, in calendar order.
    #[default]
    Present,
    /// January through April only; other months are dropped from the chart.
    Legacy,
}

/// Paths and presentation settings for one analysis run.
///
/// Every field has a default, so an empty TOML file (or none at all) gives
/// `sales_data.csv` in, `screenshots/` and `analysis_report.md` out.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyzerConfig {
    pub input: PathBuf,
    pub output_dir: PathBuf,
    pub report_path: PathBuf,
    pub currency: String,
    pub month_selection: MonthSelection,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            input: PathBuf::from("sales_data.csv"),
            output_dir: PathBuf::from("screenshots"),
            report_path: PathBuf::from("analysis_report.md"),
            currency: "\u{20b9}".to_string(),
            month_selection: MonthSelection::Present,
        }
    }
}

impl AnalyzerConfig {
    pub fn from_toml_str(content: &str) -> Result<Self, SalesError> {
        Ok(toml::from_str(content)?)
    }

    /// Load a config file. Unlike the input table, a missing config file is an IO error.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, SalesError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&content)
    }
}
