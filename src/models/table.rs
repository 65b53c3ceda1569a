use chrono::NaiveDate;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::{RawRecord, SalesRecord};

/// Columns every input file must provide, spelled exactly as in the header.
pub const REQUIRED_COLUMNS: [&str; 6] = ["Date", "Product", "Region", "Quantity", "Price", "Total_Sales"];

/// Column added by cleaning.
pub const MONTH_COLUMN: &str = "Month";

/// The table as loaded from disk.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawTable {
    /// Name of the source, usually the file stem
    pub name: String,
    /// Column headers in file order, including any extra columns
    pub columns: Vec<String>,
    pub records: Vec<RawRecord>,
}

impl RawTable {
    pub fn new(name: impl Into<String>, columns: Vec<String>) -> Self {
        Self {
            name: name.into(),
            columns,
            records: Vec::new(),
        }
    }

    /// `(rows, columns)`.
    pub fn shape(&self) -> (usize, usize) {
        (self.records.len(), self.columns.len())
    }

    pub fn num_records(&self) -> usize {
        self.records.len()
    }

    /// Count of missing values for each required column, in header order.
    pub fn missing_counts(&self) -> IndexMap<String, usize> {
        let mut counts: IndexMap<String, usize> = REQUIRED_COLUMNS
            .iter()
            .map(|c| (c.to_string(), 0))
            .collect();

        for r in &self.records {
            let missing = [
                r.date.is_none(),
                r.product.is_none(),
                r.region.is_none(),
                !r.quantity.is_some_and(f64::is_finite),
                !r.price.is_some_and(f64::is_finite),
                !r.total_sales.is_some_and(f64::is_finite),
            ];
            for (column, is_missing) in REQUIRED_COLUMNS.iter().zip(missing) {
                if is_missing {
                    if let Some(count) = counts.get_mut(*column) {
                        *count += 1;
                    }
                }
            }
        }

        counts
    }
}

/// The cleaned table. Read-only once produced.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SalesTable {
    pub name: String,
    /// Input columns plus `Month`
    pub columns: Vec<String>,
    pub records: Vec<SalesRecord>,
}

impl SalesTable {
    pub fn num_records(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Earliest and latest transaction dates. Undated records are ignored;
    /// `None` when no record has a date.
    pub fn date_range(&self) -> Option<(NaiveDate, NaiveDate)> {
        let mut dates = self.records.iter().filter_map(|r| r.date);
        let first = dates.next()?;
        Some(dates.fold((first, first), |(lo, hi), d| (lo.min(d), hi.max(d))))
    }
}
