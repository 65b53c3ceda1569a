use chrono::{DateTime, Datelike, Month, NaiveDate, NaiveDateTime};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use statrs::statistics::Statistics;

use crate::error::SalesError;
use crate::models::{NumericColumn, RawRecord, RawTable, SalesRecord, SalesTable, MONTH_COLUMN};

/// Date-only formats accepted in the `Date` column, tried in order.
const DATE_FORMATS: [&str; 6] = [
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%m/%d/%Y",
    "%d-%m-%Y",
    "%d %B %Y",
    "%B %d, %Y",
];

const DATETIME_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"];

/// How one numeric column was filled.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnFill {
    pub column: String,
    /// Mean of the values that were present
    pub mean: f64,
    /// Number of cells that received the mean
    pub filled: usize,
}

/// What cleaning found and changed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CleaningReport {
    /// Missing values per required column, before filling
    pub missing: IndexMap<String, usize>,
    pub fills: Vec<ColumnFill>,
}

impl CleaningReport {
    pub fn total_missing(&self) -> usize {
        self.missing.values().sum()
    }
}

/// Parse a calendar date in any of the accepted formats.
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(value, fmt).ok())
        .or_else(|| {
            DATETIME_FORMATS
                .iter()
                .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
                .map(|dt| dt.date())
        })
        .or_else(|| {
            DateTime::parse_from_rfc3339(value)
                .ok()
                .map(|dt| dt.date_naive())
        })
}

/// Calendar month of a date.
pub fn month_of(date: NaiveDate) -> Month {
    // month() is always 1..=12
    Month::try_from(date.month() as u8).unwrap_or(Month::January)
}

/// Fill every missing value of each numeric column with the mean of that column's present values.
///
/// Columns with nothing missing are left untouched and produce no [`ColumnFill`].
pub fn fill_missing_with_mean(records: &mut [RawRecord]) -> Result<Vec<ColumnFill>, SalesError> {
    let mut fills = Vec::new();

    for column in NumericColumn::ALL {
        let present: Vec<f64> = records
            .iter()
            .filter_map(|r| column.get(r))
            .filter(|v| v.is_finite())
            .collect();
        let missing = records.len() - present.len();
        if missing == 0 {
            continue;
        }
        if present.is_empty() {
            return Err(SalesError::InsufficientData(format!(
                "column '{column}' has no values to average"
            )));
        }

        let mean = present.iter().mean();
        for record in records.iter_mut() {
            let slot = column.slot(record);
            if !slot.is_some_and(f64::is_finite) {
                *slot = Some(mean);
            }
        }

        tracing::info!(column = column.name(), mean, filled = missing, "filled missing values");
        fills.push(ColumnFill {
            column: column.name().to_string(),
            mean,
            filled: missing,
        });
    }

    Ok(fills)
}

fn numeric(record: &RawRecord, column: NumericColumn) -> Result<f64, SalesError> {
    column.get(record).ok_or_else(|| {
        SalesError::InsufficientData(format!("column '{column}' still has missing values"))
    })
}

fn to_sales_record(record: RawRecord, row: usize) -> Result<SalesRecord, SalesError> {
    // An empty date cell is a missing value; text that is not a date is fatal.
    let date = match record.date.as_deref().map(str::trim).filter(|d| !d.is_empty()) {
        Some(raw_date) => Some(parse_date(raw_date).ok_or_else(|| SalesError::DateParse {
            row,
            value: raw_date.to_string(),
        })?),
        None => None,
    };

    Ok(SalesRecord {
        date,
        quantity: numeric(&record, NumericColumn::Quantity)?,
        price: numeric(&record, NumericColumn::Price)?,
        total_sales: numeric(&record, NumericColumn::TotalSales)?,
        product: record.product,
        region: record.region,
        month: date.map(month_of),
    })
}

/// Clean a loaded table: fill numeric gaps, parse dates, derive the month column.
///
/// Consumes the raw table; the cleaned snapshot is the only thing later stages see.
pub fn clean_table(raw: RawTable) -> Result<(SalesTable, CleaningReport), SalesError> {
    let missing = raw.missing_counts();
    let RawTable {
        name,
        mut columns,
        mut records,
    } = raw;

    let fills = fill_missing_with_mean(&mut records)?;

    let records = records
        .into_iter()
        .enumerate()
        .map(|(i, r)| to_sales_record(r, i + 1))
        .collect::<Result<Vec<_>, _>>()?;

    if !columns.iter().any(|c| c == MONTH_COLUMN) {
        columns.push(MONTH_COLUMN.to_string());
    }

    tracing::debug!(rows = records.len(), "cleaning completed");
    Ok((
        SalesTable {
            name,
            columns,
            records,
        },
        CleaningReport { missing, fills },
    ))
}
