mod csv_io;
mod json_io;

use std::path::Path;

use crate::error::SalesError;
use crate::models::{RawTable, REQUIRED_COLUMNS};

pub use csv_io::{read_csv, read_csv_from_bytes, write_csv};
pub use json_io::{read_json, read_json_from_bytes, write_json};

/// Trait for reading a raw sales table from a file.
pub trait TableReader {
    fn read(&self, path: &Path) -> Result<RawTable, SalesError>;
}

/// CSV format reader.
pub struct CsvFormat;

impl TableReader for CsvFormat {
    fn read(&self, path: &Path) -> Result<RawTable, SalesError> {
        read_csv(path)
    }
}

/// JSON format reader: an array of objects keyed by column name.
pub struct JsonFormat;

impl TableReader for JsonFormat {
    fn read(&self, path: &Path) -> Result<RawTable, SalesError> {
        read_json(path)
    }
}

/// Pick a reader from the file extension. Anything that is not `.json` is read as CSV.
pub fn reader_for(path: &Path) -> Box<dyn TableReader> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();

    match ext.as_str() {
        "json" => Box::new(JsonFormat),
        _ => Box::new(CsvFormat),
    }
}

/// Load a sales table, choosing the format from the extension.
///
/// A missing file is reported as [`SalesError::InputNotFound`] by the format
/// reader; every other failure is passed through unchanged.
pub fn read_table(path: impl AsRef<Path>) -> Result<RawTable, SalesError> {
    let path = path.as_ref();
    let table = reader_for(path).read(path)?;
    tracing::info!(
        path = %path.display(),
        rows = table.num_records(),
        columns = table.columns.len(),
        "loaded sales table"
    );
    Ok(table)
}

pub(crate) fn ensure_exists(path: &Path) -> Result<(), SalesError> {
    if path.is_file() {
        Ok(())
    } else {
        Err(SalesError::InputNotFound(path.to_path_buf()))
    }
}

pub(crate) fn check_required_columns(columns: &[String]) -> Result<(), SalesError> {
    for required in REQUIRED_COLUMNS {
        if !columns.iter().any(|c| c == required) {
            return Err(SalesError::MissingColumn(required.to_string()));
        }
    }
    Ok(())
}

pub(crate) fn table_name(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| "Unknown".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
Date,Product,Region,Quantity,Price,Total_Sales
2024-01-05,Laptop,North,2,500,1000
2024-02-10,Phone,South,3,,900
";

    #[test]
    fn test_read_table_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.csv");
        let err = read_table(&path).unwrap_err();
        assert!(matches!(err, SalesError::InputNotFound(p) if p == path));
    }

    #[test]
    fn test_read_table_dispatches_csv() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sales.csv");
        std::fs::write(&path, SAMPLE).unwrap();
        let table = read_table(&path).unwrap();
        assert_eq!(table.shape(), (2, 6));
        assert_eq!(table.name, "sales");
    }

    #[test]
    fn test_csv_json_trait_agree() {
        let dir = tempfile::tempdir().unwrap();
        let csv_path = dir.path().join("sales.csv");
        std::fs::write(&csv_path, SAMPLE).unwrap();

        let from_csv = CsvFormat.read(&csv_path).unwrap();
        let json_path = dir.path().join("sales.json");
        write_json(&from_csv, &json_path, true).unwrap();

        let reader = reader_for(&json_path);
        let from_json = reader.read(&json_path).unwrap();
        assert_eq!(from_json.records, from_csv.records);
    }

    #[test]
    fn test_check_required_columns() {
        let mut columns: Vec<String> = REQUIRED_COLUMNS.iter().map(|c| c.to_string()).collect();
        assert!(check_required_columns(&columns).is_ok());
        columns.retain(|c| c != "Region");
        let err = check_required_columns(&columns).unwrap_err();
        assert!(matches!(err, SalesError::MissingColumn(c) if c == "Region"));
    }

    #[test]
    fn test_column_names_are_case_sensitive() {
        let columns: Vec<String> = ["date", "Product", "Region", "Quantity", "Price", "Total_Sales"]
            .iter()
            .map(|c| c.to_string())
            .collect();
        assert!(check_required_columns(&columns).is_err());
    }
}
