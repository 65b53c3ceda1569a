use std::io::Read;
use std::path::Path;

use crate::error::SalesError;
use crate::models::{RawRecord, RawTable};

use super::{check_required_columns, ensure_exists, table_name};

fn parse_csv_records<R: Read>(
    rdr: &mut csv::Reader<R>,
    name: String,
) -> Result<RawTable, SalesError> {
    let columns: Vec<String> = rdr.headers()?.iter().map(String::from).collect();
    check_required_columns(&columns)?;

    let mut table = RawTable::new(name, columns);
    for result in rdr.deserialize() {
        let record: RawRecord = result?;
        table.records.push(record);
    }

    Ok(table)
}

fn builder() -> csv::ReaderBuilder {
    let mut builder = csv::ReaderBuilder::new();
    builder.has_headers(true).trim(csv::Trim::All);
    builder
}

/// Read a sales table from a CSV file.
pub fn read_csv(path: impl AsRef<Path>) -> Result<RawTable, SalesError> {
    let path = path.as_ref();
    ensure_exists(path)?;
    let mut rdr = builder().from_path(path)?;
    parse_csv_records(&mut rdr, table_name(path))
}

/// Read a sales table from CSV bytes.
pub fn read_csv_from_bytes(data: &[u8], name: &str) -> Result<RawTable, SalesError> {
    let mut rdr = builder().from_reader(data);
    parse_csv_records(&mut rdr, name.to_string())
}

/// Write the required columns of a raw table to a CSV file. Missing values are written as empty cells.
pub fn write_csv(table: &RawTable, path: impl AsRef<Path>) -> Result<(), SalesError> {
    let mut wtr = csv::Writer::from_path(path.as_ref())?;
    for record in &table.records {
        wtr.serialize(record)?;
    }
    wtr.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_csv_from_bytes() {
        let data = b"Date,Product,Region,Quantity,Price,Total_Sales\n\
2024-01-05,Laptop,North,2,500,1000\n\
2024-01-06,Phone,South,1,300,300\n";
        let table = read_csv_from_bytes(data, "bytes").unwrap();
        assert_eq!(table.name, "bytes");
        assert_eq!(table.num_records(), 2);
        assert_eq!(table.records[0].product.as_deref(), Some("Laptop"));
        assert_eq!(table.records[1].total_sales, Some(300.0));
    }

    #[test]
    fn test_empty_cells_are_missing() {
        let data = b"Date,Product,Region,Quantity,Price,Total_Sales\n\
2024-01-05,Laptop,North,,500,\n";
        let table = read_csv_from_bytes(data, "t").unwrap();
        let r = &table.records[0];
        assert_eq!(r.quantity, None);
        assert_eq!(r.price, Some(500.0));
        assert_eq!(r.total_sales, None);
    }

    #[test]
    fn test_whitespace_is_trimmed() {
        let data = b"Date, Product ,Region,Quantity,Price,Total_Sales\n\
 2024-01-05 , Laptop ,North, 2 ,500,1000\n";
        let table = read_csv_from_bytes(data, "t").unwrap();
        assert_eq!(table.records[0].date.as_deref(), Some("2024-01-05"));
        assert_eq!(table.records[0].product.as_deref(), Some("Laptop"));
        assert_eq!(table.records[0].quantity, Some(2.0));
    }

    #[test]
    fn test_extra_columns_are_kept_in_column_list() {
        let data = b"Date,Product,Region,Quantity,Price,Total_Sales,Salesperson\n\
2024-01-05,Laptop,North,2,500,1000,Asha\n";
        let table = read_csv_from_bytes(data, "t").unwrap();
        assert_eq!(table.columns.len(), 7);
        assert_eq!(table.columns[6], "Salesperson");
        assert_eq!(table.num_records(), 1);
    }

    #[test]
    fn test_missing_required_column_is_error() {
        let data = b"Date,Product,Quantity,Price,Total_Sales\n2024-01-05,Laptop,2,500,1000\n";
        let err = read_csv_from_bytes(data, "t").unwrap_err();
        assert!(matches!(err, SalesError::MissingColumn(c) if c == "Region"));
    }

    #[test]
    fn test_non_numeric_quantity_is_error() {
        let data = b"Date,Product,Region,Quantity,Price,Total_Sales\n2024-01-05,Laptop,North,two,500,1000\n";
        let err = read_csv_from_bytes(data, "t").unwrap_err();
        assert!(matches!(err, SalesError::Csv(_)));
    }

    #[test]
    fn test_nan_and_na_cells_are_missing() {
        let data = b"Date,Product,Region,Quantity,Price,Total_Sales
2024-01-05,Laptop,North,2,NaN,1000
2024-01-06,Phone,NULL,NA,300,nan
N/A,#N/A,South,1,<NA>,inf
";
        let table = read_csv_from_bytes(data, "t").unwrap();
        assert_eq!(table.records[0].price, None);
        assert_eq!(table.records[1].region, None);
        assert_eq!(table.records[1].quantity, None);
        assert_eq!(table.records[1].total_sales, None);
        assert_eq!(table.records[2].date, None);
        assert_eq!(table.records[2].product, None);
        assert_eq!(table.records[2].price, None);
        assert_eq!(table.records[2].total_sales, None);
        assert_eq!(table.missing_counts()["Price"], 2);
    }

    #[test]
    fn test_missing_file_is_input_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.csv");
        let err = read_csv(&path).unwrap_err();
        assert!(matches!(err, SalesError::InputNotFound(p) if p == path));
    }

    #[test]
    fn test_header_only_file_has_no_records() {
        let data = b"Date,Product,Region,Quantity,Price,Total_Sales\n";
        let table = read_csv_from_bytes(data, "t").unwrap();
        assert_eq!(table.shape(), (0, 6));
    }

    #[test]
    fn test_write_then_read_keeps_missing_values() {
        let data = b"Date,Product,Region,Quantity,Price,Total_Sales\n\
2024-01-05,Laptop,North,2,,1000\n";
        let table = read_csv_from_bytes(data, "t").unwrap();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.csv");
        write_csv(&table, &path).unwrap();

        let loaded = read_csv(&path).unwrap();
        assert_eq!(loaded.records, table.records);
        assert_eq!(loaded.name, "out");
    }
}
