use std::path::Path;

use serde_json::{Map, Value};

use crate::error::SalesError;
use crate::models::{RawRecord, RawTable};

use super::{check_required_columns, ensure_exists, table_name};

fn parse_json_records(content: &str, name: String) -> Result<RawTable, SalesError> {
    let rows: Vec<Map<String, Value>> = serde_json::from_str(content)?;

    // Columns in order of first appearance across all objects.
    let mut columns: Vec<String> = Vec::new();
    for row in &rows {
        for key in row.keys() {
            if !columns.contains(key) {
                columns.push(key.clone());
            }
        }
    }
    check_required_columns(&columns)?;

    let mut table = RawTable::new(name, columns);
    for row in rows {
        let record: RawRecord = serde_json::from_value(Value::Object(row))?;
        table.records.push(record);
    }
    Ok(table)
}

/// Read a sales table from a JSON file holding an array of row objects.
pub fn read_json(path: impl AsRef<Path>) -> Result<RawTable, SalesError> {
    let path = path.as_ref();
    ensure_exists(path)?;
    let content = std::fs::read_to_string(path)?;
    parse_json_records(&content, table_name(path))
}

/// Read a sales table from JSON bytes.
pub fn read_json_from_bytes(data: &[u8], name: &str) -> Result<RawTable, SalesError> {
    let content = std::str::from_utf8(data)
        .map_err(|e| SalesError::ParseError(format!("Invalid UTF-8: {e}")))?;
    parse_json_records(content, name.to_string())
}

/// Write a raw table to a JSON file as an array of row objects.
pub fn write_json(table: &RawTable, path: impl AsRef<Path>, pretty: bool) -> Result<(), SalesError> {
    let content = if pretty {
        serde_json::to_string_pretty(&table.records)?
    } else {
        serde_json::to_string(&table.records)?
    };
    std::fs::write(path.as_ref(), content)?;
    Ok(())
}
