use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while analyzing sales data.
#[derive(Error, Debug)]
pub enum SalesError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    Config(#[from] toml::de::Error),

    #[error("File not found: {}", .0.display())]
    InputNotFound(PathBuf),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Missing required column: {0}")]
    MissingColumn(String),

    #[error("Invalid date '{value}' in row {row}")]
    DateParse { row: usize, value: String },

    #[error("Insufficient data: {0}")]
    InsufficientData(String),

    #[error("Chart error: {0}")]
    Chart(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_display() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "access denied");
        let err = SalesError::from(io_err);
        let msg = err.to_string();
        assert!(msg.contains("IO error"));
        assert!(msg.contains("access denied"));
    }

    #[test]
    fn test_input_not_found_display() {
        let err = SalesError::InputNotFound(PathBuf::from("sales_data.csv"));
        assert_eq!(err.to_string(), "File not found: sales_data.csv");
    }

    #[test]
    fn test_parse_error_display() {
        let err = SalesError::ParseError("invalid format".to_string());
        assert_eq!(err.to_string(), "Parse error: invalid format");
    }

    #[test]
    fn test_missing_column_display() {
        let err = SalesError::MissingColumn("Total_Sales".to_string());
        assert_eq!(err.to_string(), "Missing required column: Total_Sales");
    }

    #[test]
    fn test_date_parse_display() {
        let err = SalesError::DateParse {
            row: 3,
            value: "not-a-date".to_string(),
        };
        assert_eq!(err.to_string(), "Invalid date 'not-a-date' in row 3");
    }

    #[test]
    fn test_insufficient_data_display() {
        let err = SalesError::InsufficientData("no records".to_string());
        assert_eq!(err.to_string(), "Insufficient data: no records");
    }

    #[test]
    fn test_json_error_from_conversion() {
        let result: Result<serde_json::Value, _> = serde_json::from_str("not valid json{{{");
        let json_err = result.unwrap_err();
        let err: SalesError = json_err.into();
        assert!(matches!(err, SalesError::Json(_)));
        assert!(err.to_string().contains("JSON error"));
    }

    #[test]
    fn test_config_error_from_conversion() {
        let result: Result<toml::Value, _> = toml::from_str("input = ");
        let err: SalesError = result.unwrap_err().into();
        assert!(matches!(err, SalesError::Config(_)));
    }
}
