mod format;
mod markdown;

pub use format::{format_count, format_money, format_number, format_quantity};
pub use markdown::{build_report, generate_report, write_report, TIMESTAMP_FORMAT};
