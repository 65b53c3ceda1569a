mod record;
mod table;

pub use record::{NumericColumn, RawRecord, SalesRecord, MISSING_MARKERS};
pub use table::{RawTable, SalesTable, MONTH_COLUMN, REQUIRED_COLUMNS};
