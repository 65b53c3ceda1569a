#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Loading and cleaning must return an error, never panic.
    if let Ok(table) = sales_analyzer::io::read_csv_from_bytes(data, "fuzz") {
        if let Ok((cleaned, _)) = sales_analyzer::analysis::clean_table(table) {
            let _ = sales_analyzer::analysis::compute_sales_metrics(&cleaned);
        }
    }
});
