#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(table) = sales_analyzer::io::read_json_from_bytes(data, "fuzz") {
        let _ = sales_analyzer::analysis::clean_table(table);
    }
});
