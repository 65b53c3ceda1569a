//! Number formatting shared by the console tables, charts and the report.
use num_format::{Locale, ToFormattedString};

/// Format with a fixed number of decimals and `,` thousands separators, e.g. `1,234,567.89`.
pub fn format_number(n: f64, decimals: usize) -> String {
    let s = format!("{:.*}", decimals, n.abs());
    let (int_part, frac_part) = match s.split_once('.') {
        Some((int_part, frac)) => (int_part, Some(frac)),
        None => (s.as_str(), None),
    };

    let mut res = match int_part.parse::<u64>() {
        Ok(v) => v.to_formatted_string(&Locale::en),
        Err(_) => int_part.to_string(),
    };
    if let Some(frac) = frac_part {
        res.push('.');
        res.push_str(frac);
    }

    // Skip the sign when rounding produced zero ("-0.00").
    if n.is_sign_negative() && res.chars().any(|c| c.is_ascii_digit() && c != '0') {
        format!("-{res}")
    } else {
        res
    }
}

/// A currency amount with two decimals, e.g. `₹1,250.00`.
pub fn format_money(amount: f64, currency: &str) -> String {
    format!("{currency}{}", format_number(amount, 2))
}

/// A record count with thousands separators.
pub fn format_count(n: usize) -> String {
    n.to_formatted_string(&Locale::en)
}

/// Units sold: whole numbers without decimals, filled means with two.
pub fn format_quantity(q: f64) -> String {
    if q.fract() == 0.0 {
        format_number(q, 0)
    } else {
        format_number(q, 2)
    }
}
