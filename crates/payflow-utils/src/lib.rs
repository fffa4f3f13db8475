//! Formatting and escaping helpers shared by the page renderers

use rust_decimal::{Decimal, RoundingStrategy};

/// Insert a separator between every group of three digits, from the right
pub fn group_thousands(digits: &str, separator: &str) -> String {
    let mut result = String::new();
    let mut count = 0;
    for c in digits.chars().rev() {
        if count == 3 {
            result.push_str(&separator.chars().rev().collect::<String>());
            count = 0;
        }
        result.push(c);
        count += 1;
    }
    result.chars().rev().collect()
}

/// Format a decimal amount with a fixed number of places and grouped
/// integer digits, e.g. `1234567.5` -> `1,234,567.50`
pub fn format_decimal(value: &Decimal, decimal_places: u32, thousands_sep: &str, decimal_sep: &str) -> String {
    let rounded = value.round_dp_with_strategy(decimal_places, RoundingStrategy::MidpointAwayFromZero);
    let negative = rounded.is_sign_negative() && !rounded.is_zero();
    let text = rounded.abs().to_string();

    let (int_part, frac_part) = match text.split_once('.') {
        Some((i, f)) => (i.to_string(), f.to_string()),
        None => (text.clone(), String::new()),
    };

    let mut frac = frac_part;
    while (frac.len() as u32) < decimal_places {
        frac.push('0');
    }

    let mut out = String::new();
    if negative {
        out.push('-');
    }
    out.push_str(&group_thousands(&int_part, thousands_sep));
    if decimal_places > 0 {
        out.push_str(decimal_sep);
        out.push_str(&frac);
    }
    out
}

/// Escape text for safe inclusion in HTML bodies and quoted attributes
pub fn escape_html(content: &str) -> String {
    let mut out = String::with_capacity(content.len());
    for c in content.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// First letter of a name, upper-cased, for avatar badges
pub fn initial(name: &str) -> String {
    name.trim()
        .chars()
        .next()
        .map(|c| c.to_uppercase().collect())
        .unwrap_or_else(|| "?".to_string())
}
