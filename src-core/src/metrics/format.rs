//! Text rendering for metric values.

/// `0.1234` -> `"12.34%"`
pub fn format_percent(value: f64) -> String {
    format!("{:.2}%", value * 100.0)
}

/// `1234.5` -> `"$1,234.50"`, `-3.0` -> `"-$3.00"`
pub fn format_money(value: f64) -> String {
    let rounded = format!("{:.2}", value.abs());
    let (int_part, frac_part) = rounded.split_once('.').unwrap_or((rounded.as_str(), "00"));
    let sign = if value < 0.0 && rounded != "0.00" { "-" } else { "" };
    format!("{sign}${}.{frac_part}", group_thousands(int_part))
}

/// ROAS style plain number with two decimals.
pub fn format_ratio(value: f64) -> String {
    format!("{:.2}", value)
}

/// Counts keep up to three fraction digits, trailing zeros trimmed.
pub fn format_count(value: f64) -> String {
    let rounded = format!("{:.3}", value.abs());
    let (int_part, frac_part) = rounded.split_once('.').unwrap_or((rounded.as_str(), ""));
    let frac_part = frac_part.trim_end_matches('0');
    let is_zero = int_part == "0" && frac_part.is_empty();
    let sign = if value < 0.0 && !is_zero { "-" } else { "" };
    if frac_part.is_empty() {
        format!("{sign}{}", group_thousands(int_part))
    } else {
        format!("{sign}{}.{frac_part}", group_thousands(int_part))
    }
}

fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
