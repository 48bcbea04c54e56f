//! Converts loosely formatted spreadsheet cells into finite numbers.
//!
//! Published sheets mix currency strings, thousands separators and spreadsheet
//! error tokens into numeric columns. None of that is an error here: anything
//! that does not read as a number counts as zero.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref CURRENCY_NOISE: Regex = Regex::new(r"[$,]").unwrap();
    static ref LEADING_NUMBER: Regex =
        Regex::new(r"^[+-]?(?:\d+\.?\d*|\.\d+)(?:[eE][+-]?\d+)?").unwrap();
}

/// Tokens that spreadsheets and upstream exporters emit in place of a value.
const NULL_TOKENS: [&str; 5] = ["", "#DIV/0!", "NaN", "null", "undefined"];

/// A raw cell as it arrives from the sheet or from a caller.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RawCell<'a> {
    Text(&'a str),
    Number(f64),
    Missing,
}

impl<'a> From<&'a str> for RawCell<'a> {
    fn from(value: &'a str) -> Self {
        RawCell::Text(value)
    }
}

impl<'a> From<&'a String> for RawCell<'a> {
    fn from(value: &'a String) -> Self {
        RawCell::Text(value.as_str())
    }
}

impl From<f64> for RawCell<'_> {
    fn from(value: f64) -> Self {
        RawCell::Number(value)
    }
}

impl<'a, T: Into<RawCell<'a>>> From<Option<T>> for RawCell<'a> {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(RawCell::Missing)
    }
}

/// Normalize a cell to a finite number. Never fails.
pub fn normalize_number<'a>(value: impl Into<RawCell<'a>>) -> f64 {
    let parsed = match value.into() {
        RawCell::Number(n) => n,
        RawCell::Missing => 0.0,
        RawCell::Text(text) => parse_text(text),
    };
    if parsed.is_finite() {
        parsed
    } else {
        0.0
    }
}

fn parse_text(text: &str) -> f64 {
    let stripped = CURRENCY_NOISE.replace_all(text, "");
    let trimmed = stripped.trim();
    if NULL_TOKENS.contains(&trimmed) {
        return 0.0;
    }
    // Leading numeric prefix only, so "12.5%" reads as 12.5
    LEADING_NUMBER
        .find(trimmed)
        .and_then(|m| m.as_str().parse::<f64>().ok())
        .unwrap_or(0.0)
}
