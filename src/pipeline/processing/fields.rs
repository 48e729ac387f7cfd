//! Field-level helpers: coalescing, loose numeric parsing and key cleanup.

use crate::pipeline::table::{is_missing, Row};
use once_cell::sync::Lazy;
use regex::Regex;

/// Integers that went through a float column, e.g. `11998732214.0`.
static FLOAT_INTEGER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d+)\.0+$").expect("valid float-integer regex"));

/// Scientific notation as written by spreadsheet tools, e.g. `1.1998732214E10`.
static SCIENTIFIC_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d+(\.\d+)?[eE]\+?\d+$").expect("valid scientific regex"));

/// Returns the first candidate column holding a real value, or `""`.
///
/// Candidates are checked strictly in the given order, so callers put the
/// unit-level column before the fiscal/registration one.
pub fn coalesce(row: &Row<'_>, candidates: &[&str]) -> String {
    candidates
        .iter()
        .map(|column| row.get(column))
        .find(|value| !is_missing(value))
        .unwrap_or("")
        .to_string()
}

/// Parses a latitude/longitude cell. Anything that is not a finite number
/// yields `None`.
pub fn parse_coordinate(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed
        .replace(',', ".")
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
}

/// Renders a phone number without a decimal point or exponent.
///
/// Values that are not a float rendering of an integer (lists of numbers,
/// formatted numbers) are returned trimmed but otherwise untouched.
pub fn plain_integer(raw: &str) -> String {
    let trimmed = raw.trim();
    if let Some(caps) = FLOAT_INTEGER_RE.captures(trimmed) {
        return caps[1].to_string();
    }
    if SCIENTIFIC_RE.is_match(trimmed) {
        if let Ok(value) = trimmed.parse::<f64>() {
            if value.fract() == 0.0 && value < 1e18 {
                return format!("{value:.0}");
            }
        }
    }
    trimmed.to_string()
}

/// Join key for CNPJ values coming from different sources: digits only,
/// leading zeros dropped, so `"00.123.456/0001-90"`, `"123456000190"` and
/// `"123456000190.0"` all match.
pub fn cnpj_key(raw: &str) -> String {
    let integer = plain_integer(raw);
    let digits: String = integer.chars().filter(|c| c.is_ascii_digit()).collect();
    let key = digits.trim_start_matches('0');
    if key.is_empty() && !digits.is_empty() {
        "0".to_string()
    } else {
        key.to_string()
    }
}
