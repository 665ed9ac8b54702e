use regex::Regex;

use crate::utils::error::{AppError, Result};

/// Decode a fetched body as UTF-8 text. Binary responses cannot carry a
/// matchable price and skip the item.
pub fn decode(body: &[u8]) -> Result<&str> {
    std::str::from_utf8(body)
        .map_err(|_| AppError::Extraction("response body is not valid UTF-8 text".to_string()))
}

/// Apply the item's pattern to the page text and parse its first capturing
/// group as the price.
pub fn extract(body: &str, pattern: &str) -> Result<f64> {
    let regex = Regex::new(pattern).map_err(|e| AppError::Pattern {
        pattern: pattern.to_string(),
        message: e.to_string(),
    })?;

    let captures = regex.captures(body).ok_or_else(|| {
        AppError::Extraction("pattern did not match the response body".to_string())
    })?;

    let group = captures.get(1).ok_or_else(|| AppError::Pattern {
        pattern: pattern.to_string(),
        message: "pattern has no capturing group".to_string(),
    })?;

    parse_price(group.as_str())
}

/// Strict decimal grammar: optional sign, digits, optional single decimal
/// point with digits. No exponents, no infinities, no separators; the
/// pattern is expected to isolate a bare number.
fn parse_price(raw: &str) -> Result<f64> {
    let grammar = Regex::new(r"^[+-]?\d+(\.\d+)?$").unwrap();
    if !grammar.is_match(raw) {
        return Err(AppError::Extraction(format!(
            "captured text '{raw}' is not a decimal number"
        )));
    }

    raw.parse::<f64>()
        .map_err(|_| AppError::Extraction(format!("captured text '{raw}' is not a decimal number")))
}
