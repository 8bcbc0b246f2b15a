//! Calendar date keys
//!
//! Puzzles are indexed by calendar date. The date string is also the only
//! input to fallback selection, so hashing it must be stable across runs
//! and platforms.

use crate::core::error::{EngineError, Result};
use chrono::{Duration, NaiveDate};

/// Format used for date keys (e.g. "2024-03-09")
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// 32-bit rolling hash of a date key: `hash = hash * 31 + unit`, wrapping
///
/// Iterates UTF-16 code units so non-ASCII keys hash the same way a
/// browser-side client would.
pub fn date_hash(date: &str) -> i32 {
    date.encode_utf16()
        .fold(0i32, |hash, unit| hash.wrapping_mul(31).wrapping_add(unit as i32))
}

/// Stable index into a collection of `len` entries for a date key
pub fn date_index(date: &str, len: usize) -> usize {
    if len == 0 {
        return 0;
    }
    (date_hash(date).unsigned_abs() as usize) % len
}

/// Parse a date key
pub fn parse_date(date: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(date, DATE_FORMAT)
        .map_err(|e| EngineError::Config(format!("Invalid date '{}': {}", date, e)))
}

/// All date keys from `from` to `to`, inclusive
pub fn date_range(from: &str, to: &str) -> Result<Vec<String>> {
    let start = parse_date(from)?;
    let end = parse_date(to)?;
    if end < start {
        return Err(EngineError::Config(format!(
            "Date range ends ({}) before it starts ({})",
            to, from
        )));
    }

    let mut dates = Vec::new();
    let mut current = start;
    while current <= end {
        dates.push(current.format(DATE_FORMAT).to_string());
        current += Duration::days(1);
    }
    Ok(dates)
}
