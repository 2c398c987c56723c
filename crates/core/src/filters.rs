//! Query-string filter parsing for list endpoints.
//!
//! List endpoints accept id sets as comma-separated strings (`?genres=1,2`),
//! free-text substrings (`?title=star`) and calendar dates (`?date=2022-06-02`).
//! These helpers turn the raw strings into typed values, reporting malformed
//! input as [`CoreError::Validation`].

use chrono::NaiveDate;

use crate::error::CoreError;
use crate::types::DbId;

/// Parse a comma-separated id list such as `"1,2, 3"`.
///
/// Empty segments are skipped and duplicates removed (first occurrence
/// wins). Returns `Ok(None)` when the input holds no ids at all, meaning
/// the filter should not be applied.
pub fn parse_id_list(raw: &str, name: &str) -> Result<Option<Vec<DbId>>, CoreError> {
    let mut ids: Vec<DbId> = Vec::new();
    for part in raw.split(',') {
        let part = part.trim();
        if part.is_empty() {
            continue;
        }
        let id: DbId = part.parse().map_err(|_| {
            CoreError::Validation(format!("{name} must be a comma-separated list of ids, got '{part}'"))
        })?;
        if !ids.contains(&id) {
            ids.push(id);
        }
    }
    Ok(if ids.is_empty() { None } else { Some(ids) })
}

/// Parse an optional id-list query parameter.
pub fn parse_optional_id_list(
    raw: Option<&str>,
    name: &str,
) -> Result<Option<Vec<DbId>>, CoreError> {
    match raw {
        Some(raw) => parse_id_list(raw, name),
        None => Ok(None),
    }
}

/// Build a case-insensitive `ILIKE` pattern matching `needle` as a substring.
///
/// `%`, `_` and `\` in the needle are escaped so they match literally.
/// Blank needles yield `None` (no filtering).
pub fn substring_pattern(needle: Option<&str>) -> Option<String> {
    let needle = needle?.trim();
    if needle.is_empty() {
        return None;
    }
    let mut pattern = String::with_capacity(needle.len() + 2);
    pattern.push('%');
    for c in needle.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    Some(pattern)
}

/// Parse a single id filter such as `?movie=3`.
pub fn parse_id(raw: &str, name: &str) -> Result<DbId, CoreError> {
    raw.trim()
        .parse()
        .map_err(|_| CoreError::Validation(format!("{name} must be an id, got '{raw}'")))
}

/// Parse an ISO `YYYY-MM-DD` date filter.
pub fn parse_date(raw: &str, name: &str) -> Result<NaiveDate, CoreError> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").map_err(|_| {
        CoreError::Validation(format!("{name} must be a date in YYYY-MM-DD format, got '{raw}'"))
    })
}
