/// Reading timestamp parsing.
///
/// The store has held two date representations over its lifetime: an
/// ISO-like sortable string ("2025-05-01T08:00:00") and the pt-BR locale
/// display string ("01/05/2025 08:00:00"). This module sniffs which one a
/// record carries and resolves it into a `ReadingTimestamp` once, at
/// ingestion, so nothing downstream ever looks at date strings.
use chrono::{DateTime, NaiveDate, NaiveDateTime};

use crate::model::{ReadingError, ReadingTimestamp};

const ISO_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
];

const LOCALE_DATETIME_FORMATS: &[&str] = &[
    "%d/%m/%Y %H:%M:%S",
    "%d/%m/%Y %H:%M",
    "%d/%m/%Y, %H:%M:%S",
    "%d/%m/%Y, %H:%M",
];

/// The representation a date string appears to be written in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateForm {
    Iso,
    Locale,
}

/// Guesses the representation from the date separator, without validating.
pub fn sniff(date: &str) -> Option<DateForm> {
    let bytes = date.trim().as_bytes();
    match (bytes.get(4), bytes.get(2)) {
        (Some(b'-'), _) => Some(DateForm::Iso),
        (_, Some(b'/')) => Some(DateForm::Locale),
        _ => None,
    }
}

/// Parses a stored date string in either supported representation.
///
/// Offsets on ISO strings ("Z", "-03:00") are accepted but not applied: the
/// wall-clock time as written is kept.
pub fn parse_reading_date(date: &str) -> Result<ReadingTimestamp, ReadingError> {
    let trimmed = date.trim();
    let unparseable = || ReadingError::UnparseableDate(date.to_string());

    match sniff(trimmed).ok_or_else(unparseable)? {
        DateForm::Iso => parse_iso(trimmed)
            .map(ReadingTimestamp::Iso)
            .ok_or_else(unparseable),
        DateForm::Locale => parse_locale(trimmed)
            .map(ReadingTimestamp::Locale)
            .ok_or_else(unparseable),
    }
}

fn parse_iso(s: &str) -> Option<NaiveDateTime> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.naive_local());
    }
    ISO_DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(s, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
}

fn parse_locale(s: &str) -> Option<NaiveDateTime> {
    LOCALE_DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(s, "%d/%m/%Y")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
