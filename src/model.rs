/// Core data types for the terrain monitoring engine.
///
/// This module defines the shared domain model imported by all other modules.
/// It contains no I/O; the only logic here is small accessors on the types.
use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// Wire types
// ---------------------------------------------------------------------------

/// A numeric field as it appears in the persisted store.
///
/// Readings typed into the form are saved as strings ("45"), while readings
/// written by other tools may carry real JSON numbers. Both are accepted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NumericField {
    Number(f64),
    Text(String),
}

impl From<f64> for NumericField {
    fn from(value: f64) -> Self {
        NumericField::Number(value)
    }
}

impl From<&str> for NumericField {
    fn from(value: &str) -> Self {
        NumericField::Text(value.to_string())
    }
}

impl fmt::Display for NumericField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NumericField::Number(n) => write!(f, "{}", n),
            NumericField::Text(s) => write!(f, "{}", s),
        }
    }
}

/// One record exactly as stored in the reading store's JSON array.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawReading {
    pub soil_moisture: NumericField,
    pub terrain_inclination: NumericField,
    pub region: String,
    pub date: String, // "DD/MM/YYYY HH:mm[:ss]" or "YYYY-MM-DDTHH:mm:ss"
}

// ---------------------------------------------------------------------------
// Validated reading
// ---------------------------------------------------------------------------

/// When a reading was taken, tagged with the representation it was stored in.
///
/// Both variants hold the wall-clock time as written; no timezone conversion
/// is applied, so the calendar day is the day the user saw when recording.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadingTimestamp {
    /// Sortable form, e.g. "2025-05-01T08:00:00".
    Iso(NaiveDateTime),
    /// Locale display form, e.g. "01/05/2025 08:00:00".
    Locale(NaiveDateTime),
}

impl ReadingTimestamp {
    pub fn datetime(&self) -> NaiveDateTime {
        match self {
            ReadingTimestamp::Iso(dt) | ReadingTimestamp::Locale(dt) => *dt,
        }
    }

    /// The calendar-day grouping key.
    pub fn day(&self) -> DayKey {
        DayKey(self.datetime().date())
    }

    /// "DD/MM/YYYY HH:mm", the form shown in history listings.
    pub fn display(&self) -> String {
        self.datetime().format("%d/%m/%Y %H:%M").to_string()
    }
}

/// A single validated observation of soil moisture and terrain inclination.
///
/// Produced by `ingest::normalize` from a `RawReading`. Values are finite but
/// not range-checked: moisture is nominally 0–100 %, inclination 0–90°.
#[derive(Debug, Clone, PartialEq)]
pub struct Reading {
    pub soil_moisture: f64,
    pub terrain_inclination: f64,
    pub region: String,
    pub timestamp: ReadingTimestamp,
}

// ---------------------------------------------------------------------------
// Aggregated types
// ---------------------------------------------------------------------------

/// Calendar-day key. Orders chronologically; renders as "YYYY-MM-DD".
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DayKey(pub NaiveDate);

impl DayKey {
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, day).map(DayKey)
    }

    pub fn date(&self) -> NaiveDate {
        self.0
    }
}

impl fmt::Display for DayKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}

/// Mean of both measured quantities over all readings sharing a day
/// (and, when filtered, a region).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DayAverage {
    pub day: DayKey,
    pub soil_moisture_mean: f64,
    pub terrain_inclination_mean: f64,
}

/// The two measured quantities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    SoilMoisture,
    TerrainInclination,
}

impl Metric {
    pub fn of(&self, avg: &DayAverage) -> f64 {
        match self {
            Metric::SoilMoisture => avg.soil_moisture_mean,
            Metric::TerrainInclination => avg.terrain_inclination_mean,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Metric::SoilMoisture => "Soil moisture (%)",
            Metric::TerrainInclination => "Terrain inclination (°)",
        }
    }
}

/// A named numeric sequence aligned element-by-element to a day axis.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Series {
    pub label: String,
    pub color: String,
    pub values: Vec<f64>,
}

/// Both metrics for one region over that region's own days.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct FilteredSeries {
    pub days: Vec<DayKey>,
    pub soil_moisture: Vec<f64>,
    pub terrain_inclination: Vec<f64>,
}

// ---------------------------------------------------------------------------
// Risk types
// ---------------------------------------------------------------------------

/// Classification of a region's most recent reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskVerdict {
    NoData,
    Normal,
    High,
}

impl fmt::Display for RiskVerdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RiskVerdict::NoData => write!(f, "–"),
            RiskVerdict::Normal => write!(f, "OK"),
            RiskVerdict::High => write!(f, "HIGH"),
        }
    }
}

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Reasons a stored record cannot become a `Reading`.
#[derive(Debug, Clone, PartialEq)]
pub enum ReadingError {
    /// A measured quantity is not a finite number.
    MalformedNumber { field: &'static str, value: String },
    /// The date is in neither supported representation.
    UnparseableDate(String),
    /// The record carries no region name.
    MissingRegion,
    /// The stored element does not have the shape of a reading at all.
    MalformedRecord(String),
}

impl fmt::Display for ReadingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReadingError::MalformedNumber { field, value } => {
                write!(f, "Malformed {}: {:?}", field, value)
            }
            ReadingError::UnparseableDate(date) => write!(f, "Unparseable date: {:?}", date),
            ReadingError::MissingRegion => write!(f, "Missing region"),
            ReadingError::MalformedRecord(msg) => write!(f, "Malformed record: {}", msg),
        }
    }
}

impl std::error::Error for ReadingError {}
