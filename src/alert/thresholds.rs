//! Risk threshold checking.
//!
//! A region is at high risk when its most recent reading shows saturated
//! soil or a steep slope. Either condition alone is enough.

use serde::Serialize;

use crate::model::{Reading, RiskVerdict};

/// Soil moisture (%) above which a reading is high risk.
pub const SOIL_MOISTURE_LIMIT: f64 = 70.0;

/// Terrain inclination (°) above which a reading is high risk.
pub const TERRAIN_INCLINATION_LIMIT: f64 = 30.0;

/// Which limit a reading exceeded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskReason {
    SaturatedSoil,
    SteepTerrain,
}

/// The most recent reading for `region`.
///
/// When several readings share the latest timestamp, the one stored first
/// wins.
pub fn latest_reading<'a>(readings: &'a [Reading], region: &str) -> Option<&'a Reading> {
    let mut latest: Option<&'a Reading> = None;
    for reading in readings.iter().filter(|r| r.region == region) {
        if latest.is_none_or(|best| reading.timestamp.datetime() > best.timestamp.datetime()) {
            latest = Some(reading);
        }
    }
    latest
}

/// Limits exceeded by a single reading, moisture first.
pub fn exceeded_limits(reading: &Reading) -> Vec<RiskReason> {
    let mut reasons = Vec::new();
    if reading.soil_moisture > SOIL_MOISTURE_LIMIT {
        reasons.push(RiskReason::SaturatedSoil);
    }
    if reading.terrain_inclination > TERRAIN_INCLINATION_LIMIT {
        reasons.push(RiskReason::SteepTerrain);
    }
    reasons
}

/// Classifies a single reading. Limits are strict: exactly 70 % is normal.
pub fn classify_reading(reading: &Reading) -> RiskVerdict {
    if exceeded_limits(reading).is_empty() {
        RiskVerdict::Normal
    } else {
        RiskVerdict::High
    }
}

/// Classifies the most recent reading for `region`.
pub fn classify(readings: &[Reading], region: &str) -> RiskVerdict {
    latest_reading(readings, region)
        .map(classify_reading)
        .unwrap_or(RiskVerdict::NoData)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
