/// Per-day aggregation of readings.
///
/// Groups readings by calendar day (optionally restricted to one region)
/// and averages both measured quantities within each day. Floating-point
/// summation follows input order, so compare means with a tolerance.
use std::collections::BTreeMap;

use crate::model::{DayAverage, DayKey, Reading};

#[derive(Default)]
struct DaySums {
    soil_moisture: f64,
    terrain_inclination: f64,
    count: usize,
}

/// Averages readings per calendar day, ascending by day.
///
/// When `region_filter` is `Some`, only readings whose region matches it
/// exactly are considered. Days without any matching reading are absent.
pub fn aggregate(readings: &[Reading], region_filter: Option<&str>) -> Vec<DayAverage> {
    let mut by_day: BTreeMap<DayKey, DaySums> = BTreeMap::new();

    for reading in readings
        .iter()
        .filter(|r| region_filter.is_none_or(|region| r.region == region))
    {
        let sums = by_day.entry(reading.timestamp.day()).or_default();
        sums.soil_moisture += reading.soil_moisture;
        sums.terrain_inclination += reading.terrain_inclination;
        sums.count += 1;
    }

    // BTreeMap iteration is already chronological
    by_day
        .into_iter()
        .map(|(day, sums)| {
            let n = sums.count as f64;
            DayAverage {
                day,
                soil_moisture_mean: sums.soil_moisture / n,
                terrain_inclination_mean: sums.terrain_inclination / n,
            }
        })
        .collect()
}

/// The sorted distinct days on which `region` has readings.
pub fn days_for_region(readings: &[Reading], region: &str) -> Vec<DayKey> {
    aggregate(readings, Some(region))
        .into_iter()
        .map(|avg| avg.day)
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
