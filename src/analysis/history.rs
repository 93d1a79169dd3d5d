/// Reading history listing.
use serde::Serialize;

use crate::model::Reading;

/// One row of the history view.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistoryEntry {
    pub soil_moisture: f64,
    pub terrain_inclination: f64,
    pub region: String,
    /// "DD/MM/YYYY HH:mm"
    pub recorded_at: String,
}

/// Readings for `region` (or all, when `None`) in store order.
pub fn history(readings: &[Reading], region: Option<&str>) -> Vec<HistoryEntry> {
    readings
        .iter()
        .filter(|r| region.is_none_or(|name| r.region == name))
        .map(|r| HistoryEntry {
            soil_moisture: r.soil_moisture,
            terrain_inclination: r.terrain_inclination,
            region: r.region.clone(),
            recorded_at: r.timestamp.display(),
        })
        .collect()
}
