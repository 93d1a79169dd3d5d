/// Chart series projection.
///
/// Two modes, deliberately asymmetric:
/// - multi-region: every region is laid over a shared timeline, and a day a
///   region has no data for is filled with `0.0` so all series stay aligned;
/// - single-region: the axis is only the days that region has data for, so
///   nothing is filled.
use std::collections::HashMap;

use crate::analysis::groupings::aggregate;
use crate::model::{DayKey, FilteredSeries, Metric, Reading, Series};

/// Placeholder for a day on which a region has no readings.
pub const NO_DATA_VALUE: f64 = 0.0;

/// Step between the hues of consecutive region series.
pub const HUE_STEP_DEGREES: usize = 60;

/// Colour of the soil-moisture line in single-region mode.
pub const SOIL_MOISTURE_COLOR: &str = "#1976D2";

/// Colour of the terrain-inclination line in single-region mode.
pub const TERRAIN_INCLINATION_COLOR: &str = "#64B5F6";

/// Colour for the series at `index`, stable for a given region ordering.
pub fn series_color(index: usize) -> String {
    format!("hsl({}, 70%, 50%)", (index * HUE_STEP_DEGREES) % 360)
}

/// Renders a day key the way chart axes show it ("DD/MM").
pub fn axis_label(day: &DayKey) -> String {
    day.date().format("%d/%m").to_string()
}

/// Soil-moisture series per region over `timeline`.
pub fn project_by_region<R: AsRef<str>>(
    readings: &[Reading],
    regions: &[R],
    timeline: &[DayKey],
) -> Vec<Series> {
    project_by_region_metric(readings, regions, timeline, Metric::SoilMoisture)
}

/// One series per region for `metric`, each exactly `timeline.len()` long.
pub fn project_by_region_metric<R: AsRef<str>>(
    readings: &[Reading],
    regions: &[R],
    timeline: &[DayKey],
    metric: Metric,
) -> Vec<Series> {
    regions
        .iter()
        .enumerate()
        .map(|(index, region)| {
            let region = region.as_ref();
            let by_day: HashMap<DayKey, f64> = aggregate(readings, Some(region))
                .iter()
                .map(|avg| (avg.day, metric.of(avg)))
                .collect();

            Series {
                label: region.to_string(),
                color: series_color(index),
                values: timeline
                    .iter()
                    .map(|day| by_day.get(day).copied().unwrap_or(NO_DATA_VALUE))
                    .collect(),
            }
        })
        .collect()
}

/// Both metrics for `region`, on that region's own days only.
pub fn project_filtered(readings: &[Reading], region: &str) -> FilteredSeries {
    let mut projection = FilteredSeries::default();
    for avg in aggregate(readings, Some(region)) {
        projection.days.push(avg.day);
        projection.soil_moisture.push(avg.soil_moisture_mean);
        projection.terrain_inclination.push(avg.terrain_inclination_mean);
    }
    projection
}

impl FilteredSeries {
    /// The single-region projection as labelled, coloured chart series.
    pub fn to_series(&self) -> Vec<Series> {
        vec![
            Series {
                label: Metric::SoilMoisture.label().to_string(),
                color: SOIL_MOISTURE_COLOR.to_string(),
                values: self.soil_moisture.clone(),
            },
            Series {
                label: Metric::TerrainInclination.label().to_string(),
                color: TERRAIN_INCLINATION_COLOR.to_string(),
                values: self.terrain_inclination.clone(),
            },
        ]
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
