//! End-to-end scenarios for the aggregation and risk engine.
//!
//! Readings enter through `ingest::normalize` exactly as they would from the
//! store, including both stored date representations and string-typed
//! numbers, and flow through the public analysis and alert API.

use terrain_watch::alert::classify;
use terrain_watch::analysis::{aggregate, build_timeline, project_by_region, project_filtered};
use terrain_watch::ingest::normalize;
use terrain_watch::model::{DayKey, NumericField, RawReading, Reading, RiskVerdict};

const TOLERANCE: f64 = 1e-9;

// ---------------------------------------------------------------------------
// Test Helpers
// ---------------------------------------------------------------------------

fn raw(soil: impl Into<NumericField>, incl: impl Into<NumericField>, region: &str, date: &str) -> RawReading {
    RawReading {
        soil_moisture: soil.into(),
        terrain_inclination: incl.into(),
        region: region.to_string(),
        date: date.to_string(),
    }
}

fn ingest(records: &[RawReading]) -> Vec<Reading> {
    normalize(records).readings
}

fn day(y: i32, m: u32, d: u32) -> DayKey {
    DayKey::from_ymd(y, m, d).unwrap()
}

/// A mixed history: two regions, both date forms, string and number fields.
fn mixed_history() -> Vec<Reading> {
    ingest(&[
        raw("35", "12", "Vale do Itajaí (Santa Catarina)", "28/04/2025 09:10:00"),
        raw(45.0, 14.0, "Vale do Itajaí (Santa Catarina)", "2025-04-28T17:00:00"),
        raw("72", "18", "Vale do Itajaí (Santa Catarina)", "2025-04-30T08:00:00"),
        raw("20", "33", "Região Sul (Paraná, SC, RS)", "29/04/2025 11:00:00"),
        raw("25", "28", "Região Sul (Paraná, SC, RS)", "2025-04-30T10:00:00"),
        raw("oops", "28", "Região Sul (Paraná, SC, RS)", "2025-05-01T10:00:00"),
        raw("25", "28", "Região Sul (Paraná, SC, RS)", "someday"),
    ])
}

const VALE: &str = "Vale do Itajaí (Santa Catarina)";
const SUL: &str = "Região Sul (Paraná, SC, RS)";

// ---------------------------------------------------------------------------
// Named scenarios
// ---------------------------------------------------------------------------

#[test]
fn test_scenario_wet_soil_is_high_risk() {
    let readings = ingest(&[raw(80.0, 10.0, "X", "2025-05-01T08:00:00")]);
    assert_eq!(classify(&readings, "X"), RiskVerdict::High);
}

#[test]
fn test_scenario_steep_slope_is_high_risk() {
    let readings = ingest(&[raw(40.0, 35.0, "X", "2025-05-01T08:00:00")]);
    assert_eq!(classify(&readings, "X"), RiskVerdict::High);
}

#[test]
fn test_scenario_same_day_mean() {
    let readings = ingest(&[
        raw(40.0, 10.0, "X", "2025-05-01T08:00:00"),
        raw(60.0, 20.0, "X", "2025-05-01T16:30:00"),
    ]);
    let days = aggregate(&readings, None);
    assert_eq!(days.len(), 1);
    assert!((days[0].soil_moisture_mean - 50.0).abs() < TOLERANCE);
    assert!((days[0].terrain_inclination_mean - 15.0).abs() < TOLERANCE);
}

#[test]
fn test_scenario_empty_history_is_no_data() {
    assert_eq!(classify(&[], "X"), RiskVerdict::NoData);
}

#[test]
fn test_scenario_partial_coverage_is_zero_filled() {
    let readings = ingest(&[
        raw(30.0, 5.0, "A", "2025-05-01T08:00:00"),
        raw(50.0, 6.0, "B", "2025-05-01T08:00:00"),
        raw(70.0, 7.0, "B", "2025-05-02T08:00:00"),
    ]);
    let regions = ["A", "B"];
    let timeline = build_timeline(&readings, &regions);
    assert_eq!(timeline, vec![day(2025, 5, 1), day(2025, 5, 2)]);

    let series = project_by_region(&readings, &regions, &timeline);
    assert_eq!(series[0].values, vec![30.0, 0.0]);
    assert_eq!(series[1].values, vec![50.0, 70.0]);
}

// ---------------------------------------------------------------------------
// Properties over a mixed history
// ---------------------------------------------------------------------------

#[test]
fn test_malformed_records_never_reach_the_engine() {
    let readings = mixed_history();
    assert_eq!(readings.len(), 5);
    for avg in aggregate(&readings, None) {
        assert!(avg.soil_moisture_mean.is_finite());
        assert!(avg.terrain_inclination_mean.is_finite());
    }
}

#[test]
fn test_aggregate_days_strictly_ascending() {
    let readings = mixed_history();
    for filter in [None, Some(VALE), Some(SUL)] {
        let days: Vec<DayKey> = aggregate(&readings, filter).iter().map(|a| a.day).collect();
        assert!(days.windows(2).all(|w| w[0] < w[1]), "filter {:?}: {:?}", filter, days);
    }
}

#[test]
fn test_mixed_date_forms_group_on_the_written_day() {
    let readings = mixed_history();
    let vale = aggregate(&readings, Some(VALE));
    assert_eq!(vale[0].day, day(2025, 4, 28));
    assert!((vale[0].soil_moisture_mean - 40.0).abs() < TOLERANCE);
    assert!((vale[0].terrain_inclination_mean - 13.0).abs() < TOLERANCE);
}

#[test]
fn test_timeline_is_union_and_series_are_aligned() {
    let readings = mixed_history();
    let regions = [VALE, SUL];
    let timeline = build_timeline(&readings, &regions);
    assert_eq!(timeline, vec![day(2025, 4, 28), day(2025, 4, 29), day(2025, 4, 30)]);

    for series in project_by_region(&readings, &regions, &timeline) {
        assert_eq!(series.values.len(), timeline.len());
    }
    for region in regions {
        let filtered = project_filtered(&readings, region);
        assert!(filtered.days.len() <= timeline.len());
        assert_eq!(filtered.days.len(), filtered.soil_moisture.len());
        assert_eq!(filtered.days.len(), filtered.terrain_inclination.len());
    }
}

#[test]
fn test_latest_reading_drives_verdict() {
    let readings = mixed_history();
    // Vale's latest moisture is 72 %; Sul's latest slope (28°) is under the limit
    // even though an earlier one was 33°.
    assert_eq!(classify(&readings, VALE), RiskVerdict::High);
    assert_eq!(classify(&readings, SUL), RiskVerdict::Normal);
}

#[test]
fn test_engine_functions_are_repeatable() {
    let readings = mixed_history();
    let regions = [VALE, SUL];
    let timeline = build_timeline(&readings, &regions);

    assert_eq!(aggregate(&readings, None), aggregate(&readings, None));
    assert_eq!(timeline, build_timeline(&readings, &regions));
    assert_eq!(
        project_by_region(&readings, &regions, &timeline),
        project_by_region(&readings, &regions, &timeline)
    );
    assert_eq!(project_filtered(&readings, VALE), project_filtered(&readings, VALE));
    assert_eq!(classify(&readings, VALE), classify(&readings, VALE));
}
