//! Risk Report
//!
//! Evaluates every region in a snapshot and collects the verdicts into one
//! serializable report, with a console summary for the CLI.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::alert::mitigation::suggest;
use crate::alert::thresholds::{classify_reading, exceeded_limits, latest_reading, RiskReason};
use crate::analysis::groupings::days_for_region;
use crate::model::{Reading, RiskVerdict};
use crate::regions::find_region;

// ============================================================================
// Report structures
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct RiskReport {
    pub generated_at: String,
    pub regions: Vec<RegionRisk>,
    pub summary: RiskSummary,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RiskSummary {
    pub total: usize,
    pub high: usize,
    pub normal: usize,
    pub no_data: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct RegionRisk {
    pub region: String,
    /// Registry description; unregistered regions have none.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<&'static str>,
    pub verdict: RiskVerdict,
    pub reasons: Vec<RiskReason>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latest: Option<LatestReading>,
    pub days_with_data: usize,
    pub suggested_actions: Vec<&'static str>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LatestReading {
    pub soil_moisture: f64,
    pub terrain_inclination: f64,
    pub recorded_at: String,
}

// ============================================================================
// Building
// ============================================================================

fn evaluate_region(readings: &[Reading], region: &str) -> RegionRisk {
    let latest = latest_reading(readings, region);
    let reasons = latest.map(exceeded_limits).unwrap_or_default();
    let verdict = latest.map(classify_reading).unwrap_or(RiskVerdict::NoData);
    let suggested_actions = suggest(readings, region)
        .map(|plan| plan.actions.iter().map(|a| a.title).collect())
        .unwrap_or_default();

    RegionRisk {
        region: region.to_string(),
        description: find_region(region).map(|r| r.description),
        verdict,
        reasons,
        latest: latest.map(|r| LatestReading {
            soil_moisture: r.soil_moisture,
            terrain_inclination: r.terrain_inclination,
            recorded_at: r.timestamp.display(),
        }),
        days_with_data: days_for_region(readings, region).len(),
        suggested_actions,
    }
}

/// Evaluates each of `regions` against the snapshot at time `now`.
pub fn build_report<R: AsRef<str>>(
    readings: &[Reading],
    regions: &[R],
    now: DateTime<Utc>,
) -> RiskReport {
    let regions: Vec<RegionRisk> = regions
        .iter()
        .map(|r| evaluate_region(readings, r.as_ref()))
        .collect();

    let mut summary = RiskSummary {
        total: regions.len(),
        ..RiskSummary::default()
    };
    for region in &regions {
        match region.verdict {
            RiskVerdict::High => summary.high += 1,
            RiskVerdict::Normal => summary.normal += 1,
            RiskVerdict::NoData => summary.no_data += 1,
        }
    }

    RiskReport {
        generated_at: now.to_rfc3339(),
        regions,
        summary,
    }
}

// ============================================================================
// Console output
// ============================================================================

pub fn print_summary(report: &RiskReport) {
    println!("\n{}", "=".repeat(60));
    println!("RISK REPORT  ({})", report.generated_at);
    println!("{}", "=".repeat(60));

    for region in &report.regions {
        let marker = match region.verdict {
            RiskVerdict::High => "⚠️",
            RiskVerdict::Normal => "✅",
            RiskVerdict::NoData => "  ",
        };
        println!("\n{} {} — {}", marker, region.region, region.verdict);
        if let Some(description) = region.description {
            println!("   {}", description);
        }
        match &region.latest {
            Some(latest) => println!(
                "   latest: {}% moisture, {}° inclination at {} ({} day(s) of data)",
                latest.soil_moisture,
                latest.terrain_inclination,
                latest.recorded_at,
                region.days_with_data
            ),
            None => println!("   no readings recorded"),
        }
        for action in &region.suggested_actions {
            println!("   → {}", action);
        }
    }

    let s = &report.summary;
    println!("\n{}", "-".repeat(60));
    println!(
        "{} region(s): {} high, {} normal, {} without data",
        s.total, s.high, s.normal, s.no_data
    );
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alert::thresholds::classify;
    use crate::ingest::timestamp::parse_reading_date;
    use chrono::TimeZone;

    fn reading_at(soil: f64, incl: f64, region: &str, date: &str) -> Reading {
        Reading {
            soil_moisture: soil,
            terrain_inclination: incl,
            region: region.to_string(),
            timestamp: parse_reading_date(date).expect("fixture date should parse"),
        }
    }

    fn fixed_now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 5, 3, 12, 0, 0).unwrap()
    }

    fn fixture() -> Vec<Reading> {
        vec![
            reading_at(40.0, 10.0, "Calm", "2025-05-01T08:00:00"),
            reading_at(45.0, 12.0, "Calm", "02/05/2025 08:00:00"),
            reading_at(85.0, 10.0, "Wet", "2025-05-02T08:00:00"),
            reading_at(70.0, 30.0, "Edge", "2025-05-02T08:00:00"),
        ]
    }

    #[test]
    fn test_summary_counts_each_verdict() {
        let report = build_report(&fixture(), &["Calm", "Wet", "Empty"], fixed_now());
        assert_eq!(
            report.summary,
            RiskSummary {
                total: 3,
                high: 1,
                normal: 1,
                no_data: 1
            }
        );
        assert_eq!(report.generated_at, "2025-05-03T12:00:00+00:00");
    }

    #[test]
    fn test_region_verdicts_agree_with_classifier() {
        let readings = fixture();
        let report = build_report(&readings, &["Calm", "Wet", "Edge", "Empty"], fixed_now());
        assert_eq!(report.regions[2].verdict, RiskVerdict::Normal);
        for region in &report.regions {
            assert_eq!(region.verdict, classify(&readings, &region.region));
        }
    }

    #[test]
    fn test_region_details() {
        let report = build_report(&fixture(), &["Calm", "Wet", "Empty"], fixed_now());

        let calm = &report.regions[0];
        assert_eq!(calm.days_with_data, 2);
        assert_eq!(calm.latest.as_ref().unwrap().recorded_at, "02/05/2025 08:00");
        assert!(calm.suggested_actions.is_empty());

        let wet = &report.regions[1];
        assert_eq!(wet.reasons, vec![RiskReason::SaturatedSoil]);
        assert!(!wet.suggested_actions.is_empty());

        let empty = &report.regions[2];
        assert!(empty.latest.is_none());
        assert_eq!(empty.days_with_data, 0);
    }

    #[test]
    fn test_registered_regions_carry_their_description() {
        let vale = "Vale do Itajaí (Santa Catarina)";
        let readings = vec![reading_at(40.0, 10.0, vale, "2025-05-01T08:00:00")];
        let report = build_report(&readings, &[vale, "Calm"], fixed_now());

        let description = report.regions[0].description.expect("registered region");
        assert!(description.contains("landslides"));
        assert!(report.regions[1].description.is_none());

        let json = serde_json::to_value(&report).unwrap();
        assert!(json["regions"][1].get("description").is_none());
    }

    #[test]
    fn test_report_serializes_to_json() {
        let report = build_report(&fixture(), &["Wet"], fixed_now());
        let json = serde_json::to_value(&report).expect("report should serialize");
        assert_eq!(json["regions"][0]["verdict"], "high");
        assert_eq!(json["regions"][0]["reasons"][0], "saturated_soil");
        assert_eq!(json["summary"]["high"], 1);
    }
}
