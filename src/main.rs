//! `terrain_watch` command-line front end.
//!
//! Usage:
//!   terrain_watch record <soil_moisture> <terrain_inclination> <region>
//!   terrain_watch history [region]
//!   terrain_watch chart [region]
//!   terrain_watch risk <region>
//!   terrain_watch report [--json]
//!   terrain_watch clear

use std::error::Error;

use chrono::{Local, Utc};

use terrain_watch::alert::{classify, mitigation};
use terrain_watch::analysis::{self, series};
use terrain_watch::config::{self, Config, DEFAULT_CONFIG_FILE};
use terrain_watch::ingest::store::{JsonFileStore, ReadingStore};
use terrain_watch::ingest::{self, parse_reading};
use terrain_watch::logging::{self, Component};
use terrain_watch::model::{RawReading, Reading, RiskVerdict};
use terrain_watch::regions::{find_region, regions_in};
use terrain_watch::report;

const USAGE: &str = "usage: terrain_watch <record|history|chart|risk|report|clear> [args]";

fn main() -> Result<(), Box<dyn Error>> {
    let config_path =
        std::env::var("TERRAIN_WATCH_CONFIG").unwrap_or_else(|_| DEFAULT_CONFIG_FILE.to_string());
    let config = config::load_config(&config_path)?;
    logging::init_logger(
        config.log.min_level()?,
        config.log.file.as_deref(),
        config.log.console_timestamps,
    );

    logging::debug(
        Component::System,
        None,
        &format!("Using store at {}", config.store_path),
    );
    let store = JsonFileStore::new(&config.store_path);
    let args: Vec<String> = std::env::args().skip(1).collect();

    match args.first().map(String::as_str) {
        Some("record") => record(&store, &config, &args[1..]),
        Some("history") => {
            history(&load(&store), args.get(1).map(String::as_str));
            Ok(())
        }
        Some("chart") => {
            chart(&load(&store), args.get(1).map(String::as_str));
            Ok(())
        }
        Some("risk") => {
            let region = args.get(1).ok_or("risk: missing <region>")?;
            risk(&load(&store), region);
            Ok(())
        }
        Some("report") => {
            let readings = load(&store);
            let report = report::build_report(&readings, &regions_in(&readings), Utc::now());
            if args.iter().any(|a| a == "--json") {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                report::print_summary(&report);
            }
            Ok(())
        }
        Some("clear") => {
            store.clear()?;
            logging::info(Component::Store, None, "Reading history cleared");
            Ok(())
        }
        _ => Err(USAGE.into()),
    }
}

/// Loads and validates the current snapshot.
fn load(store: &JsonFileStore) -> Vec<Reading> {
    ingest::normalize(&store.load_all_or_empty()).readings
}

fn record(store: &JsonFileStore, config: &Config, args: &[String]) -> Result<(), Box<dyn Error>> {
    let [soil, incl, region] = args else {
        return Err("record: expected <soil_moisture> <terrain_inclination> <region>".into());
    };
    if !config.regions.iter().any(|r| r == region) {
        logging::warn(
            Component::Store,
            Some(region.as_str()),
            "Region is not in the configured list",
        );
    }
    if find_region(region).is_none() {
        logging::debug(
            Component::Store,
            Some(region.as_str()),
            "Region is not in the built-in registry",
        );
    }

    let raw = RawReading {
        soil_moisture: soil.as_str().into(),
        terrain_inclination: incl.as_str().into(),
        region: region.clone(),
        date: Local::now().format("%Y-%m-%dT%H:%M:%S").to_string(),
    };
    // Refuse to persist anything the analysis would later drop
    parse_reading(&raw)?;
    store.append(raw)?;
    println!("✓ Reading saved for {}", region);
    Ok(())
}

fn history(readings: &[Reading], region: Option<&str>) {
    let entries = analysis::history(readings, region);
    if entries.is_empty() {
        println!("No readings found.");
        return;
    }
    for entry in entries {
        println!(
            "🌱 {} | 📐 {}°  {}  {}",
            entry.soil_moisture, entry.terrain_inclination, entry.region, entry.recorded_at
        );
    }
}

fn chart(readings: &[Reading], region: Option<&str>) {
    let (labels, lines) = match region {
        Some(region) => {
            let projection = analysis::project_filtered(readings, region);
            (projection.days.clone(), projection.to_series())
        }
        None => {
            let regions = regions_in(readings);
            let timeline = analysis::build_timeline(readings, &regions);
            let lines = analysis::project_by_region(readings, &regions, &timeline);
            (timeline, lines)
        }
    };

    logging::debug(
        Component::Analysis,
        region,
        &format!("Charting {} line(s) over {} day(s)", lines.len(), labels.len()),
    );
    if labels.is_empty() {
        println!("No data to chart.");
        return;
    }
    let header: Vec<String> = labels.iter().map(series::axis_label).collect();
    println!("{:<32} {}", "", header.join(" "));
    for line in lines {
        let values: Vec<String> = line.values.iter().map(|v| format!("{:>5.1}", v)).collect();
        println!("{:<32} {}", line.label, values.join(" "));
    }
}

fn risk(readings: &[Reading], region: &str) {
    let verdict = classify(readings, region);
    println!("Current risk for {}: {}", region, verdict);
    if let Some(registered) = find_region(region) {
        println!("   {}", registered.description);
    }

    if verdict == RiskVerdict::High {
        logging::warn(Component::Risk, Some(region), "High risk detected");
        if let Some(plan) = mitigation::suggest(readings, region) {
            println!("Suggested actions:");
            for action in plan.actions {
                println!("   → {}: {}", action.title, action.description);
            }
        }
    }
}
