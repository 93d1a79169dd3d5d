//! Terrain monitoring engine.
//!
//! Readings of soil moisture and terrain inclination, tagged by region and
//! time, are loaded from a local store, validated once at ingestion, and
//! then fed to pure functions that average them per day, lay regions over a
//! common timeline, project chart series, and classify the latest reading of
//! a region into a risk verdict.

pub mod alert;
pub mod analysis;
pub mod config;
pub mod ingest;
pub mod logging;
pub mod model;
pub mod regions;
pub mod report;
