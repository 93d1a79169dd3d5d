//! Risk evaluation over a region's most recent reading.
//!
//! - `thresholds` — the fixed moisture / inclination limits and the classifier.
//! - `mitigation` — suggested field actions once a region is high risk.

pub mod mitigation;
pub mod thresholds;

pub use thresholds::{classify, latest_reading};
