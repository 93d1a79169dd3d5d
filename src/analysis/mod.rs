/// Data organization for the terrain monitoring engine.
///
/// Every function here is pure: it takes the snapshot of readings it is
/// given and recomputes from scratch, with no caching or I/O.
///
/// Submodules:
/// - `groupings` — per-day averages, optionally per region.
/// - `timeline` — the shared day axis across regions.
/// - `series` — chart series over a timeline or a single region's days.
/// - `history` — region-filtered listing of raw readings.
pub mod groupings;
pub mod history;
pub mod series;
pub mod timeline;

pub use groupings::aggregate;
pub use history::{history, HistoryEntry};
pub use series::{project_by_region, project_by_region_metric, project_filtered};
pub use timeline::build_timeline;
