/// Common day axis across regions.
use std::collections::BTreeSet;

use crate::analysis::groupings::days_for_region;
use crate::model::{DayKey, Reading};

/// Unions every day on which any of `regions` has data, ascending.
///
/// A day covered by several regions appears once. Readings from regions not
/// listed in `regions` do not contribute.
pub fn build_timeline<R: AsRef<str>>(readings: &[Reading], regions: &[R]) -> Vec<DayKey> {
    let days: BTreeSet<DayKey> = regions
        .iter()
        .flat_map(|region| days_for_region(readings, region.as_ref()))
        .collect();
    days.into_iter().collect()
}
