/// Region registry for the terrain monitoring service.
///
/// Lists the regions offered when recording a reading. The registry only
/// seeds pickers and default configuration: the analysis functions always
/// take an explicit region list, and the set that actually matters is
/// whatever appears in the data (`regions_in`).
use crate::model::Reading;

// ---------------------------------------------------------------------------
// Region metadata
// ---------------------------------------------------------------------------

/// A monitored region.
pub struct Region {
    /// Exact name stored on readings.
    pub name: &'static str,
    /// Why the region is monitored.
    pub description: &'static str,
}

/// All regions offered for new readings, in picker order.
pub static REGION_REGISTRY: &[Region] = &[
    Region {
        name: "Polígono das Secas (Nordeste)",
        description: "Semi-arid northeast. Long dry spells followed by intense rain \
                      leave exposed soil prone to runoff and erosion.",
    },
    Region {
        name: "Sudoeste Baiano (Bahia)",
        description: "Plateau and hill country in southwest Bahia with steep cuts \
                      along roads and farmland.",
    },
    Region {
        name: "Região do Cerrado (Centro-Oeste)",
        description: "Savanna soils that saturate quickly during the wet season.",
    },
    Region {
        name: "Vale do Itajaí (Santa Catarina)",
        description: "River valley with a history of floods and landslides on \
                      saturated hillsides.",
    },
    Region {
        name: "Região Sul (Paraná, SC, RS)",
        description: "Southern highlands; steep slopes combined with frequent \
                      frontal rain.",
    },
];

/// Names of every registered region, in picker order.
pub fn all_region_names() -> Vec<&'static str> {
    REGION_REGISTRY.iter().map(|r| r.name).collect()
}

/// Look up a registered region by its exact name.
pub fn find_region(name: &str) -> Option<&'static Region> {
    REGION_REGISTRY.iter().find(|r| r.name == name)
}

/// Distinct regions present in `readings`, in order of first appearance.
///
/// Unregistered names are included: any region string is accepted.
pub fn regions_in(readings: &[Reading]) -> Vec<String> {
    let mut seen: Vec<String> = Vec::new();
    for reading in readings {
        if !reading.region.is_empty() && !seen.contains(&reading.region) {
            seen.push(reading.region.clone());
        }
    }
    seen
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
