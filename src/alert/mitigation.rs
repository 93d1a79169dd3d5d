//! Mitigation suggestions for high-risk regions.
//!
//! Entering `RiskVerdict::High` is the only trigger for suggestions; a
//! normal or empty region gets none.

use serde::Serialize;

use crate::alert::thresholds::{exceeded_limits, latest_reading, RiskReason};
use crate::model::Reading;

/// A recommended field action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MitigationAction {
    pub id: u8,
    pub title: &'static str,
    pub description: &'static str,
    /// Reason this action specifically addresses, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub addresses: Option<RiskReason>,
}

pub static MITIGATION_ACTIONS: &[MitigationAction] = &[
    MitigationAction {
        id: 1,
        title: "Install containment barriers",
        description: "Recommended for areas with inclination above 30°.",
        addresses: Some(RiskReason::SteepTerrain),
    },
    MitigationAction {
        id: 2,
        title: "Plant vegetation",
        description: "Helps stabilize the soil and reduce erosion in exposed areas.",
        addresses: None,
    },
    MitigationAction {
        id: 3,
        title: "Redirect drainage water",
        description: "Prevents moisture from accumulating at critical points.",
        addresses: Some(RiskReason::SaturatedSoil),
    },
    MitigationAction {
        id: 4,
        title: "Continuous monitoring",
        description: "Keep recording readings for at-risk areas regularly.",
        addresses: None,
    },
];

/// Mitigation advice for one region's current situation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MitigationPlan {
    pub region: String,
    pub reasons: Vec<RiskReason>,
    pub actions: Vec<&'static MitigationAction>,
}

/// Suggestions for `region`, or `None` unless its latest reading is high risk.
///
/// Actions aimed at a specific reason are listed first when that reason
/// applies; general actions always follow.
pub fn suggest(readings: &[Reading], region: &str) -> Option<MitigationPlan> {
    let latest = latest_reading(readings, region)?;
    let reasons = exceeded_limits(latest);
    if reasons.is_empty() {
        return None;
    }

    let targeted = MITIGATION_ACTIONS
        .iter()
        .filter(|a| a.addresses.is_some_and(|r| reasons.contains(&r)));
    let general = MITIGATION_ACTIONS.iter().filter(|a| a.addresses.is_none());

    Some(MitigationPlan {
        region: region.to_string(),
        actions: targeted.chain(general).collect(),
        reasons,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ingest::timestamp::parse_reading_date;

    fn reading_at(soil: f64, incl: f64) -> Reading {
        Reading {
            soil_moisture: soil,
            terrain_inclination: incl,
            region: "X".to_string(),
            timestamp: parse_reading_date("2025-05-01T08:00:00").unwrap(),
        }
    }

    fn action_ids(plan: &MitigationPlan) -> Vec<u8> {
        plan.actions.iter().map(|a| a.id).collect()
    }

    #[test]
    fn test_normal_region_gets_no_plan() {
        assert_eq!(suggest(&[reading_at(40.0, 10.0)], "X"), None);
        assert_eq!(suggest(&[], "X"), None);
    }

    #[test]
    fn test_steep_slope_leads_with_barriers() {
        let plan = suggest(&[reading_at(40.0, 45.0)], "X").expect("high risk should suggest");
        assert_eq!(plan.reasons, vec![RiskReason::SteepTerrain]);
        assert_eq!(action_ids(&plan), vec![1, 2, 4]);
    }

    #[test]
    fn test_wet_soil_leads_with_drainage() {
        let plan = suggest(&[reading_at(85.0, 5.0)], "X").expect("high risk should suggest");
        assert_eq!(action_ids(&plan), vec![3, 2, 4]);
    }

    #[test]
    fn test_both_reasons_offer_every_action() {
        let plan = suggest(&[reading_at(85.0, 45.0)], "X").expect("high risk should suggest");
        assert_eq!(action_ids(&plan), vec![1, 3, 2, 4]);
    }
}
