use serde::{Deserialize, Serialize};
use strum_macros::Display;

use crate::geo::GeoPoint;

/// How dangerous a zone is. Ordering is meaningful: `Low < Medium < High`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, Display,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Severity {
    Low,
    Medium,
    High,
}

/// What kind of hazard a zone marks. Only used downstream to pick a map
/// icon; the engine never branches on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum HazardCategory {
    Rapids,
    Sandbank,
    Shallows,
    Wreck,
    BridgePier,
    LogJam,
    Confluence,
}

/// A named circular danger zone on the river.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HazardZone {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub center: GeoPoint,
    pub radius_m: f64,
    pub severity: Severity,
    pub category: HazardCategory,
}

/// A hazard within alert range of the vessel. `standoff_m` is the distance
/// from the vessel to the zone boundary; 0 means the vessel is inside it.
#[derive(Debug, Clone, Serialize)]
pub struct HazardAlert {
    pub zone: HazardZone,
    pub standoff_m: f64,
}
