use std::path::Path;

use log::warn;

use super::error::CatalogError;
use super::types::{HazardAlert, HazardZone};
use crate::geo::{distance_m, GeoPoint};

/// Read-only registry of hazard zones. Loaded once at session start and
/// safe to share across threads (never mutated afterwards).
#[derive(Debug, Clone, Default)]
pub struct HazardCatalog {
    zones: Vec<HazardZone>,
}

impl HazardCatalog {
    pub fn new(zones: Vec<HazardZone>) -> Self {
        Self { zones }
    }

    /// Load a catalog from a YAML file holding a list of zones. Zones with a
    /// non-positive radius are skipped with a warning rather than failing
    /// the whole load.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, CatalogError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_str(&content)
    }

    pub fn from_str(yaml: &str) -> Result<Self, CatalogError> {
        let zones: Vec<HazardZone> = serde_yaml::from_str(yaml)?;

        let zones = zones
            .into_iter()
            .filter(|z| {
                if z.radius_m <= 0.0 {
                    warn!("skipping hazard zone {} with radius {} m", z.id, z.radius_m);
                    return false;
                }
                true
            })
            .collect();

        Ok(Self { zones })
    }

    pub fn zones(&self) -> &[HazardZone] {
        &self.zones
    }

    pub fn len(&self) -> usize {
        self.zones.len()
    }

    pub fn is_empty(&self) -> bool {
        self.zones.is_empty()
    }

    /// All zones whose boundary is closer than `alert_distance_m` to
    /// `position`, closest first. A standoff of 0 means the position is
    /// inside the zone.
    pub fn nearby(&self, position: GeoPoint, alert_distance_m: f64) -> Vec<HazardAlert> {
        let mut alerts: Vec<HazardAlert> = self
            .zones
            .iter()
            .filter_map(|zone| {
                let standoff_m = (distance_m(position, zone.center) - zone.radius_m).max(0.0);
                if standoff_m < alert_distance_m {
                    Some(HazardAlert {
                        zone: zone.clone(),
                        standoff_m,
                    })
                } else {
                    None
                }
            })
            .collect();

        alerts.sort_by(|a, b| a.standoff_m.total_cmp(&b.standoff_m));
        alerts
    }
}
