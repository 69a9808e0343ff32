use chrono::{DateTime, Utc};

use super::parser::Scenario;
use crate::hazards::HazardCatalog;
use crate::navigator::{Fix, NavigationState, PositionTracker, TrackerConfig};

/// Drive a scenario's fixes through a fresh tracker, in timestamp order,
/// and collect the derived state after each one.
pub fn replay(scenario: &Scenario, start: DateTime<Utc>) -> Vec<NavigationState> {
    let catalog = HazardCatalog::new(scenario.hazards.clone());
    let mut tracker =
        PositionTracker::with_config(scenario.route.clone(), catalog, TrackerConfig::default());

    let mut fixes: Vec<Fix> = scenario
        .fixes
        .iter()
        .map(|f| Fix {
            position: f.position,
            timestamp: f.time.resolve(start),
        })
        .collect();
    fixes.sort_by_key(|f| f.timestamp);

    fixes.into_iter().map(|f| tracker.apply_fix(f)).collect()
}
