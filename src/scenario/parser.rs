use std::path::Path;

use chrono::{DateTime, Duration, Utc};
use serde::Deserialize;
use thiserror::Error;

use crate::geo::GeoPoint;
use crate::hazards::HazardZone;

#[derive(Debug, Error)]
pub enum ScenarioError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("fix {0}: {1}")]
    Fix(usize, String),
}

/// A recorded (or synthetic) navigation run: the route, the hazards in
/// effect, and a sequence of timed fixes to feed the tracker.
#[derive(Debug, Clone)]
pub struct Scenario {
    pub name: Option<String>,
    pub route: Vec<GeoPoint>,
    pub hazards: Vec<HazardZone>,
    pub fixes: Vec<TimedFix>,
}

#[derive(Debug, Clone)]
pub struct TimedFix {
    pub time: TimeExpr,
    pub position: GeoPoint,
}

/// When a fix happens: relative to the replay start (`T+10s`, `T-5m`) or at
/// an absolute RFC 3339 instant.
#[derive(Debug, Clone, Copy)]
pub enum TimeExpr {
    Relative(Duration),
    Absolute(DateTime<Utc>),
}

impl TimeExpr {
    pub fn resolve(&self, start: DateTime<Utc>) -> DateTime<Utc> {
        match self {
            TimeExpr::Relative(d) => start + *d,
            TimeExpr::Absolute(dt) => *dt,
        }
    }
}

#[derive(Debug, Deserialize)]
struct RawScenario {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    route: Vec<GeoPoint>,
    #[serde(default)]
    hazards: Vec<HazardZone>,
    #[serde(default)]
    fixes: Vec<RawFix>,
}

#[derive(Debug, Deserialize)]
struct RawFix {
    time: String,
    lat: f64,
    lon: f64,
}

impl Scenario {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ScenarioError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_str(&content)
    }

    pub fn from_str(yaml: &str) -> Result<Self, ScenarioError> {
        let raw: RawScenario = serde_yaml::from_str(yaml)?;

        let fixes = raw
            .fixes
            .into_iter()
            .enumerate()
            .map(|(i, f)| -> Result<TimedFix, ScenarioError> {
                let time = parse_time(&f.time).map_err(|e| ScenarioError::Fix(i, e))?;
                Ok(TimedFix {
                    time,
                    position: GeoPoint::new(f.lat, f.lon),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Scenario {
            name: raw.name,
            route: raw.route,
            hazards: raw.hazards,
            fixes,
        })
    }
}

fn parse_time(s: &str) -> Result<TimeExpr, String> {
    let s = s.trim();

    // Relative: T+10s, T-5m
    if s.to_lowercase().starts_with('t') {
        let rest = &s[1..];
        let (neg, rest) = match rest.strip_prefix('-') {
            Some(r) => (true, r),
            None => (false, rest.strip_prefix('+').unwrap_or(rest)),
        };
        let dur = parse_duration(rest)?;
        return Ok(TimeExpr::Relative(if neg { -dur } else { dur }));
    }

    DateTime::parse_from_rfc3339(s)
        .map(|dt| TimeExpr::Absolute(dt.with_timezone(&Utc)))
        .map_err(|e| e.to_string())
}

fn parse_duration(s: &str) -> Result<Duration, String> {
    humantime::parse_duration(s.trim())
        .map_err(|e| e.to_string())
        .and_then(|d| Duration::from_std(d).map_err(|e| e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    const SAMPLE: &str = r#"
name: manaus-parintins
route:
  - { lat: -3.119, lon: -60.0217 }
  - { lat: -2.6283, lon: -56.7358 }
hazards:
  - id: encontro
    name: Encontro das Aguas
    center: { lat: -3.1386, lon: -59.9031 }
    radius_m: 1200
    severity: medium
    category: confluence
fixes:
  - { time: T+0s, lat: -3.119, lon: -60.0217 }
  - { time: T+10m, lat: -3.0, lon: -59.2 }
  - { time: 2025-06-01T12:00:00Z, lat: -2.9, lon: -58.4 }
"#;

    #[test]
    fn parses_route_hazards_and_fixes() {
        let scenario = Scenario::from_str(SAMPLE).unwrap();
        assert_eq!(scenario.name.as_deref(), Some("manaus-parintins"));
        assert_eq!(scenario.route.len(), 2);
        assert_eq!(scenario.hazards.len(), 1);
        assert_eq!(scenario.fixes.len(), 3);
    }

    #[test]
    fn relative_times_resolve_against_start() {
        let scenario = Scenario::from_str(SAMPLE).unwrap();
        let start = Utc.with_ymd_and_hms(2025, 6, 1, 8, 0, 0).unwrap();

        assert_eq!(scenario.fixes[0].time.resolve(start), start);
        assert_eq!(
            scenario.fixes[1].time.resolve(start),
            start + Duration::minutes(10)
        );
        assert_eq!(
            scenario.fixes[2].time.resolve(start),
            Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap()
        );
    }

    #[test]
    fn negative_relative_time() {
        let expr = parse_time("T-90s").unwrap();
        let start = Utc.with_ymd_and_hms(2025, 6, 1, 8, 0, 0).unwrap();
        assert_eq!(expr.resolve(start), start - Duration::seconds(90));
    }

    #[test]
    fn bad_time_reports_fix_index() {
        let yaml = r#"
fixes:
  - { time: T+5s, lat: 0.0, lon: 0.0 }
  - { time: whenever, lat: 0.0, lon: 0.0 }
"#;
        match Scenario::from_str(yaml) {
            Err(ScenarioError::Fix(1, _)) => {}
            other => panic!("expected fix error, got {:?}", other.map(|_| ())),
        }
    }
}
