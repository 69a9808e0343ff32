//! Fluvial navigation engine for river-transport apps.
//!
//! Given a noisy stream of GPS fixes and a predefined river route, derives
//! where the vessel is along the route, its heading and smoothed speed,
//! remaining distance and ETA, whether it has strayed off the navigable
//! channel, and which known hazard zones are near. A schedule-only progress
//! estimator covers passengers without live GPS.

pub mod geo;
pub mod hazards;
pub mod navigator;
pub mod progress;
pub mod scenario;
