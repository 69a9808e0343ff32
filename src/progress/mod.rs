//! Schedule-based trip progress for passengers without live GPS.
//!
//! A low-frequency sibling of the tracker: no fixes, no geometry, just the
//! trip's scheduled and actual timestamps interpolated against the clock.
//! Callers poll it on their own interval; every call is stateless.

use chrono::{DateTime, Utc};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use strum_macros::Display;

/// Lifecycle status of the external trip record.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, ValueEnum,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
#[value(rename_all = "snake_case")]
pub enum TripStatus {
    Scheduled,
    InProgress,
    Completed,
    Cancelled,
}

/// Displayed tracking phase derived from status and progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum TrackingStatus {
    Scheduled,
    Boarding,
    InTransit,
    Approaching,
    Arrived,
    Cancelled,
}

/// The slice of a booking/trip record this module consumes.
#[derive(Debug, Clone, Deserialize)]
pub struct TripRecord {
    pub departure_at: DateTime<Utc>,
    pub arrival_at: DateTime<Utc>,
    pub status: TripStatus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TripProgress {
    pub status: TrackingStatus,
    pub percent: u8,
}

/// Once interpolated progress reaches this, an in-progress trip shows as
/// approaching its destination.
const APPROACHING_PERCENT: u8 = 90;
/// Up to this progress an in-progress trip still shows as boarding.
const BOARDING_PERCENT: u8 = 5;

/// Derive progress and tracking phase at `now`. Total over all inputs.
pub fn estimate_at(
    now: DateTime<Utc>,
    departure_at: DateTime<Utc>,
    arrival_at: DateTime<Utc>,
    status: TripStatus,
) -> TripProgress {
    let percent = progress_percent(now, departure_at, arrival_at, status);

    let tracking = match status {
        TripStatus::Scheduled => TrackingStatus::Scheduled,
        TripStatus::Cancelled => TrackingStatus::Cancelled,
        TripStatus::Completed => TrackingStatus::Arrived,
        TripStatus::InProgress => {
            if percent >= APPROACHING_PERCENT {
                TrackingStatus::Approaching
            } else if percent <= BOARDING_PERCENT {
                TrackingStatus::Boarding
            } else {
                TrackingStatus::InTransit
            }
        }
    };

    TripProgress {
        status: tracking,
        percent,
    }
}

/// [`estimate_at`] against the wall clock.
pub fn estimate(record: &TripRecord) -> TripProgress {
    estimate_at(
        Utc::now(),
        record.departure_at,
        record.arrival_at,
        record.status,
    )
}

fn progress_percent(
    now: DateTime<Utc>,
    departure_at: DateTime<Utc>,
    arrival_at: DateTime<Utc>,
    status: TripStatus,
) -> u8 {
    if status == TripStatus::Completed {
        return 100;
    }
    if now <= departure_at {
        return 0;
    }
    if now >= arrival_at {
        return 100;
    }

    let total = (arrival_at - departure_at).num_milliseconds() as f64;
    let elapsed = (now - departure_at).num_milliseconds() as f64;
    ((elapsed / total) * 100.0).round() as u8
}
