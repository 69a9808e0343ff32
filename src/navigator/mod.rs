//! The live-tracking state machine and its asynchronous session wrapper.

mod error;
mod session;
mod tracker;
mod types;

pub use error::SessionError;
pub use session::{NavigationSession, SessionMode, SessionStatus};
pub use tracker::PositionTracker;
pub use types::{Fix, NavigationState, TrackerConfig};
