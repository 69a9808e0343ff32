use std::sync::{Arc, Mutex as StdMutex};

use chrono::{DateTime, Utc};
use log::{debug, info};
use serde::Serialize;
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use uuid::Uuid;

use super::error::SessionError;
use super::tracker::PositionTracker;
use super::types::{Fix, NavigationState, TrackerConfig};
use crate::geo::GeoPoint;
use crate::hazards::HazardCatalog;

/// Fixes buffered ahead of the consumer before senders are backpressured.
const FIX_QUEUE_CAPACITY: usize = 64;

#[derive(Debug, Clone, Serialize)]
pub enum SessionMode {
    Idle,
    Running {
        session_id: String,
        started: DateTime<Utc>,
    },
}

#[derive(Debug, Clone, Serialize)]
pub struct SessionStatus {
    pub mode: SessionMode,
    pub last_state: Option<NavigationState>,
}

#[derive(Debug)]
struct Shared {
    status: SessionStatus,
}

struct WorkerHandle {
    stop_tx: oneshot::Sender<()>,
    join: JoinHandle<()>,
}

/// Asynchronous wrapper around a [`PositionTracker`].
///
/// One worker task consumes fixes from a bounded queue and applies them in
/// arrival order, one at a time, publishing each derived state into a shared
/// snapshot. Dropping every sender drains and ends the worker; `stop` ends
/// it immediately.
pub struct NavigationSession {
    shared: Arc<StdMutex<Shared>>,
    worker: Option<WorkerHandle>,
}

impl NavigationSession {
    pub fn new() -> Self {
        Self {
            shared: Arc::new(StdMutex::new(Shared {
                status: SessionStatus {
                    mode: SessionMode::Idle,
                    last_state: None,
                },
            })),
            worker: None,
        }
    }

    pub fn status(&self) -> SessionStatus {
        self.shared.lock().unwrap().status.clone()
    }

    /// Start tracking on `route`, returning the sender half of the fix queue.
    pub async fn start(
        &mut self,
        route: Vec<GeoPoint>,
        catalog: HazardCatalog,
        config: TrackerConfig,
    ) -> Result<mpsc::Sender<Fix>, SessionError> {
        if self.worker.is_some() {
            return Err(SessionError::AlreadyRunning);
        }

        let session_id = Uuid::new_v4().to_string();
        info!("starting navigation session {session_id}");

        let tracker = PositionTracker::with_config(route, catalog, config);
        let (fix_tx, fix_rx) = mpsc::channel(FIX_QUEUE_CAPACITY);
        let (stop_tx, stop_rx) = oneshot::channel();

        let shared = self.shared.clone();
        let join = tokio::spawn(run_session_loop(shared, tracker, fix_rx, stop_rx));

        self.worker = Some(WorkerHandle { stop_tx, join });

        {
            let mut locked = self.shared.lock().unwrap();
            locked.status.mode = SessionMode::Running {
                session_id,
                started: Utc::now(),
            };
            locked.status.last_state = None;
        }

        Ok(fix_tx)
    }

    /// Signal the worker to stop and wait for it. No-op when idle.
    pub async fn stop(&mut self) {
        if let Some(worker) = self.worker.take() {
            let _ = worker.stop_tx.send(());
            let _ = worker.join.await;
        }
        let mut locked = self.shared.lock().unwrap();
        locked.status.mode = SessionMode::Idle;
    }
}

impl Default for NavigationSession {
    fn default() -> Self {
        Self::new()
    }
}

async fn run_session_loop(
    shared: Arc<StdMutex<Shared>>,
    mut tracker: PositionTracker,
    mut fix_rx: mpsc::Receiver<Fix>,
    mut stop_rx: oneshot::Receiver<()>,
) {
    loop {
        let fix = tokio::select! {
            _ = &mut stop_rx => break,
            received = fix_rx.recv() => match received {
                Some(fix) => fix,
                // All senders gone: the fix stream is over.
                None => break,
            },
        };

        let state = tracker.apply_fix(fix);
        debug!(
            "fix applied: progress {:.1}%, speed {:.1} km/h",
            state.route_progress * 100.0,
            state.speed_kmh
        );

        shared.lock().unwrap().status.last_state = Some(state);
    }

    shared.lock().unwrap().status.mode = SessionMode::Idle;
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use std::time::Duration as StdDuration;

    fn pt(lat: f64, lon: f64) -> GeoPoint {
        GeoPoint::new(lat, lon)
    }

    async fn wait_until_idle(session: &NavigationSession) {
        for _ in 0..100 {
            if matches!(session.status().mode, SessionMode::Idle) {
                return;
            }
            tokio::time::sleep(StdDuration::from_millis(10)).await;
        }
        panic!("session never went idle");
    }

    #[tokio::test]
    async fn fixes_flow_through_in_order() {
        let route = vec![pt(0.0, 0.0), pt(0.0, 10.0)];
        let mut session = NavigationSession::new();
        let tx = session
            .start(route, HazardCatalog::default(), TrackerConfig::default())
            .await
            .unwrap();

        let start = Utc::now();
        for (i, lon) in [1.0, 4.0, 8.0].iter().enumerate() {
            tx.send(Fix {
                position: pt(0.0, *lon),
                timestamp: start + Duration::seconds(i as i64 * 60),
            })
            .await
            .unwrap();
        }
        drop(tx);
        wait_until_idle(&session).await;

        let status = session.status();
        let state = status.last_state.expect("no state published");
        // Smoothed over the three fixes: mean longitude ~4.3 of 10
        assert!(state.route_progress > 0.35 && state.route_progress < 0.55);
    }

    #[tokio::test]
    async fn second_start_is_rejected() {
        let mut session = NavigationSession::new();
        let _tx = session
            .start(vec![], HazardCatalog::default(), TrackerConfig::default())
            .await
            .unwrap();
        let err = session
            .start(vec![], HazardCatalog::default(), TrackerConfig::default())
            .await;
        assert!(matches!(err, Err(SessionError::AlreadyRunning)));
        session.stop().await;
    }

    #[tokio::test]
    async fn stop_returns_to_idle() {
        let mut session = NavigationSession::new();
        let _tx = session
            .start(vec![], HazardCatalog::default(), TrackerConfig::default())
            .await
            .unwrap();
        assert!(matches!(
            session.status().mode,
            SessionMode::Running { .. }
        ));
        session.stop().await;
        assert!(matches!(session.status().mode, SessionMode::Idle));
    }
}
