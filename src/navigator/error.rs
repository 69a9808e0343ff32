use thiserror::Error;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("navigation session already running")]
    AlreadyRunning,
}
