use std::time::Duration;

#[derive(Debug, thiserror::Error)]
pub enum RelayError {
    #[error("Transport error: {0}")]
    Transport(#[from] axum::Error),

    #[error("Write timed out after {0:?}")]
    Timeout(Duration),
}
