use thiserror::Error;

pub type SyncResult<T> = Result<T, SyncError>;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SyncError {
    #[error("hit-test for sample #{sequence} failed: {reason}")]
    HitTestFailure { sequence: u64, reason: String },

    #[error("popup render failed: {0}")]
    PopupRenderFailure(String),

    #[error("invalid config: {0}")]
    InvalidConfig(String),

    #[error("invalid data: {0}")]
    InvalidData(String),
}
