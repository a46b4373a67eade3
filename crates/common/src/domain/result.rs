use thiserror::Error;

pub type DomainResult<T> = Result<T, DomainError>;

#[derive(Error, Debug)]
pub enum DomainError {
    #[error("failed to decode metric payload: {0}")]
    DecodeError(String),

    /// Carries the full human-readable message, e.g. "ItemID cannot be empty".
    #[error("{0}")]
    ValidationError(String),

    #[error("unsupported action: {0}")]
    UnsupportedAction(String),

    #[error("Transport error: {0}")]
    TransportError(#[from] anyhow::Error),
}
