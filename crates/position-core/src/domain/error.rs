//! Domain Errors

use thiserror::Error;

/// Common result type for domain operations
pub type DomainResult<T> = Result<T, DomainError>;

/// Errors surfaced by the repository and store layers.
///
/// Messages end up verbatim in `PositionState::error`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    /// Fetching from the remote store failed
    #[error("failed to read positions: {0}")]
    RemoteRead(String),
    /// Create, update or delete against the remote store failed
    #[error("failed to write position: {0}")]
    RemoteWrite(String),
    /// The store configuration is unusable
    #[error("invalid store configuration: {0}")]
    Config(String),
}

impl DomainError {
    pub fn read(err: impl ToString) -> Self {
        DomainError::RemoteRead(err.to_string())
    }

    pub fn write(err: impl ToString) -> Self {
        DomainError::RemoteWrite(err.to_string())
    }
}
