//! Orchestration error taxonomy.

use crate::cache::keys::EmptyKeyPart;
use crate::github::GitHubError;
use thiserror::Error;

/// Errors surfaced by the service layer.
///
/// Validation failures never reach the upstream client; upstream failures
/// propagate with their classified kind; cache failures never appear here at
/// all, they are absorbed inside the cache layer.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// Bad caller input, reported before any cache or upstream call.
    #[error("{0}")]
    Validation(String),

    /// Classified upstream failure.
    #[error(transparent)]
    Upstream(#[from] GitHubError),

    /// Random discovery exhausted its attempts without a candidate.
    #[error("no repositories found matching the requested filters")]
    NoRepositoriesFound,
}

pub type ServiceResult<T> = Result<T, ServiceError>;

impl ServiceError {
    /// The HTTP status this error maps to at the facade boundary.
    #[must_use]
    pub fn http_status(&self) -> u16 {
        match self {
            ServiceError::Validation(_) => 400,
            ServiceError::Upstream(err) => err.http_status(),
            ServiceError::NoRepositoriesFound => 404,
        }
    }
}

impl From<EmptyKeyPart> for ServiceError {
    fn from(err: EmptyKeyPart) -> Self {
        ServiceError::Validation(err.to_string())
    }
}
