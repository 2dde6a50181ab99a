//! Upstream API error taxonomy.
//!
//! Every failing upstream call is classified by HTTP status into a closed set
//! of kinds, each carrying the originating context string (e.g. "getUser for
//! alice") so orchestration failures stay attributable in logs.

use thiserror::Error;

/// Error types for upstream GitHub API operations
#[derive(Debug, Error)]
pub enum GitHubError {
    /// Resource not found (404)
    #[error("resource not found ({context})")]
    NotFound { context: String },

    /// Rate limit exceeded (403 with a throttling message)
    #[error("rate limit exceeded ({context})")]
    RateLimited { context: String },

    /// Access forbidden (403 otherwise)
    #[error("access forbidden ({context})")]
    Forbidden { context: String },

    /// Upstream rejected the request parameters (422)
    #[error("invalid request ({context}): {message}")]
    InvalidRequest { context: String, message: String },

    /// Missing or invalid credential (401)
    #[error("authentication failed ({context})")]
    Unauthenticated { context: String },

    /// Anything else, including transport failures and timeouts
    #[error("upstream failure ({context}): {message}")]
    Unknown {
        context: String,
        status: Option<u16>,
        message: String,
    },

    /// Client setup/configuration error
    #[error("client setup failed: {0}")]
    ClientSetup(String),
}

/// Convenience result alias for upstream operations
pub type GitHubResult<T> = Result<T, GitHubError>;

impl GitHubError {
    /// The HTTP status this kind maps to at the facade boundary.
    #[must_use]
    pub fn http_status(&self) -> u16 {
        match self {
            GitHubError::NotFound { .. } => 404,
            GitHubError::RateLimited { .. } => 429,
            GitHubError::Forbidden { .. } => 403,
            GitHubError::InvalidRequest { .. } => 422,
            GitHubError::Unauthenticated { .. } => 401,
            GitHubError::Unknown { .. } | GitHubError::ClientSetup(_) => 500,
        }
    }

    /// Originating call context, empty for setup errors.
    #[must_use]
    pub fn context(&self) -> &str {
        match self {
            GitHubError::NotFound { context }
            | GitHubError::RateLimited { context }
            | GitHubError::Forbidden { context }
            | GitHubError::InvalidRequest { context, .. }
            | GitHubError::Unauthenticated { context }
            | GitHubError::Unknown { context, .. } => context,
            GitHubError::ClientSetup(_) => "",
        }
    }
}

/// Classify an octocrab failure into the facade taxonomy.
///
/// 403 responses are split into rate limiting and plain forbidden based on
/// the upstream message, since octocrab does not surface the quota headers.
pub(crate) fn classify(err: octocrab::Error, context: &str) -> GitHubError {
    let context = context.to_string();
    match err {
        octocrab::Error::GitHub { source, .. } => {
            let status = source.status_code.as_u16();
            let message = source.message.clone();
            log::warn!("upstream call failed: {context} status={status} message={message}");
            match status {
                404 => GitHubError::NotFound { context },
                401 => GitHubError::Unauthenticated { context },
                403 if is_throttle_message(&message) => GitHubError::RateLimited { context },
                403 => GitHubError::Forbidden { context },
                422 => GitHubError::InvalidRequest { context, message },
                _ => GitHubError::Unknown {
                    context,
                    status: Some(status),
                    message,
                },
            }
        }
        other => {
            log::warn!("upstream call failed: {context}: {other}");
            GitHubError::Unknown {
                context,
                status: None,
                message: other.to_string(),
            }
        }
    }
}

fn is_throttle_message(message: &str) -> bool {
    let lowered = message.to_lowercase();
    lowered.contains("rate limit") || lowered.contains("abuse") || lowered.contains("too many")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_mapping_is_closed() {
        let ctx = "getUser for alice".to_string();
        assert_eq!(GitHubError::NotFound { context: ctx.clone() }.http_status(), 404);
        assert_eq!(GitHubError::RateLimited { context: ctx.clone() }.http_status(), 429);
        assert_eq!(GitHubError::Forbidden { context: ctx.clone() }.http_status(), 403);
        assert_eq!(GitHubError::Unauthenticated { context: ctx.clone() }.http_status(), 401);
        assert_eq!(
            GitHubError::InvalidRequest {
                context: ctx.clone(),
                message: "bad q".into()
            }
            .http_status(),
            422
        );
        assert_eq!(
            GitHubError::Unknown {
                context: ctx,
                status: Some(502),
                message: "bad gateway".into()
            }
            .http_status(),
            500
        );
    }

    #[test]
    fn throttle_messages_detected() {
        assert!(is_throttle_message("API rate limit exceeded for user"));
        assert!(is_throttle_message("You have triggered an abuse detection mechanism"));
        assert!(!is_throttle_message("Resource protected by organization SAML"));
    }

    #[test]
    fn context_is_preserved() {
        let err = GitHubError::NotFound {
            context: "getUser for doesnotexist".into(),
        };
        assert_eq!(err.context(), "getUser for doesnotexist");
    }
}
