//! Domain error taxonomy

use thiserror::Error;

/// Query validation failures.
///
/// The user-facing messages are part of the public contract; both length
/// violations share one message so callers cannot probe the bounds
/// independently.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Query must be a string.")]
    NotAString,

    #[error("Query must be between 3 and 500 characters.")]
    TooShort,

    #[error("Query must be between 3 and 500 characters.")]
    TooLong,
}

/// Failures reported by the external collaborator (identity provider,
/// record store, object storage).
#[derive(Error, Debug, Clone)]
pub enum BackendError {
    #[error("request to collaborator failed: {0}")]
    Transport(String),

    #[error("collaborator request timed out")]
    Timeout,

    #[error("collaborator returned {status}: {body}")]
    Rejected { status: u16, body: String },

    #[error("unexpected collaborator payload: {0}")]
    Payload(String),
}

/// Terminal pipeline outcomes.
///
/// Every failure maps directly to one HTTP status and body; none are
/// retried, none are suppressed.
#[derive(Error, Debug)]
pub enum AskError {
    #[error("Too many requests. Please try again later.")]
    RateLimited,

    #[error("{0}")]
    InvalidInput(#[from] ValidationError),

    #[error("Server is not configured.")]
    ServerMisconfigured,

    #[error("Unauthorized.")]
    Unauthorized,

    #[error("Failed to sync profile.")]
    ProfileSyncFailed(#[source] BackendError),

    #[error("Failed to fetch resources.")]
    ResourceFetchFailed(#[source] BackendError),

    #[error("Failed to log query.")]
    QueryLogFailed(#[source] BackendError),
}

impl AskError {
    /// Underlying collaborator detail, present only for downstream
    /// failures. Validation and auth failures never expose internals.
    pub fn detail(&self) -> Option<String> {
        match self {
            AskError::ProfileSyncFailed(e)
            | AskError::ResourceFetchFailed(e)
            | AskError::QueryLogFailed(e) => Some(e.to_string()),
            _ => None,
        }
    }
}
