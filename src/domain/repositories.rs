//! Collaborator ports
//!
//! The external backend is modeled as three capabilities so any
//! conforming implementation (or a test fake) can stand in: identity
//! resolution, record read/write, and object URL resolution.

use async_trait::async_trait;

use super::entities::{ResourceRecord, UserIdentity};
use super::errors::BackendError;

/// Exchanges a bearer credential for a verified identity.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Returns `Ok(None)` when the credential does not resolve to a
    /// verified user. Transport or protocol failures are errors; the
    /// caller collapses both cases into one unauthorized outcome.
    async fn verify_bearer(&self, token: &str) -> Result<Option<UserIdentity>, BackendError>;
}

/// Read/write access to the persistent records the pipeline touches.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Upsert a profile keyed by identity id. A conflicting id is a
    /// no-op, not an error.
    async fn upsert_profile(&self, identity: &UserIdentity) -> Result<(), BackendError>;

    /// Case-insensitive title/description search over the resource
    /// catalog, capped at `limit` results in the catalog's own order.
    async fn search_resources(
        &self,
        query: &str,
        limit: usize,
    ) -> Result<Vec<ResourceRecord>, BackendError>;

    /// Persist one query-log record for the given identity. The store
    /// owns the timestamp.
    async fn log_query(&self, user_id: &str, query: &str) -> Result<(), BackendError>;
}

/// Resolves a stored object path to a publicly retrievable URL.
///
/// Synchronous and non-failing at assembly time.
pub trait PublicUrlResolver: Send + Sync {
    fn public_url(&self, storage_path: &str) -> String;
}
