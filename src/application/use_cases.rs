//! Request orchestration use cases

use std::sync::Arc;

use uuid::Uuid;

use crate::application::assembler::assemble;
use crate::application::validation::validate_query;
use crate::domain::entities::{AskAnswer, UserIdentity};
use crate::domain::errors::AskError;
use crate::domain::repositories::{IdentityProvider, PublicUrlResolver, RecordStore};
use crate::infrastructure::rate_limiter::RequestWindowLimiter;

/// Maximum number of catalog records returned per request.
pub const MAX_RESOURCES: usize = 5;

/// The three collaborator capabilities bundled for injection.
#[derive(Clone)]
pub struct Collaborators {
    pub identity: Arc<dyn IdentityProvider>,
    pub records: Arc<dyn RecordStore>,
    pub urls: Arc<dyn PublicUrlResolver>,
}

/// Exchanges an optional bearer credential for a verified identity.
///
/// An absent header is a valid input that resolves to failure. A
/// collaborator error and "no verified user" are deliberately not
/// distinguished: both become the same unauthorized outcome so no
/// verification detail leaks to callers.
pub struct IdentityResolver {
    provider: Arc<dyn IdentityProvider>,
}

impl IdentityResolver {
    pub fn new(provider: Arc<dyn IdentityProvider>) -> Self {
        Self { provider }
    }

    pub async fn resolve(&self, bearer: Option<&str>) -> Result<UserIdentity, AskError> {
        let token = bearer.ok_or(AskError::Unauthorized)?;
        match self.provider.verify_bearer(token).await {
            Ok(Some(identity)) => Ok(identity),
            Ok(None) => Err(AskError::Unauthorized),
            Err(e) => {
                tracing::debug!(error = %e, "identity provider rejected credential");
                Err(AskError::Unauthorized)
            }
        }
    }
}

/// Per-request inputs extracted by the HTTP layer.
#[derive(Debug, Clone)]
pub struct AskRequestContext {
    pub request_id: Uuid,
    pub client_key: String,
    pub bearer: Option<String>,
    pub raw_query: Option<serde_json::Value>,
}

/// Sequences the full ask pipeline and owns the partial-failure policy.
///
/// The pipeline is linear and every failure is terminal: rate check,
/// validation, configuration check, authentication, the parallel
/// profile-upsert/resource-search pair, query logging, then assembly.
/// No step is retried and no partial response is ever returned.
pub struct AskUseCase {
    limiter: Arc<RequestWindowLimiter>,
    /// `None` when collaborator credentials were absent at startup; the
    /// check happens per request so the service degrades instead of
    /// crashing.
    collaborators: Option<Collaborators>,
}

impl AskUseCase {
    pub fn new(limiter: Arc<RequestWindowLimiter>, collaborators: Option<Collaborators>) -> Self {
        Self {
            limiter,
            collaborators,
        }
    }

    pub async fn execute(&self, ctx: AskRequestContext) -> Result<AskAnswer, AskError> {
        if !self.limiter.check_and_record(&ctx.client_key).await {
            tracing::warn!(client_key = %ctx.client_key, "rate limit exceeded");
            return Err(AskError::RateLimited);
        }

        let query = validate_query(ctx.raw_query.as_ref())?;

        let backend = self
            .collaborators
            .as_ref()
            .ok_or(AskError::ServerMisconfigured)?;

        let identity = IdentityResolver::new(backend.identity.clone())
            .resolve(ctx.bearer.as_deref())
            .await?;

        // Both operations are independent of each other's success but
        // both must finish before the query-log write: never log a
        // query for a profile that failed to sync. When both fail, the
        // profile failure is the one reported.
        let (profile, found) = tokio::join!(
            backend.records.upsert_profile(&identity),
            backend.records.search_resources(&query, MAX_RESOURCES),
        );
        profile.map_err(AskError::ProfileSyncFailed)?;
        let resources = found.map_err(AskError::ResourceFetchFailed)?;

        backend
            .records
            .log_query(&identity.id, &query)
            .await
            .map_err(AskError::QueryLogFailed)?;

        tracing::info!(
            request_id = %ctx.request_id,
            user_id = %identity.id,
            resources = resources.len(),
            "ask pipeline completed"
        );

        Ok(assemble(
            &query,
            ctx.request_id,
            resources,
            backend.urls.as_ref(),
        ))
    }
}
