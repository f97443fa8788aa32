//! Supabase collaborator client
//!
//! One HTTP client implementing all three collaborator ports: bearer
//! verification against the auth API, PostgREST record access, and
//! public storage URL resolution. Requests carry a bounded timeout so a
//! hung collaborator fails the request instead of hanging it.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use serde_json::json;

use crate::domain::entities::{ResourceRecord, UserIdentity};
use crate::domain::errors::BackendError;
use crate::domain::repositories::{IdentityProvider, PublicUrlResolver, RecordStore};

/// Storage bucket holding the resource objects.
const RESOURCE_BUCKET: &str = "resources";

/// Auth API user payload (only the fields the core reads).
#[derive(Debug, Deserialize)]
struct AuthUser {
    id: String,
    #[serde(default)]
    user_metadata: UserMetadata,
}

#[derive(Debug, Default, Deserialize)]
struct UserMetadata {
    full_name: Option<String>,
}

pub struct SupabaseClient {
    http: Client,
    base_url: String,
    anon_key: String,
}

impl SupabaseClient {
    pub fn new(
        base_url: &str,
        anon_key: &str,
        request_timeout: Duration,
    ) -> Result<Self, BackendError> {
        let http = Client::builder()
            .timeout(request_timeout)
            .build()
            .map_err(|e| BackendError::Transport(e.to_string()))?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            anon_key: anon_key.to_string(),
        })
    }

    fn map_transport(e: reqwest::Error) -> BackendError {
        if e.is_timeout() {
            BackendError::Timeout
        } else {
            BackendError::Transport(e.to_string())
        }
    }

    async fn reject(response: reqwest::Response) -> BackendError {
        let status = response.status().as_u16();
        let body = response.text().await.unwrap_or_default();
        BackendError::Rejected { status, body }
    }
}

/// Strip PostgREST filter metacharacters from a search term.
///
/// The trimmed query is user-controlled and gets interpolated into an
/// `or=(...)` filter expression; commas, parentheses, quotes, and
/// wildcards would change the filter's structure rather than its value.
fn sanitize_filter_term(term: &str) -> String {
    term.chars()
        .filter(|c| !matches!(c, ',' | '(' | ')' | '"' | '*' | '%'))
        .collect()
}

#[async_trait]
impl IdentityProvider for SupabaseClient {
    async fn verify_bearer(&self, token: &str) -> Result<Option<UserIdentity>, BackendError> {
        let response = self
            .http
            .get(format!("{}/auth/v1/user", self.base_url))
            .header("apikey", &self.anon_key)
            .bearer_auth(token)
            .send()
            .await
            .map_err(Self::map_transport)?;

        match response.status() {
            StatusCode::OK => {
                let user: AuthUser = response
                    .json()
                    .await
                    .map_err(|e| BackendError::Payload(e.to_string()))?;
                Ok(Some(UserIdentity {
                    id: user.id,
                    full_name: user.user_metadata.full_name,
                }))
            }
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Ok(None),
            _ => Err(Self::reject(response).await),
        }
    }
}

#[async_trait]
impl RecordStore for SupabaseClient {
    async fn upsert_profile(&self, identity: &UserIdentity) -> Result<(), BackendError> {
        let response = self
            .http
            .post(format!("{}/rest/v1/profiles", self.base_url))
            .header("apikey", &self.anon_key)
            .bearer_auth(&self.anon_key)
            // Conflict on id is a no-op, not an error.
            .header("Prefer", "resolution=ignore-duplicates,return=minimal")
            .json(&json!([{
                "id": identity.id,
                "full_name": identity.full_name,
            }]))
            .send()
            .await
            .map_err(Self::map_transport)?;

        if !response.status().is_success() {
            return Err(Self::reject(response).await);
        }
        Ok(())
    }

    async fn search_resources(
        &self,
        query: &str,
        limit: usize,
    ) -> Result<Vec<ResourceRecord>, BackendError> {
        let term = sanitize_filter_term(query);
        let filter = format!("(title.ilike.*{term}*,description.ilike.*{term}*)");
        let limit = limit.to_string();

        let response = self
            .http
            .get(format!("{}/rest/v1/resources", self.base_url))
            .header("apikey", &self.anon_key)
            .bearer_auth(&self.anon_key)
            .query(&[
                ("select", "id,title,description,type,storage_path"),
                ("or", filter.as_str()),
                ("limit", limit.as_str()),
            ])
            .send()
            .await
            .map_err(Self::map_transport)?;

        if !response.status().is_success() {
            return Err(Self::reject(response).await);
        }

        response
            .json::<Vec<ResourceRecord>>()
            .await
            .map_err(|e| BackendError::Payload(e.to_string()))
    }

    async fn log_query(&self, user_id: &str, query: &str) -> Result<(), BackendError> {
        let response = self
            .http
            .post(format!("{}/rest/v1/query_logs", self.base_url))
            .header("apikey", &self.anon_key)
            .bearer_auth(&self.anon_key)
            .header("Prefer", "return=minimal")
            .json(&json!([{
                "user_id": user_id,
                "query": query,
            }]))
            .send()
            .await
            .map_err(Self::map_transport)?;

        if !response.status().is_success() {
            return Err(Self::reject(response).await);
        }
        Ok(())
    }
}

impl PublicUrlResolver for SupabaseClient {
    fn public_url(&self, storage_path: &str) -> String {
        format!(
            "{}/storage/v1/object/public/{}/{}",
            self.base_url,
            RESOURCE_BUCKET,
            storage_path.trim_start_matches('/')
        )
    }
}
