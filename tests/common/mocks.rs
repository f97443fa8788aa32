//! Shared mock implementations for testing
//!
//! Fakes for the three collaborator capabilities so router-level tests
//! can exercise the pipeline without a live backend.

use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;

use ask_jiji::domain::entities::{ResourceKind, ResourceRecord, UserIdentity};
use ask_jiji::domain::errors::BackendError;
use ask_jiji::domain::repositories::{IdentityProvider, PublicUrlResolver, RecordStore};

/// Identity provider fake with a fixed outcome.
pub struct MockIdentityProvider {
    outcome: Result<Option<UserIdentity>, BackendError>,
}

impl MockIdentityProvider {
    /// Every bearer resolves to the given identity.
    pub fn verified(id: &str) -> Self {
        Self {
            outcome: Ok(Some(UserIdentity {
                id: id.to_string(),
                full_name: Some("Test User".to_string()),
            })),
        }
    }

    /// No bearer resolves to a verified user.
    pub fn anonymous() -> Self {
        Self { outcome: Ok(None) }
    }

    /// The provider itself fails.
    pub fn failing() -> Self {
        Self {
            outcome: Err(BackendError::Transport("auth service unreachable".into())),
        }
    }
}

#[async_trait]
impl IdentityProvider for MockIdentityProvider {
    async fn verify_bearer(&self, _token: &str) -> Result<Option<UserIdentity>, BackendError> {
        self.outcome.clone()
    }
}

/// Record store fake with per-operation failure switches and call
/// accounting.
#[derive(Default)]
pub struct MockRecordStore {
    resources: Vec<ResourceRecord>,
    fail_upsert: bool,
    fail_search: bool,
    fail_log: bool,
    search_delay: Option<Duration>,
    pub upsert_calls: AtomicUsize,
    pub log_calls: AtomicUsize,
    pub logged_queries: Mutex<Vec<(String, String)>>,
}

impl MockRecordStore {
    pub fn with_resources(resources: Vec<ResourceRecord>) -> Self {
        Self {
            resources,
            ..Default::default()
        }
    }

    pub fn failing_upsert() -> Self {
        Self {
            fail_upsert: true,
            ..Default::default()
        }
    }

    pub fn failing_search() -> Self {
        Self {
            fail_search: true,
            ..Default::default()
        }
    }

    pub fn failing_log() -> Self {
        Self {
            fail_log: true,
            ..Default::default()
        }
    }

    /// Searches stall for the given duration before answering.
    pub fn slow_search(delay: Duration) -> Self {
        Self {
            search_delay: Some(delay),
            ..Default::default()
        }
    }
}

#[async_trait]
impl RecordStore for MockRecordStore {
    async fn upsert_profile(&self, _identity: &UserIdentity) -> Result<(), BackendError> {
        self.upsert_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_upsert {
            return Err(BackendError::Rejected {
                status: 500,
                body: "profiles upsert rejected".into(),
            });
        }
        Ok(())
    }

    async fn search_resources(
        &self,
        _query: &str,
        limit: usize,
    ) -> Result<Vec<ResourceRecord>, BackendError> {
        if let Some(delay) = self.search_delay {
            tokio::time::sleep(delay).await;
        }
        if self.fail_search {
            return Err(BackendError::Transport("catalog unreachable".into()));
        }
        Ok(self.resources.iter().take(limit).cloned().collect())
    }

    async fn log_query(&self, user_id: &str, query: &str) -> Result<(), BackendError> {
        self.log_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_log {
            return Err(BackendError::Timeout);
        }
        self.logged_queries
            .lock()
            .unwrap()
            .push((user_id.to_string(), query.to_string()));
        Ok(())
    }
}

/// URL resolver fake mirroring the public-URL scheme.
pub struct MockUrlResolver;

impl PublicUrlResolver for MockUrlResolver {
    fn public_url(&self, storage_path: &str) -> String {
        format!("https://storage.test/public/{}", storage_path)
    }
}

/// Build a catalog record for fixtures.
pub fn resource(id: &str, title: &str, kind: ResourceKind, storage_path: &str) -> ResourceRecord {
    ResourceRecord {
        id: id.to_string(),
        title: title.to_string(),
        description: format!("{} description", title),
        kind,
        storage_path: storage_path.to_string(),
    }
}
