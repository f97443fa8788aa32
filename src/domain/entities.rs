//! Domain entities and value objects

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Verified caller identity returned by the identity provider.
///
/// Read-only within the core; the id is the correlation key for profile
/// sync and query logging.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserIdentity {
    pub id: String,
    pub full_name: Option<String>,
}

/// Closed set of resource types carried by the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "kebab-case")]
pub enum ResourceKind {
    SlideDeck,
    Video,
    Article,
    Document,
}

impl ResourceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceKind::SlideDeck => "slide-deck",
            ResourceKind::Video => "video",
            ResourceKind::Article => "article",
            ResourceKind::Document => "document",
        }
    }
}

impl std::fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Catalog entry as stored by the external record store.
///
/// The core only reads and re-projects these; `storage_path` is the raw
/// object key, never returned to callers directly.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ResourceRecord {
    pub id: String,
    pub title: String,
    pub description: String,
    #[serde(rename = "type")]
    pub kind: ResourceKind,
    pub storage_path: String,
}

/// Resource projected with a resolved, publicly retrievable URL.
///
/// Constructed fresh per request; never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceWithLink {
    pub id: String,
    pub title: String,
    pub description: String,
    pub kind: ResourceKind,
    pub url: String,
}

/// Assembled outcome of a successful ask pipeline run.
#[derive(Debug, Clone)]
pub struct AskAnswer {
    pub request_id: Uuid,
    pub answer: String,
    pub resources: Vec<ResourceWithLink>,
}
