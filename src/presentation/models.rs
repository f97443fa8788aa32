//! API request and response models

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::entities::{AskAnswer, ResourceKind, ResourceWithLink};

/// Request body for the ask endpoint.
///
/// `query` is accepted as raw JSON so that a missing or non-string
/// value reaches the validator instead of being rejected by
/// deserialization with a different error shape.
#[derive(Debug, Deserialize, ToSchema)]
pub struct AskRequest {
    /// Free-text question, 3 to 500 characters after trimming
    #[schema(value_type = String, example = "What are the basics of RAG?")]
    pub query: Option<serde_json::Value>,
}

/// Successful answer payload.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AskResponse {
    /// Identifier correlating this response with server logs
    #[schema(example = "550e8400-e29b-41d4-a716-446655440000")]
    pub request_id: Uuid,

    /// Synthesized human-readable answer embedding the query
    #[schema(example = "Here's what I found for \"RAG basics\".")]
    pub answer: String,

    /// Up to five related resources with resolved public URLs
    pub resources: Vec<ResourceDto>,
}

/// One catalog resource with its resolved public URL.
#[derive(Debug, Serialize, ToSchema)]
pub struct ResourceDto {
    #[schema(example = "a1b2c3")]
    pub id: String,

    #[schema(example = "RAG from scratch")]
    pub title: String,

    #[schema(example = "Slides covering retrieval-augmented generation")]
    pub description: String,

    #[serde(rename = "type")]
    #[schema(example = "slide-deck")]
    pub kind: ResourceKind,

    #[schema(example = "https://project.supabase.co/storage/v1/object/public/resources/decks/rag.pdf")]
    pub url: String,
}

impl From<ResourceWithLink> for ResourceDto {
    fn from(resource: ResourceWithLink) -> Self {
        Self {
            id: resource.id,
            title: resource.title,
            description: resource.description,
            kind: resource.kind,
            url: resource.url,
        }
    }
}

impl From<AskAnswer> for AskResponse {
    fn from(answer: AskAnswer) -> Self {
        Self {
            request_id: answer.request_id,
            answer: answer.answer,
            resources: answer.resources.into_iter().map(Into::into).collect(),
        }
    }
}

/// Failure payload returned for every non-success outcome.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// Human-readable error message
    #[schema(example = "Query must be between 3 and 500 characters.")]
    pub error: String,

    /// Underlying collaborator detail, present only for 500-class
    /// downstream failures
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

/// Health check response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    /// Liveness indicator
    #[schema(example = "ok")]
    pub status: String,
}
