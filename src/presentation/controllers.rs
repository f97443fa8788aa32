//! HTTP controllers for the ask and health endpoints

use std::sync::Arc;

use axum::{
    Extension, Json,
    extract::{State, rejection::JsonRejection},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
};

use crate::application::use_cases::{AskRequestContext, AskUseCase};
use crate::domain::errors::AskError;
use crate::presentation::middleware::{ClientKey, RequestId, extract_bearer};
use crate::presentation::models::{AskRequest, AskResponse, ErrorResponse, HealthResponse};

/// Shared state for the ask endpoint.
#[derive(Clone)]
pub struct AppState {
    pub ask_use_case: Arc<AskUseCase>,
}

/// Map a terminal pipeline failure to its HTTP status and body.
///
/// 4xx outcomes never carry `details`; collaborator failures do, so
/// operators can diagnose without the core leaking validation or auth
/// internals.
fn error_response(error: AskError) -> Response {
    let status = match &error {
        AskError::RateLimited => StatusCode::TOO_MANY_REQUESTS,
        AskError::InvalidInput(_) => StatusCode::BAD_REQUEST,
        AskError::Unauthorized => StatusCode::UNAUTHORIZED,
        AskError::ServerMisconfigured
        | AskError::ProfileSyncFailed(_)
        | AskError::ResourceFetchFailed(_)
        | AskError::QueryLogFailed(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };

    if status.is_server_error() {
        tracing::error!(error = %error, detail = ?error.detail(), http_status = %status, "ask pipeline failed");
    } else {
        tracing::warn!(error = %error, http_status = %status, "ask request rejected");
    }

    let body = ErrorResponse {
        details: error.detail(),
        error: error.to_string(),
    };

    (status, Json(body)).into_response()
}

/// Answer a free-text query with related resources
#[utoipa::path(
    post,
    path = "/ask-jiji",
    request_body = AskRequest,
    responses(
        (status = 200, description = "Synthesized answer with related resources", body = AskResponse),
        (status = 400, description = "Invalid query", body = ErrorResponse),
        (status = 401, description = "Missing or unverifiable bearer credential", body = ErrorResponse),
        (status = 429, description = "Per-client rate limit exceeded", body = ErrorResponse),
        (status = 500, description = "Misconfiguration or collaborator failure", body = ErrorResponse)
    ),
    tag = "ask"
)]
pub async fn ask(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    ClientKey(client_key): ClientKey,
    headers: HeaderMap,
    body: Result<Json<AskRequest>, JsonRejection>,
) -> Response {
    // A body that isn't JSON at all gets the same treatment as a JSON
    // body whose query isn't a string: it flows into the pipeline as an
    // absent query so the rate gate still counts the request and the
    // caller gets the structured validation rejection, never axum's
    // plain-text one.
    let raw_query = match body {
        Ok(Json(body)) => body.query,
        Err(rejection) => {
            tracing::debug!(error = %rejection, "request body is not valid JSON");
            None
        }
    };

    let context = AskRequestContext {
        request_id: request_id.0,
        client_key,
        bearer: extract_bearer(&headers),
        raw_query,
    };

    match state.ask_use_case.execute(context).await {
        Ok(answer) => (StatusCode::OK, Json(AskResponse::from(answer))).into_response(),
        Err(error) => error_response(error),
    }
}

/// Liveness probe
#[utoipa::path(
    get,
    path = "/health",
    responses((status = 200, description = "Service is alive", body = HealthResponse)),
    tag = "health"
)]
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
    })
}
