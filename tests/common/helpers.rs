//! Router construction and request plumbing for integration tests

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, Response, StatusCode, header};
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use ask_jiji::application::use_cases::{AskUseCase, Collaborators};
use ask_jiji::config::{Config, RateLimitConfig};
use ask_jiji::domain::repositories::{IdentityProvider, RecordStore};
use ask_jiji::infrastructure::rate_limiter::RequestWindowLimiter;
use ask_jiji::presentation::controllers::AppState;
use ask_jiji::presentation::routes::create_router;

use super::mocks::MockUrlResolver;

fn test_config() -> Config {
    let mut config = Config::default();
    // Keep the test router lean; docs are covered by configuration.
    config.server.enable_docs = false;
    config
}

/// Router with mock collaborators and a default rate-limit budget.
pub fn router_with(
    identity: Arc<dyn IdentityProvider>,
    records: Arc<dyn RecordStore>,
) -> Router {
    router_with_rate_limit(identity, records, RateLimitConfig::default())
}

/// Router with mock collaborators and an explicit rate-limit budget.
pub fn router_with_rate_limit(
    identity: Arc<dyn IdentityProvider>,
    records: Arc<dyn RecordStore>,
    rate_limit: RateLimitConfig,
) -> Router {
    let limiter = Arc::new(RequestWindowLimiter::new(rate_limit));
    let collaborators = Collaborators {
        identity,
        records,
        urls: Arc::new(MockUrlResolver),
    };
    let state = AppState {
        ask_use_case: Arc::new(AskUseCase::new(limiter, Some(collaborators))),
    };
    create_router(state, &test_config())
}

/// Router with mock collaborators and an explicit HTTP request timeout.
pub fn router_with_timeout(
    identity: Arc<dyn IdentityProvider>,
    records: Arc<dyn RecordStore>,
    timeout_seconds: u64,
) -> Router {
    let limiter = Arc::new(RequestWindowLimiter::new(RateLimitConfig::default()));
    let collaborators = Collaborators {
        identity,
        records,
        urls: Arc::new(MockUrlResolver),
    };
    let state = AppState {
        ask_use_case: Arc::new(AskUseCase::new(limiter, Some(collaborators))),
    };
    let mut config = test_config();
    config.server.request_timeout_seconds = timeout_seconds;
    create_router(state, &config)
}

/// Router whose collaborator credentials were never configured.
pub fn misconfigured_router() -> Router {
    let limiter = Arc::new(RequestWindowLimiter::new(RateLimitConfig::default()));
    let state = AppState {
        ask_use_case: Arc::new(AskUseCase::new(limiter, None)),
    };
    create_router(state, &test_config())
}

/// POST /ask-jiji with the given JSON body and optional bearer token.
pub async fn post_ask(
    router: &Router,
    body: Value,
    bearer: Option<&str>,
    forwarded_for: Option<&str>,
) -> Response<Body> {
    let mut request = Request::builder()
        .method("POST")
        .uri("/ask-jiji")
        .header(header::CONTENT_TYPE, "application/json");

    if let Some(token) = bearer {
        request = request.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    if let Some(addr) = forwarded_for {
        request = request.header("x-forwarded-for", addr);
    }

    router
        .clone()
        .oneshot(request.body(Body::from(body.to_string())).unwrap())
        .await
        .unwrap()
}

/// POST /ask-jiji with an arbitrary raw body and a valid bearer.
pub async fn post_ask_raw(
    router: &Router,
    body: &'static str,
    content_type: Option<&str>,
) -> Response<Body> {
    let mut request = Request::builder()
        .method("POST")
        .uri("/ask-jiji")
        .header(header::AUTHORIZATION, "Bearer tok");

    if let Some(content_type) = content_type {
        request = request.header(header::CONTENT_TYPE, content_type);
    }

    router
        .clone()
        .oneshot(request.body(Body::from(body)).unwrap())
        .await
        .unwrap()
}

/// Collect a response body as JSON.
pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// Assert status and return the parsed body.
pub async fn expect_json(response: Response<Body>, status: StatusCode) -> Value {
    assert_eq!(response.status(), status);
    body_json(response).await
}
