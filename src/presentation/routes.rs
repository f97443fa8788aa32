//! Route definitions and middleware stack

use std::time::Duration;

use axum::{
    Router, middleware,
    routing::{get, post},
};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, timeout::TimeoutLayer, trace::TraceLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::config::Config;
use crate::presentation::controllers::{AppState, ask, health_check};
use crate::presentation::middleware::{logging_middleware, request_id_middleware};
use crate::presentation::models::*;

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        crate::presentation::controllers::ask,
        crate::presentation::controllers::health_check
    ),
    components(schemas(
        AskRequest,
        AskResponse,
        ResourceDto,
        ErrorResponse,
        HealthResponse,
        crate::domain::entities::ResourceKind
    )),
    tags(
        (name = "ask", description = "Query answering endpoint"),
        (name = "health", description = "Liveness probe")
    ),
    info(
        title = "Ask Jiji API",
        version = "0.1.0",
        description = "Single-endpoint question answering over a curated resource catalog"
    )
)]
pub struct ApiDoc;

fn build_cors_layer(config: &Config) -> CorsLayer {
    if config.server.allowed_origins.len() == 1 && config.server.allowed_origins[0] == "*" {
        CorsLayer::new()
            .allow_origin(tower_http::cors::AllowOrigin::mirror_request())
            .allow_methods([axum::http::Method::GET, axum::http::Method::POST])
            .allow_headers([
                axum::http::header::CONTENT_TYPE,
                axum::http::header::AUTHORIZATION,
            ])
    } else {
        let mut layer = CorsLayer::new();
        for origin in &config.server.allowed_origins {
            match axum::http::HeaderValue::from_str(origin) {
                Ok(origin_header) => {
                    layer = layer.allow_origin(origin_header);
                }
                Err(_) => {
                    tracing::warn!(origin, "Invalid CORS origin in config; skipping");
                }
            }
        }
        layer
            .allow_methods([axum::http::Method::GET, axum::http::Method::POST])
            .allow_headers([
                axum::http::header::CONTENT_TYPE,
                axum::http::header::AUTHORIZATION,
            ])
    }
}

/// Create the application router.
///
/// Rate limiting is not a middleware concern here: the orchestrator owns
/// the rate gate so the health probe and docs stay exempt by
/// construction.
pub fn create_router(app_state: AppState, config: &Config) -> Router {
    let mut router = Router::new()
        .route("/ask-jiji", post(ask))
        .route("/health", get(health_check));

    // Avoid leaking docs in hardened production deployments.
    if config.server.enable_docs {
        router =
            router.merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));
    }

    // Request-id sits outside the timeout so even a timeout response
    // carries the header.
    let service_builder = ServiceBuilder::new()
        .layer(TraceLayer::new_for_http())
        .layer(build_cors_layer(config))
        .layer(middleware::from_fn(request_id_middleware))
        .layer(middleware::from_fn(logging_middleware))
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.server.request_timeout_seconds,
        )));

    router.layer(service_builder).with_state(app_state)
}
