//! Application setup and wiring

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use tokio_util::sync::CancellationToken;

use crate::application::use_cases::{AskUseCase, Collaborators};
use crate::config::Config;
use crate::infrastructure::rate_limiter::RequestWindowLimiter;
use crate::infrastructure::supabase::SupabaseClient;
use crate::presentation::controllers::AppState;
use crate::presentation::routes::create_router;

/// Handle returned from create_app for graceful shutdown coordination
pub struct AppHandle {
    pub router: Router,
    pub shutdown_token: CancellationToken,
}

/// Spawns a background worker that periodically evicts stale rate-limit
/// windows. Respects the cancellation token for graceful shutdown.
fn spawn_sweep_worker(
    limiter: Arc<RequestWindowLimiter>,
    interval_seconds: u64,
    shutdown_token: CancellationToken,
) {
    let interval = Duration::from_secs(interval_seconds.max(1));

    tokio::spawn(async move {
        let mut interval_timer = tokio::time::interval(interval);
        // Skip the immediate first tick; there is nothing to sweep yet.
        interval_timer.tick().await;

        loop {
            tokio::select! {
                _ = interval_timer.tick() => {
                    limiter.sweep().await;
                    tracing::debug!(
                        denied_total = limiter.denied_total(),
                        "rate-limit sweep pass complete"
                    );
                }
                _ = shutdown_token.cancelled() => {
                    tracing::debug!("rate-limit sweep worker stopping");
                    break;
                }
            }
        }
    });
}

/// Build the collaborator bundle, or `None` when credentials are absent.
///
/// A missing collaborator does not prevent startup; every pipeline
/// request is answered with the misconfiguration outcome instead.
fn build_collaborators(config: &Config) -> Option<Collaborators> {
    let (url, anon_key) = match config.supabase.credentials() {
        Some(credentials) => credentials,
        None => {
            tracing::warn!(
                "Supabase credentials not configured; ask requests will report misconfiguration"
            );
            return None;
        }
    };

    let timeout = Duration::from_secs(config.supabase.request_timeout_seconds);
    match SupabaseClient::new(url, anon_key, timeout) {
        Ok(client) => {
            let client = Arc::new(client);
            Some(Collaborators {
                identity: client.clone(),
                records: client.clone(),
                urls: client,
            })
        }
        Err(e) => {
            tracing::warn!(error = %e, "failed to build Supabase client; ask requests will report misconfiguration");
            None
        }
    }
}

/// Create the application router and its background workers.
pub fn create_app(config: Config) -> AppHandle {
    let shutdown_token = CancellationToken::new();

    let limiter = Arc::new(RequestWindowLimiter::new(config.rate_limit.clone()));
    if limiter.is_enabled() {
        spawn_sweep_worker(
            limiter.clone(),
            config.rate_limit.sweep_interval_seconds,
            shutdown_token.clone(),
        );
    } else {
        tracing::warn!("rate limiting disabled by configuration");
    }

    let collaborators = build_collaborators(&config);

    let app_state = AppState {
        ask_use_case: Arc::new(AskUseCase::new(limiter, collaborators)),
    };

    AppHandle {
        router: create_router(app_state, &config),
        shutdown_token,
    }
}
