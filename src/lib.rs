//! Ask Jiji - query answering service
//!
//! A single-endpoint pipeline: validate the caller's free-text query,
//! authenticate against the external identity provider, enforce
//! per-client rate limits, run the dependent data operations, and
//! return a synthesized answer with related resources.

pub mod app;
pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod logging;
pub mod presentation;

pub use app::{AppHandle, create_app};
pub use config::Config;
pub use logging::init_tracing;
