//! Core domain models, errors, and collaborator ports

pub mod entities;
pub mod errors;
pub mod repositories;

pub use entities::{AskAnswer, ResourceKind, ResourceRecord, ResourceWithLink, UserIdentity};
pub use errors::{AskError, BackendError, ValidationError};
