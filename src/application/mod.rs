//! Application layer: validation, identity resolution, orchestration,
//! and response assembly

pub mod assembler;
pub mod use_cases;
pub mod validation;

pub use use_cases::{AskRequestContext, AskUseCase, Collaborators, IdentityResolver};
