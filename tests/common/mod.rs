//! Shared test support

pub mod helpers;
pub mod mocks;
