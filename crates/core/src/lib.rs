//! Core types and constants for codex-claim
//!
//! This crate contains domain types shared across all other crates: the
//! member sheet column layout, name normalization, and the claim
//! request/outcome types.

mod claim;
mod constants;
mod env_config;
mod error;
mod member;

pub use claim::*;
pub use constants::*;
pub use env_config::{env_non_empty, env_parse_with_default};
pub use error::*;
pub use member::*;
