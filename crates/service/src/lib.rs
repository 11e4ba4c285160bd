//! Service layer for codex-claim
//!
//! Holds the claim flow between the HTTP/CLI surfaces and the sheet gateway.

#![allow(clippy::missing_errors_doc, reason = "Errors are self-explanatory from Result types")]
#![allow(missing_debug_implementations, reason = "Internal types")]

mod claim_service;
mod error;
mod name_locks;


pub use claim_service::{CONTACT_REQUIRED, ClaimService, NAME_REQUIRED};
pub use error::ClaimError;
