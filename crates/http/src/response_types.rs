//! Response types (Serialize)

use codex_claim_core::ClaimOutcome;
use serde::{Deserialize, Serialize};

pub const NOT_FOUND_MESSAGE: &str = "No matching member found.";
pub const CLAIMED_MESSAGE: &str = "Your code has already been claimed.";
pub const CONNECTION_MESSAGE: &str = "Server error: Could not connect to database.";
pub const UNEXPECTED_MESSAGE: &str = "An unexpected error occurred.";
pub const INVALID_BODY_MESSAGE: &str = "Invalid request body.";

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ClaimStatus {
    Success,
    NotFound,
    Claimed,
    Error,
}

/// Body of every `/api/claim` response.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ClaimResponse {
    pub status: ClaimStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
}

impl ClaimResponse {
    pub fn error(message: impl Into<String>) -> Self {
        Self { status: ClaimStatus::Error, message: Some(message.into()), code: None }
    }
}

impl From<ClaimOutcome> for ClaimResponse {
    fn from(outcome: ClaimOutcome) -> Self {
        match outcome {
            ClaimOutcome::Success { code } => {
                Self { status: ClaimStatus::Success, message: None, code: Some(code) }
            },
            ClaimOutcome::NotFound => Self {
                status: ClaimStatus::NotFound,
                message: Some(NOT_FOUND_MESSAGE.to_owned()),
                code: None,
            },
            ClaimOutcome::AlreadyClaimed => Self {
                status: ClaimStatus::Claimed,
                message: Some(CLAIMED_MESSAGE.to_owned()),
                code: None,
            },
        }
    }
}

#[derive(Debug, Serialize)]
#[non_exhaustive]
pub struct VersionResponse {
    pub version: &'static str,
}
