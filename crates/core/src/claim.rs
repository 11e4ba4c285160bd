//! Claim request and outcome types.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Which fields a claim request must carry.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ClaimVariant {
    /// Only `name` is required; only the claimed flag is written.
    #[default]
    Name,
    /// `name`, `email`, `appogee` and `dob` are all required and written on claim.
    Contact,
}

impl ClaimVariant {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match *self {
            Self::Name => "name",
            Self::Contact => "contact",
        }
    }

    /// Whether contact details are required alongside the name.
    #[must_use]
    pub const fn requires_contact(&self) -> bool {
        matches!(*self, Self::Contact)
    }
}

impl FromStr for ClaimVariant {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "name" => Ok(Self::Name),
            "contact" => Ok(Self::Contact),
            other => Err(CoreError::InvalidClaimVariant(other.to_owned())),
        }
    }
}

impl std::fmt::Display for ClaimVariant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raw claim payload as submitted by the caller. Nothing is validated yet.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ClaimInput {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub appogee: Option<String>,
    #[serde(default)]
    pub dob: Option<String>,
}

impl ClaimInput {
    /// Name-only input.
    #[must_use]
    pub fn with_name(name: impl Into<String>) -> Self {
        Self { name: Some(name.into()), ..Self::default() }
    }
}

/// Contact details written to the member row on a successful claim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactDetails {
    pub email: String,
    pub appogee: String,
    pub dob: String,
}

/// A validated claim: normalized name plus contact details when the variant
/// requires them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClaimRequest {
    pub normalized_name: String,
    pub contact: Option<ContactDetails>,
}

/// Result of a claim that reached the spreadsheet without failing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClaimOutcome {
    /// The code was handed out and the row is now flagged.
    Success { code: String },
    /// No row carries the name.
    NotFound,
    /// The row was already flagged; nothing was written.
    AlreadyClaimed,
}
