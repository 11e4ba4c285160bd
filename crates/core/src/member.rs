//! Member record helpers.

use serde::{Deserialize, Serialize};

use crate::constants::CLAIMED_MARKER;

/// Normalizes a submitted name into the form stored in the key column.
///
/// Trims surrounding whitespace and uppercases. Idempotent.
#[must_use]
pub fn normalize_name(name: &str) -> String {
    name.trim().to_uppercase()
}

/// Whether a claimed-flag cell value marks the record as taken.
///
/// Only the literal `TRUE` counts, ignoring case and surrounding whitespace.
/// Empty cells, `FALSE`, `yes` and anything else are unclaimed.
#[must_use]
pub fn is_claimed_flag(value: &str) -> bool {
    value.trim().eq_ignore_ascii_case(CLAIMED_MARKER)
}

/// Read-only view of a member's claim state.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum MemberStatus {
    /// No row carries this name in the key column.
    NotFound,
    /// Row exists and its code has not been handed out.
    Unclaimed,
    /// Row exists and its code was already handed out.
    Claimed,
}

impl MemberStatus {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match *self {
            Self::NotFound => "not_found",
            Self::Unclaimed => "unclaimed",
            Self::Claimed => "claimed",
        }
    }
}

impl std::fmt::Display for MemberStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
