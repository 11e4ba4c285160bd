//! Typed error enum for the service layer.
//!
//! Not-found and already-claimed are outcomes, not errors; see
//! `ClaimOutcome`.

use codex_claim_sheets::SheetError;
use thiserror::Error;

/// Service-layer error for the claim flow.
#[derive(Debug, Error)]
pub enum ClaimError {
    /// Required input missing or blank. The message is safe to show callers.
    #[error("invalid input: {0}")]
    Validation(String),

    /// No spreadsheet session could be opened.
    #[error("connection: {0}")]
    Connection(#[source] SheetError),

    /// Lookup, read or write failed after the session was opened.
    #[error("sheet: {0}")]
    Sheet(#[source] SheetError),
}

impl ClaimError {
    #[cfg(test)]
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    #[cfg(test)]
    pub fn is_connection(&self) -> bool {
        matches!(self, Self::Connection(_))
    }
}

impl From<SheetError> for ClaimError {
    fn from(err: SheetError) -> Self {
        Self::Sheet(err)
    }
}
