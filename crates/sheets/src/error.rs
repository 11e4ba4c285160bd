//! Typed error enum for the spreadsheet gateway.

use thiserror::Error;

/// Errors from spreadsheet gateway operations.
#[derive(Debug, Error)]
pub enum SheetError {
    /// Session could not be established (auth, network, missing spreadsheet).
    #[error("connection failed: {0}")]
    Connection(String),
    #[error("credentials unavailable: {0}")]
    Credentials(String),
    #[error("HTTP request failed: {0}")]
    HttpRequest(#[from] reqwest::Error),
    #[error("HTTP status {code}: {body}")]
    HttpStatus { code: u16, body: String },
    #[error("JSON parse error in {context}: {source}")]
    JsonParse {
        context: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("worksheet not found: {0}")]
    MissingWorksheet(String),
    /// Row or column outside the addressable range (both are 1-based).
    #[error("invalid cell coordinate: row {row}, column {column}")]
    InvalidCoordinate { row: u32, column: u32 },
    /// Failure injected into the in-memory table.
    #[error("injected failure: {0}")]
    Injected(String),
}

impl SheetError {
    /// Whether this error means no session could be opened at all.
    #[cfg(test)]
    #[must_use]
    pub fn is_connection(&self) -> bool {
        matches!(self, Self::Connection(_) | Self::Credentials(_) | Self::MissingWorksheet(_))
    }
}
