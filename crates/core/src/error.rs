use thiserror::Error;

/// Errors raised while parsing core domain values.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum CoreError {
    #[error("invalid claim variant: {0} (expected \"name\" or \"contact\")")]
    InvalidClaimVariant(String),
}
