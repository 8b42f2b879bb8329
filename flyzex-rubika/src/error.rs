//! Rubika transport error types.

use thiserror::Error;

/// Errors from talking to the Rubika Bot API.
#[derive(Error, Debug)]
pub enum RubikaError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Unexpected response payload for {method}")]
    UnexpectedPayload { method: String },
}

pub type Result<T> = std::result::Result<T, RubikaError>;
