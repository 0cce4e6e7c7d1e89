//! Error types for the content source.
//!
//! None of these reach the player: every variant is recovered by substituting
//! a fallback round.

/// Why a generated round could not be used.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("no API key configured")]
    MissingApiKey,

    #[error("no browser window available")]
    NoWindow,

    #[error("network error: {0}")]
    Network(String),

    #[error("content source returned HTTP {0}")]
    Status(u16),

    #[error("content source returned no text")]
    EmptyResponse,

    #[error("malformed response: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("response field '{0}' is empty")]
    MissingField(&'static str),

    #[error("invalid round letter: {0:?}")]
    InvalidLetter(String),
}
