//! Error types for the posts fetcher.
//!
//! # Design
//! Every failure is terminal for the attempt that produced it. `BadStatus`
//! keeps only the status code; the body of a non-2xx response is never
//! inspected.

use thiserror::Error;

/// The request produced no HTTP response (connection refused, DNS failure,
/// timeout, body read aborted).
#[derive(Debug, Error)]
#[error("{0}")]
pub struct TransportError(pub String);

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        Self(err.to_string())
    }
}

/// Errors returned by `PostFetcher`.
#[derive(Debug, Error)]
pub enum FetchError {
    /// No response was received.
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    /// The server answered with a status outside `200..300`.
    #[error("unexpected HTTP status {0}")]
    BadStatus(u16),

    /// The body is not a JSON array of well-formed posts.
    #[error("failed to decode posts: {0}")]
    Decode(#[from] serde_json::Error),
}
