//! HTTP transport types and the injected transport seam.
//!
//! # Design
//! Requests and responses are plain data. `PostFetcher` builds an
//! `HttpRequest`, hands it to an `HttpTransport` and parses the returned
//! `HttpResponse`, so the status and decode rules can be tested without a
//! network. The transport is passed in by the caller instead of living in a
//! process-wide client.

use async_trait::async_trait;

use crate::error::TransportError;

/// A GET request described as plain data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub url: String,
    pub headers: Vec<(String, String)>,
}

/// An HTTP response described as plain data.
///
/// Any status is a valid response here; interpreting it is the fetcher's job.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

/// Executes a request and returns whatever the server answered.
///
/// Implementations must return `Ok` for every status code, including 4xx and
/// 5xx, and `Err` only when no response was obtained.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, TransportError>;
}
