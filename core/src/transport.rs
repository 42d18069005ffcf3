//! `HttpTransport` backed by `reqwest`.

use async_trait::async_trait;
use reqwest::Client;

use crate::config::FetchConfig;
use crate::error::TransportError;
use crate::http::{HttpRequest, HttpResponse, HttpTransport};

/// Async transport over a shared `reqwest::Client`.
///
/// Status codes are never turned into errors here (no `error_for_status`), so
/// 4xx/5xx responses reach the fetcher as data.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    /// Builds a client with the configured request timeout.
    ///
    /// Fails only if reqwest cannot set up the client (e.g. TLS backend
    /// initialisation); no request is made here.
    pub fn new(config: &FetchConfig) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .timeout(config.request_timeout)
            .build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        let mut builder = self.client.get(&request.url);
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }

        let response = builder.send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;

        Ok(HttpResponse { status, body })
    }
}
