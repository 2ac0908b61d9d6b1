//! Reqwest-based blocking HTTP client for the Trust Service.

use std::time::Duration;

use anyhow::Context;

use super::{HttpClient, HttpRequest, HttpResponse};

/// Simple HTTP client implementation using reqwest's blocking API.
///
/// ```ignore
/// use sbi_trust::trust::{HttpTrustServiceClient, ReqwestClient};
///
/// let http_client = ReqwestClient::new()?;
/// let trust_client = HttpTrustServiceClient::new(http_client, &config.trust_service);
/// ```
#[derive(Debug, Clone)]
pub struct ReqwestClient {
    client: reqwest::blocking::Client,
}

impl ReqwestClient {
    /// Create a new ReqwestClient with default settings.
    ///
    /// Default timeout: 30 seconds
    pub fn new() -> anyhow::Result<Self> {
        Self::with_timeout(Duration::from_secs(30))
    }

    /// Create a new ReqwestClient with custom timeout.
    pub fn with_timeout(timeout: Duration) -> anyhow::Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()
            .context("failed to build HTTP client")?;

        Ok(Self { client })
    }
}

impl HttpClient for ReqwestClient {
    type Error = reqwest::Error;

    fn request(&self, request: HttpRequest) -> Result<HttpResponse, Self::Error> {
        let response = self
            .client
            .post(&request.url)
            .header(reqwest::header::CONTENT_TYPE, request.content_type)
            .body(request.body)
            .send()?;
        let status = response.status().as_u16();
        let body = response.bytes()?.to_vec();

        Ok(HttpResponse { status, body })
    }
}
