//! Trust Service wire format and client seam.
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::config::TrustServiceConfig;

use super::{HttpClient, HttpRequest, TrustServiceError};

/// Envelope submitted to the Trust Service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrustServiceRequest {
    pub id: String,
    pub version: String,
    #[serde(default)]
    pub metadata: Value,
    /// UTC, `yyyy-MM-ddTHH:mm:ss.SSSZ`.
    pub requesttime: String,
    pub request: CertificateTrustRequest,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CertificateTrustRequest {
    /// PEM-wrapped certificate.
    pub certificate_data: String,
    pub partner_domain: String,
}

/// Envelope returned by the Trust Service.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrustServiceResponse {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub responsetime: Option<String>,
    #[serde(default)]
    pub response: Option<TrustStatus>,
    #[serde(default)]
    pub errors: Option<Vec<ServiceError>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrustStatus {
    /// `"true"` or `"false"` on the wire.
    #[serde(default)]
    pub status: Value,
}

impl TrustStatus {
    /// Only an explicit `true` is a positive status. A missing or `null` status is not.
    pub fn is_positive(&self) -> bool {
        match &self.status {
            Value::String(status) => status == "true",
            Value::Bool(status) => *status,
            _ => false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceError {
    #[serde(alias = "code")]
    pub error_code: String,
    pub message: String,
}

/// Interpreted Trust Service answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrustVerdict {
    pub trusted: bool,
    pub errors: Vec<ServiceError>,
}

impl TrustServiceResponse {
    /// Trusted only with no errors and a positive status.
    pub fn verdict(self) -> Result<TrustVerdict, TrustServiceError> {
        let errors = self.errors.unwrap_or_default();
        match self.response {
            Some(status) => Ok(TrustVerdict {
                trusted: errors.is_empty() && status.is_positive(),
                errors,
            }),
            None if !errors.is_empty() => Ok(TrustVerdict {
                trusted: false,
                errors,
            }),
            None => Err(TrustServiceError::EmptyResponse),
        }
    }
}

/// Submits certificate trust checks.
///
/// Implementations perform a single blocking attempt; any retry policy belongs to the
/// implementation, not to the validators calling it.
pub trait TrustServiceClient: Send + Sync {
    fn verify_certificate_trust(
        &self,
        request: &TrustServiceRequest,
    ) -> Result<TrustServiceResponse, TrustServiceError>;
}

impl<T: TrustServiceClient + ?Sized> TrustServiceClient for &T {
    fn verify_certificate_trust(
        &self,
        request: &TrustServiceRequest,
    ) -> Result<TrustServiceResponse, TrustServiceError> {
        (**self).verify_certificate_trust(request)
    }
}

impl<T: TrustServiceClient + ?Sized> TrustServiceClient for Arc<T> {
    fn verify_certificate_trust(
        &self,
        request: &TrustServiceRequest,
    ) -> Result<TrustServiceResponse, TrustServiceError> {
        (**self).verify_certificate_trust(request)
    }
}

/// [`TrustServiceClient`] posting JSON envelopes over an [`HttpClient`].
#[derive(Debug, Clone)]
pub struct HttpTrustServiceClient<H> {
    http: H,
    url: String,
}

impl<H: HttpClient> HttpTrustServiceClient<H> {
    pub fn new(http: H, config: &TrustServiceConfig) -> Self {
        Self {
            http,
            url: config.url.clone(),
        }
    }
}

impl<H: HttpClient> TrustServiceClient for HttpTrustServiceClient<H> {
    fn verify_certificate_trust(
        &self,
        request: &TrustServiceRequest,
    ) -> Result<TrustServiceResponse, TrustServiceError> {
        let body = serde_json::to_vec(request).map_err(TrustServiceError::Encode)?;
        let response = self
            .http
            .request(HttpRequest {
                url: self.url.clone(),
                body,
                content_type: "application/json".to_string(),
            })
            .map_err(|e| TrustServiceError::Http {
                url: self.url.clone(),
                source: Box::new(e),
            })?;

        match serde_json::from_slice(&response.body) {
            Ok(parsed) => Ok(parsed),
            Err(_) if !response.is_success() => Err(TrustServiceError::Status {
                status: response.status,
            }),
            Err(e) => Err(TrustServiceError::Decode(e)),
        }
    }
}
