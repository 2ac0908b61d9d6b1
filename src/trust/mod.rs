//! Certificate trust checks against the partner trust store.
//!
//! # Architecture
//!
//! - [`HttpClient`]: pure blocking HTTP abstraction
//! - [`TrustServiceClient`]: submit a trust request, get the service's answer
//! - [`HttpTrustServiceClient`]: JSON envelope over an [`HttpClient`]
//! - [`TrustValidator`]: PEM wrapping, request time, verdict interpretation
//!
//! Tests and embedders replace the network by implementing [`TrustServiceClient`] directly.

mod client;
mod error;
mod http;

#[cfg(feature = "reqwest")]
mod reqwest_client;

pub use client::{
    CertificateTrustRequest, HttpTrustServiceClient, ServiceError, TrustServiceClient,
    TrustServiceRequest, TrustServiceResponse, TrustStatus, TrustVerdict,
};
pub use error::TrustServiceError;
pub use http::{HttpClient, HttpRequest, HttpResponse, NoHttpClientError};

#[cfg(feature = "reqwest")]
pub use reqwest_client::ReqwestClient;

use serde_json::Value;
use time::{format_description::FormatItem, macros::format_description, OffsetDateTime};

use crate::config::TrustServiceConfig;
use crate::definitions::{FailureKind, PartnerDomain, TrustTarget, ValidationResult};

pub const TRUST_VALID: &str = "Trust Root Validation is Successful";

const BEGIN_CERTIFICATE: &str = "-----BEGIN CERTIFICATE-----\n";
const END_CERTIFICATE: &str = "\n-----END CERTIFICATE-----\n";

const REQUEST_TIME_FORMAT: &[FormatItem<'static>] = format_description!(
    "[year]-[month]-[day]T[hour]:[minute]:[second].[subsecond digits:3]Z"
);

/// Wrap base64 certificate text in PEM markers.
pub fn wrap_certificate_pem(certificate_text: &str) -> String {
    format!("{BEGIN_CERTIFICATE}{certificate_text}{END_CERTIFICATE}")
}

pub fn format_request_time(at: OffsetDateTime) -> Result<String, TrustServiceError> {
    Ok(at
        .to_offset(time::UtcOffset::UTC)
        .format(REQUEST_TIME_FORMAT)?)
}

#[derive(Debug, thiserror::Error)]
pub enum TrustError {
    #[error("Trust Validation Failed for [{target}] >> PartnerType[{domain}] and CertificateData[{certificate}]")]
    Untrusted {
        target: TrustTarget,
        domain: PartnerDomain,
        certificate: String,
        errors: Vec<ServiceError>,
    },
    #[error("Exception in Trust root Validation - with Message - {0}")]
    Service(#[from] TrustServiceError),
}

impl TrustError {
    pub fn kind(&self) -> FailureKind {
        match self {
            Self::Untrusted { .. } => FailureKind::Trust,
            Self::Service(_) => FailureKind::Transport,
        }
    }
}

/// Checks certificates with the Trust Service.
#[derive(Debug, Clone)]
pub struct TrustValidator<C> {
    client: C,
    request_id: String,
    version: String,
}

impl<C: TrustServiceClient> TrustValidator<C> {
    pub fn new(client: C, config: &TrustServiceConfig) -> Self {
        Self {
            client,
            request_id: config.request_id.clone(),
            version: config.version.clone(),
        }
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    pub fn validate_trust(
        &self,
        certificate_text: &str,
        domain: PartnerDomain,
        target: TrustTarget,
    ) -> ValidationResult {
        match self.check_trust(certificate_text, domain, target) {
            Ok(()) => ValidationResult::success(TRUST_VALID),
            Err(e) => ValidationResult::failure(e.kind(), e.to_string()),
        }
    }

    pub fn check_trust(
        &self,
        certificate_text: &str,
        domain: PartnerDomain,
        target: TrustTarget,
    ) -> Result<(), TrustError> {
        let request = self.build_request(certificate_text, domain, OffsetDateTime::now_utc())?;
        tracing::debug!("checking trust of {target} certificate for partner domain {domain}");

        let verdict = self
            .client
            .verify_certificate_trust(&request)
            .and_then(TrustServiceResponse::verdict)
            .map_err(|e| {
                tracing::warn!("trust check for {target} could not be completed: {e}");
                e
            })?;

        if verdict.trusted {
            return Ok(());
        }

        tracing::warn!(
            "{target} certificate is not trusted for partner domain {domain}: {:?}",
            verdict.errors
        );
        Err(TrustError::Untrusted {
            target,
            domain,
            certificate: certificate_text.to_string(),
            errors: verdict.errors,
        })
    }

    pub fn build_request(
        &self,
        certificate_text: &str,
        domain: PartnerDomain,
        at: OffsetDateTime,
    ) -> Result<TrustServiceRequest, TrustServiceError> {
        Ok(TrustServiceRequest {
            id: self.request_id.clone(),
            version: self.version.clone(),
            metadata: Value::Object(Default::default()),
            requesttime: format_request_time(at)?,
            request: CertificateTrustRequest {
                certificate_data: wrap_certificate_pem(certificate_text),
                partner_domain: domain.to_string(),
            },
        })
    }
}
