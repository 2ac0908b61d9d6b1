//! Validator configuration.
use std::path::Path;
use std::time::Duration;

use anyhow::Context;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::jws::{SigningAlgorithm, VerificationOptions};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ValidatorConfig {
    pub trust_service: TrustServiceConfig,
    /// Algorithm a token must be signed with for its certificate to be sent for trust checks.
    pub signing_algorithm: SigningAlgorithm,
    /// The time to use for certificate validity period checks.
    /// If `None`, the current system time is used.
    #[serde(with = "time::serde::rfc3339::option")]
    pub validation_time: Option<OffsetDateTime>,
}

impl ValidatorConfig {
    pub fn from_json(json: &str) -> anyhow::Result<Self> {
        serde_json::from_str(json).context("could not parse validator config")
    }

    pub fn from_path(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("could not read config file {}", path.display()))?;
        Self::from_json(&json)
    }

    pub fn verification_options(&self) -> VerificationOptions {
        VerificationOptions {
            validation_time: self.validation_time,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TrustServiceConfig {
    /// Certificate trust endpoint of the key manager.
    pub url: String,
    /// Per-request timeout, whole seconds on the wire.
    #[serde(with = "seconds")]
    pub timeout: Duration,
    pub request_id: String,
    pub version: String,
}

impl Default for TrustServiceConfig {
    fn default() -> Self {
        Self {
            url: "http://localhost:8088/v1/keymanager/verifyCertificateTrust".to_string(),
            timeout: Duration::from_secs(30),
            request_id: "mosip.pms.certificate.trust.verify".to_string(),
            version: "1.0".to_string(),
        }
    }
}

mod seconds {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(value.as_secs())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        u64::deserialize(deserializer).map(Duration::from_secs)
    }
}
