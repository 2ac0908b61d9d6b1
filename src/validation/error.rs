use crate::codec;
use crate::definitions::{DeviceStatus, FailureKind, ValidationResult};
use crate::jws::{self, SigningAlgorithm};
use crate::trust::TrustError;

/// Everything that can fail a validation call.
///
/// The `Display` output of each variant is the `description` of the resulting
/// [`ValidationResult`].
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error("Method not supported")]
    UnsupportedMethod(String),
    #[error("Response is empty")]
    EmptyResponse,
    #[error("malformed {what}: {source}")]
    MalformedJson {
        what: &'static str,
        #[source]
        source: serde_json::Error,
    },
    #[error("could not decode {what}: {source}")]
    Decoding {
        what: &'static str,
        #[source]
        source: codec::Error,
    },
    #[error("expected {what} to be {expected}")]
    UnexpectedShape {
        what: &'static str,
        expected: &'static str,
    },
    #[error("missing field '{0}'")]
    MissingField(&'static str),
    #[error("{0} is empty")]
    EmptyCollection(&'static str),
    #[error("extra info is required to validate captured biometrics")]
    MissingExtraInfo,
    #[error("Unsupported certification type")]
    UnsupportedCertification(String),
    #[error("unknown device status '{0}'")]
    UnknownDeviceStatus(String),
    #[error("Device info Decoded value is null")]
    DecodedDeviceInfoNull,
    #[error("Unsigned Digital ID validation failed")]
    UnsignedDigitalId,
    #[error("Device is registered, so can not be unsigned")]
    DeviceRegistered(DeviceStatus),
    #[error("certificate unavailable: token is not signed with {expected}")]
    CertificateUnavailable { expected: SigningAlgorithm },
    #[error(transparent)]
    Signature(#[from] jws::Error),
    #[error(transparent)]
    Trust(#[from] TrustError),
}

impl ValidationError {
    pub fn kind(&self) -> FailureKind {
        match self {
            Self::Signature(e) => e.kind(),
            Self::Trust(e) => e.kind(),
            Self::CertificateUnavailable { .. } => FailureKind::Cryptographic,
            Self::DeviceRegistered(_) => FailureKind::Trust,
            Self::UnsupportedMethod(_)
            | Self::EmptyResponse
            | Self::MalformedJson { .. }
            | Self::Decoding { .. }
            | Self::UnexpectedShape { .. }
            | Self::MissingField(_)
            | Self::EmptyCollection(_)
            | Self::MissingExtraInfo
            | Self::UnsupportedCertification(_)
            | Self::UnknownDeviceStatus(_)
            | Self::DecodedDeviceInfoNull
            | Self::UnsignedDigitalId => FailureKind::Structural,
        }
    }

    pub(crate) fn malformed(what: &'static str) -> impl FnOnce(serde_json::Error) -> Self {
        move |source| Self::MalformedJson { what, source }
    }

    pub(crate) fn decoding(what: &'static str) -> impl FnOnce(codec::Error) -> Self {
        move |source| Self::Decoding { what, source }
    }
}

impl From<ValidationError> for ValidationResult {
    fn from(error: ValidationError) -> Self {
        ValidationResult::failure(error.kind(), error.to_string())
    }
}

/// A successful step yields the description of its result.
pub type Outcome = Result<&'static str, ValidationError>;

pub(crate) fn conclude(outcome: Outcome) -> ValidationResult {
    match outcome {
        Ok(description) => ValidationResult::success(description),
        Err(error) => error.into(),
    }
}
