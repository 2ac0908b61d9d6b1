use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display};

/// A single response to validate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationRequest {
    /// SBI method code, e.g. `INFO` or `RCAPTURE`.
    pub method_name: String,
    /// Raw JSON text returned by the device.
    pub method_response: String,
    /// Raw JSON text with out-of-band metadata such as `certificationType`.
    #[serde(default, rename = "extraInfoJson", alias = "extraInfo")]
    pub extra_info: Option<String>,
}

impl ValidationRequest {
    pub fn new(
        method_name: impl Into<String>,
        method_response: impl Into<String>,
        extra_info: Option<String>,
    ) -> Self {
        Self {
            method_name: method_name.into(),
            method_response: method_response.into(),
            extra_info,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, AsRefStr, Display)]
#[serde(rename_all = "UPPERCASE")]
#[strum(serialize_all = "UPPERCASE")]
pub enum ValidationStatus {
    Success,
    Failure,
}

/// Category of a failed validation.
///
/// Lets callers tell an expected compliance failure (bad signature, untrusted certificate) apart
/// from an infrastructure fault without looking at the description text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, AsRefStr, Display)]
#[serde(rename_all = "camelCase")]
pub enum FailureKind {
    /// Unknown method, empty or malformed payload, missing fields.
    Structural,
    /// Signature mismatch, expired or not yet valid certificate, unparsable token.
    Cryptographic,
    /// A trust rule rejected the response.
    Trust,
    /// The Trust Service could not be reached or answered with garbage.
    Transport,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationResult {
    pub status: ValidationStatus,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub failure: Option<FailureKind>,
}

impl ValidationResult {
    pub fn success(description: impl Into<String>) -> Self {
        Self {
            status: ValidationStatus::Success,
            description: description.into(),
            failure: None,
        }
    }

    pub fn failure(kind: FailureKind, description: impl Into<String>) -> Self {
        Self {
            status: ValidationStatus::Failure,
            description: description.into(),
            failure: Some(kind),
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == ValidationStatus::Success
    }

    pub fn is_failure(&self) -> bool {
        self.status == ValidationStatus::Failure
    }
}
