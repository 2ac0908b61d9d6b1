//! Validation of SBI method responses.
//!
//! [`Validator::validate`] is the single entry point: it resolves the method, then hands the
//! response to the [`DeviceInfoValidator`] or the [`CaptureValidator`]. Both share one
//! [`DigitalIdValidator`], which owns the signature and trust steps.
use serde_json::{Map, Value};

use crate::config::ValidatorConfig;
use crate::definitions::{MethodName, ValidationRequest, ValidationResult};
use crate::jws::SignatureVerifier;
use crate::trust::{TrustServiceClient, TrustValidator};

pub mod capture;
pub mod device_info;
pub mod digital_id;
pub mod error;

pub use capture::CaptureValidator;
pub use device_info::DeviceInfoValidator;
pub use digital_id::DigitalIdValidator;
pub use error::{Outcome, ValidationError};

use error::conclude;

/// Validates SBI responses with a configured trust service client.
///
/// A `Validator` holds no mutable state; it can be shared across threads whenever `C` can.
#[derive(Debug, Clone)]
pub struct Validator<C> {
    config: ValidatorConfig,
    verifier: SignatureVerifier,
    trust: TrustValidator<C>,
}

impl<C: TrustServiceClient> Validator<C> {
    pub fn new(config: ValidatorConfig, client: C) -> Self {
        Self {
            verifier: SignatureVerifier::new(config.verification_options()),
            trust: TrustValidator::new(client, &config.trust_service),
            config,
        }
    }

    pub fn config(&self) -> &ValidatorConfig {
        &self.config
    }

    pub fn trust(&self) -> &TrustValidator<C> {
        &self.trust
    }

    pub fn digital_id(&self) -> DigitalIdValidator<'_, C> {
        DigitalIdValidator::new(&self.verifier, &self.trust, self.config.signing_algorithm)
    }

    pub fn device_info(&self) -> DeviceInfoValidator<'_, C> {
        DeviceInfoValidator::new(self.digital_id())
    }

    pub fn capture(&self) -> CaptureValidator<'_, C> {
        CaptureValidator::new(self.digital_id())
    }

    /// Validate one response. Every failure is reported in the returned result.
    pub fn validate(&self, request: &ValidationRequest) -> ValidationResult {
        let result = conclude(self.check(request));
        match result.failure {
            Some(kind) => tracing::info!(
                "{} response failed validation ({kind}): {}",
                request.method_name,
                result.description
            ),
            None => tracing::debug!("{} response validated", request.method_name),
        }
        result
    }

    pub fn check(&self, request: &ValidationRequest) -> Outcome {
        let method: MethodName = request
            .method_name
            .parse()
            .map_err(|_| ValidationError::UnsupportedMethod(request.method_name.clone()))?;

        let response = request.method_response.as_str();
        if response.trim().is_empty() {
            return Err(ValidationError::EmptyResponse);
        }

        tracing::debug!("validating {method} response");
        match method {
            MethodName::Discover => self.device_info().check_discovery(response),
            MethodName::DeviceInfo => self.device_info().check_device_info(response),
            MethodName::Capture | MethodName::RCapture => self
                .capture()
                .check_capture(response, request.extra_info.as_deref()),
        }
    }
}

pub(crate) fn parse_json(text: &str, what: &'static str) -> Result<Value, ValidationError> {
    serde_json::from_str(text).map_err(ValidationError::malformed(what))
}

/// A string field that is present and not `null`.
pub(crate) fn string_field<'v>(
    record: &'v Map<String, Value>,
    name: &'static str,
) -> Result<&'v str, ValidationError> {
    match record.get(name) {
        None | Some(Value::Null) => Err(ValidationError::MissingField(name)),
        Some(Value::String(value)) => Ok(value),
        Some(_) => Err(ValidationError::UnexpectedShape {
            what: name,
            expected: "a string",
        }),
    }
}

#[cfg(test)]
mod test {
    use serde_json::json;

    use super::*;
    use crate::definitions::FailureKind;

    #[test]
    fn string_fields() {
        let record = json!({"a": "x", "b": null, "c": 1});
        let record = record.as_object().unwrap();
        assert_eq!(string_field(record, "a").unwrap(), "x");
        assert!(matches!(
            string_field(record, "b"),
            Err(ValidationError::MissingField("b"))
        ));
        assert!(matches!(
            string_field(record, "missing"),
            Err(ValidationError::MissingField("missing"))
        ));
        assert!(matches!(
            string_field(record, "c"),
            Err(ValidationError::UnexpectedShape { what: "c", .. })
        ));
    }

    #[test]
    fn method_and_emptiness_come_first() {
        let validator = Validator::new(
            ValidatorConfig::default(),
            crate::trust::HttpTrustServiceClient::new((), &Default::default()),
        );

        let result = validator.validate(&ValidationRequest::new("STREAM", "{}", None));
        assert_eq!(result.description, "Method not supported");
        assert_eq!(result.failure, Some(FailureKind::Structural));

        for method in [" CAPTURE ", "INFO\n", "Capture"] {
            let result = validator.validate(&ValidationRequest::new(method, "{}", None));
            assert_eq!(result.description, "Method not supported", "{method:?}");
        }

        let result = validator.validate(&ValidationRequest::new("CAPTURE", " \n", None));
        assert_eq!(result.description, "Response is empty");
    }
}
