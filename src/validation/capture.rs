//! `CAPTURE` and `RCAPTURE` responses.
use serde_json::{Map, Value};

use crate::definitions::{PartnerDomain, TrustTarget, ValidationResult};
use crate::trust::{TrustServiceClient, TRUST_VALID};

use super::digital_id::DigitalIdValidator;
use super::error::{conclude, Outcome, ValidationError};
use super::{parse_json, string_field};

const BIOMETRICS: &str = "biometrics";
const DATA: &str = "data";
const DIGITAL_ID: &str = "digitalId";
const CERTIFICATION_TYPE: &str = "certificationType";

pub struct CaptureValidator<'a, C> {
    digital_id: DigitalIdValidator<'a, C>,
}

impl<'a, C: TrustServiceClient> CaptureValidator<'a, C> {
    pub fn new(digital_id: DigitalIdValidator<'a, C>) -> Self {
        Self { digital_id }
    }

    pub fn validate_capture(&self, response: &str, extra_info: Option<&str>) -> ValidationResult {
        conclude(self.check_capture(response, extra_info))
    }

    /// Every biometric sample must carry a trusted signature and a trusted digital ID.
    /// The first sample that fails ends validation.
    pub fn check_capture(&self, response: &str, extra_info: Option<&str>) -> Outcome {
        let response = parse_json(response, "capture response")?;
        let samples = match response.get(BIOMETRICS) {
            Some(Value::Array(samples)) => samples,
            Some(_) => {
                return Err(ValidationError::UnexpectedShape {
                    what: BIOMETRICS,
                    expected: "an array",
                })
            }
            None => return Err(ValidationError::MissingField(BIOMETRICS)),
        };
        if samples.is_empty() {
            return Err(ValidationError::EmptyCollection(BIOMETRICS));
        }

        samples
            .iter()
            .enumerate()
            .try_fold(TRUST_VALID, |_, (index, sample)| {
                let sample = sample.as_object().ok_or(ValidationError::UnexpectedShape {
                    what: "biometric sample",
                    expected: "an object",
                })?;
                self.check_sample(sample, extra_info).map_err(|e| {
                    tracing::debug!("biometric sample {index} failed: {e}");
                    e
                })
            })
    }

    pub fn check_sample(&self, sample: &Map<String, Value>, extra_info: Option<&str>) -> Outcome {
        let data = string_field(sample, DATA)?;
        let signed = self.digital_id.verify(data)?;
        self.digital_id.check_certificate_trust(
            data,
            PartnerDomain::Device,
            TrustTarget::BiometricData,
        )?;

        let payload = parse_json(&signed.payload()?, "biometric data")?;
        let payload = payload.as_object().ok_or(ValidationError::UnexpectedShape {
            what: "biometric data",
            expected: "an object",
        })?;
        let digital_id = string_field(payload, DIGITAL_ID)?;

        let extra_info = parse_json(
            extra_info.ok_or(ValidationError::MissingExtraInfo)?,
            "extra info",
        )?;
        let extra_info = extra_info.as_object().ok_or(ValidationError::UnexpectedShape {
            what: "extra info",
            expected: "an object",
        })?;

        self.digital_id.check_signed_digital_id(
            digital_id,
            string_field(extra_info, CERTIFICATION_TYPE)?,
            TrustTarget::DigitalId,
        )
    }
}
