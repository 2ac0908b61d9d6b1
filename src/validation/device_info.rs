//! Discovery and device info responses.
use serde_json::{Map, Value};

use crate::codec;
use crate::definitions::{DeviceStatus, PartnerDomain, TrustTarget, ValidationResult};
use crate::trust::TrustServiceClient;

use super::digital_id::{check_unsigned_digital_id, DigitalIdValidator};
use super::error::{conclude, Outcome, ValidationError};
use super::{parse_json, string_field};

pub const DEVICE_NOT_REGISTERED: &str = "Device is not registered";

const DEVICE_INFO: &str = "deviceInfo";
const DEVICE_STATUS: &str = "deviceStatus";
const DIGITAL_ID: &str = "digitalId";
const CERTIFICATION: &str = "certification";

pub struct DeviceInfoValidator<'a, C> {
    digital_id: DigitalIdValidator<'a, C>,
}

impl<'a, C: TrustServiceClient> DeviceInfoValidator<'a, C> {
    pub fn new(digital_id: DigitalIdValidator<'a, C>) -> Self {
        Self { digital_id }
    }

    /// Validate a `DEVICE` response. Only the first discovered device is checked.
    pub fn validate_discovery(&self, response: &str) -> ValidationResult {
        conclude(self.check_discovery(response))
    }

    /// Validate an `INFO` response, stopping at the first record that fails.
    pub fn validate_device_info(&self, response: &str) -> ValidationResult {
        conclude(self.check_device_info(response))
    }

    pub fn check_discovery(&self, response: &str) -> Outcome {
        let records = match parse_json(response, "discovery response")? {
            Value::Array(records) => records,
            _ => {
                return Err(ValidationError::UnexpectedShape {
                    what: "discovery response",
                    expected: "an array",
                })
            }
        };
        let first = records
            .first()
            .ok_or(ValidationError::EmptyCollection("discovery response"))?;
        let record = as_record(first, "discovered device")?;

        let digital_id = codec::base64url_decode_to_string(string_field(record, DIGITAL_ID)?)
            .map_err(ValidationError::decoding("digital ID"))?;
        check_unsigned_digital_id(&digital_id)
    }

    pub fn check_device_info(&self, response: &str) -> Outcome {
        let records = match parse_json(response, "device info response")? {
            Value::Array(records) => records,
            single @ Value::Object(_) => vec![single],
            _ => {
                return Err(ValidationError::UnexpectedShape {
                    what: "device info response",
                    expected: "an array of records",
                })
            }
        };
        if records.is_empty() {
            return Err(ValidationError::EmptyCollection("device info response"));
        }

        records
            .iter()
            .enumerate()
            .try_fold(DEVICE_NOT_REGISTERED, |_, (index, record)| {
                as_record(record, "device info record")
                    .and_then(|record| self.check_record(record))
                    .map_err(|e| {
                        tracing::debug!("device info record {index} failed: {e}");
                        e
                    })
            })
    }

    pub fn check_record(&self, record: &Map<String, Value>) -> Outcome {
        let device_info = string_field(record, DEVICE_INFO)?;
        match probe_unsigned(device_info) {
            Some(decoded) => check_unsigned(&decoded),
            None => self.check_signed(device_info),
        }
    }

    fn check_signed(&self, token: &str) -> Outcome {
        let signed = self.digital_id.verify(token)?;
        self.digital_id
            .check_certificate_trust(token, PartnerDomain::Device, TrustTarget::DeviceInfo)?;

        let decoded = match parse_json(&signed.payload()?, "device info payload")? {
            Value::Null => return Err(ValidationError::DecodedDeviceInfoNull),
            Value::Object(decoded) => decoded,
            _ => {
                return Err(ValidationError::UnexpectedShape {
                    what: "device info payload",
                    expected: "an object",
                })
            }
        };
        self.digital_id.check_signed_digital_id(
            string_field(&decoded, DIGITAL_ID)?,
            string_field(&decoded, CERTIFICATION)?,
            TrustTarget::DigitalId,
        )
    }
}

/// Device info that decodes to a JSON object is unsigned; anything else is treated as signed.
fn probe_unsigned(device_info: &str) -> Option<Map<String, Value>> {
    let probed = codec::base64url_decode(device_info)
        .map_err(|e| e.to_string())
        .and_then(|bytes| serde_json::from_slice::<Value>(&bytes).map_err(|e| e.to_string()));
    match probed {
        Ok(Value::Object(decoded)) => Some(decoded),
        Ok(other) => {
            tracing::debug!("device info decodes to non-object {other}, treating as signed");
            None
        }
        Err(e) => {
            tracing::debug!("device info is not unsigned JSON ({e}), treating as signed");
            None
        }
    }
}

fn check_unsigned(decoded: &Map<String, Value>) -> Outcome {
    let status = string_field(decoded, DEVICE_STATUS)?;
    let status: DeviceStatus = status
        .parse()
        .map_err(|_| ValidationError::UnknownDeviceStatus(status.to_string()))?;
    match status {
        DeviceStatus::NotRegistered => Ok(DEVICE_NOT_REGISTERED),
        registered => Err(ValidationError::DeviceRegistered(registered)),
    }
}

fn as_record<'v>(value: &'v Value, what: &'static str) -> Result<&'v Map<String, Value>, ValidationError> {
    value.as_object().ok_or(ValidationError::UnexpectedShape {
        what,
        expected: "an object",
    })
}
