//! Signature and trust validation for SBI (Secure Biometric Interface) device responses.
//!
//! The entry point is [`Validator`], which takes a [`ValidationRequest`] describing a
//! discovery, device-info, capture or rcapture response and returns a single
//! [`ValidationResult`].
//!
//! ```ignore
//! use sbi_trust::{ValidationRequest, Validator, ValidatorConfig};
//! use sbi_trust::trust::{HttpTrustServiceClient, ReqwestClient};
//!
//! let config = ValidatorConfig::default();
//! let http = ReqwestClient::with_timeout(config.trust_service.timeout)?;
//! let client = HttpTrustServiceClient::new(http, &config.trust_service);
//! let validator = Validator::new(config, client);
//!
//! let result = validator.validate(&ValidationRequest::new("INFO", response_json, None));
//! println!("{}: {}", result.status, result.description);
//! ```
pub mod codec;
pub mod config;
pub mod definitions;
pub mod jws;
pub mod trust;
pub mod validation;

pub use config::ValidatorConfig;
pub use definitions::{FailureKind, ValidationRequest, ValidationResult, ValidationStatus};
pub use validation::{ValidationError, Validator};
