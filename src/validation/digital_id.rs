//! Digital ID checks.
//!
//! A signed digital ID is trusted against the partner domain selected by the certification
//! level of the device: [`CertificationLevel::L0`] devices sign with a certificate issued to the
//! device provider, [`CertificationLevel::L1`] devices with one issued to the FTM provider.
use crate::definitions::{CertificationLevel, DigitalId, PartnerDomain, TrustTarget, ValidationResult};
use crate::jws::{extract_leaf_certificate, SignatureVerifier, SignedToken, SigningAlgorithm};
use crate::trust::{TrustServiceClient, TrustValidator, TRUST_VALID};

use super::error::{conclude, Outcome, ValidationError};

pub const UNSIGNED_DIGITAL_ID_VALID: &str = "Unsigned Digital ID validation is successful";

pub struct DigitalIdValidator<'a, C> {
    verifier: &'a SignatureVerifier,
    trust: &'a TrustValidator<C>,
    algorithm: SigningAlgorithm,
}

impl<'a, C: TrustServiceClient> DigitalIdValidator<'a, C> {
    pub fn new(
        verifier: &'a SignatureVerifier,
        trust: &'a TrustValidator<C>,
        algorithm: SigningAlgorithm,
    ) -> Self {
        Self {
            verifier,
            trust,
            algorithm,
        }
    }

    pub fn validate_signed_digital_id(
        &self,
        token: &str,
        certification_level: &str,
        target: TrustTarget,
    ) -> ValidationResult {
        conclude(self.check_signed_digital_id(token, certification_level, target))
    }

    pub fn check_signed_digital_id(
        &self,
        token: &str,
        certification_level: &str,
        target: TrustTarget,
    ) -> Outcome {
        let level: CertificationLevel = certification_level
            .parse()
            .map_err(|_| ValidationError::UnsupportedCertification(certification_level.into()))?;
        self.verify(token)?;

        let domain = level.partner_domain();
        tracing::debug!("{level} digital ID is trusted against the {domain} partner domain");
        self.check_certificate_trust(token, domain, target)
    }

    pub(crate) fn verify(&self, token: &str) -> Result<SignedToken, ValidationError> {
        Ok(self.verifier.verify_token(token)?)
    }

    /// Trust check of the leaf certificate of an already verified token.
    pub(crate) fn check_certificate_trust(
        &self,
        token: &str,
        domain: PartnerDomain,
        target: TrustTarget,
    ) -> Outcome {
        let certificate = extract_leaf_certificate(token, self.algorithm)?.ok_or(
            ValidationError::CertificateUnavailable {
                expected: self.algorithm,
            },
        )?;
        self.trust.check_trust(&certificate, domain, target)?;
        Ok(TRUST_VALID)
    }
}

pub fn validate_unsigned_digital_id(payload: &str) -> ValidationResult {
    conclude(check_unsigned_digital_id(payload))
}

/// Both `type` and `deviceSubType` must be present and non-null.
pub fn check_unsigned_digital_id(payload: &str) -> Outcome {
    let digital_id: DigitalId =
        serde_json::from_str(payload).map_err(ValidationError::malformed("digital ID"))?;
    if digital_id.is_typed() {
        Ok(UNSIGNED_DIGITAL_ID_VALID)
    } else {
        tracing::debug!("unsigned digital ID lacks a device type or subtype: {digital_id:?}");
        Err(ValidationError::UnsignedDigitalId)
    }
}
