use time::OffsetDateTime;

use crate::definitions::x509::{util::common_name_or_unknown, validity};
use crate::definitions::ValidationResult;

use super::{Error, SignedToken, VerificationKey};

pub const SIGNATURE_VALID: &str = "JWT Signature validation is successful";

/// Options for signature verification.
#[derive(Debug, Clone, Copy, Default)]
pub struct VerificationOptions {
    /// The time to use for certificate validity period checks.
    /// If `None`, the current system time is used.
    pub validation_time: Option<OffsetDateTime>,
}

impl VerificationOptions {
    fn validation_time(&self) -> OffsetDateTime {
        self.validation_time.unwrap_or_else(OffsetDateTime::now_utc)
    }
}

/// Verifies compact JWS signatures against the leaf certificate of their `x5c` chain.
#[derive(Debug, Clone, Copy, Default)]
pub struct SignatureVerifier {
    options: VerificationOptions,
}

impl SignatureVerifier {
    pub fn new(options: VerificationOptions) -> Self {
        Self { options }
    }

    /// Verify `token`, returning the parsed token only when verification succeeded.
    pub fn verify(&self, token: &str) -> (ValidationResult, Option<SignedToken>) {
        match self.verify_token(token) {
            Ok(signed) => (ValidationResult::success(SIGNATURE_VALID), Some(signed)),
            Err(e) => (ValidationResult::failure(e.kind(), e.to_string()), None),
        }
    }

    /// Parse → leaf certificate → validity window → public key → signature.
    pub fn verify_token(&self, token: &str) -> Result<SignedToken, Error> {
        let signed = SignedToken::parse(token)?;
        let leaf = signed.leaf_certificate();
        let subject = common_name_or_unknown(leaf);

        // Expiry is reported ahead of not-yet-valid when both apply.
        if let Some(error) = validity::check_validity_period_at(leaf, self.options.validation_time())
            .into_iter()
            .next()
        {
            tracing::debug!("leaf certificate '{subject}' rejected: {error}");
            return Err(match error {
                validity::Error::Expired { .. } => Error::CertificateExpired {
                    subject: subject.to_string(),
                    reason: error.to_string(),
                },
                validity::Error::NotYetValid { .. } => Error::CertificateNotYetValid {
                    subject: subject.to_string(),
                    reason: error.to_string(),
                },
            });
        }

        let key = VerificationKey::from_certificate(leaf, signed.algorithm()?)?;
        signed.verify_signature(&key)?;

        tracing::debug!("JWS signed by '{subject}' verified");
        Ok(signed)
    }
}
