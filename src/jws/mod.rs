//! Compact JWS tokens as produced by SBI devices.
//!
//! Device info, biometric data and digital IDs are all signed the same way: a compact
//! `header.payload.signature` JWS whose protected header carries the signing certificate in
//! `x5c`, leaf first.
use serde::{Deserialize, Serialize};
use sha2::Sha256;
use signature::Verifier;
use strum_macros::{AsRefStr, Display, EnumString};
use x509_cert::Certificate;

use crate::codec;
use crate::definitions::x509::{util, SupportedCurve, X5Chain};
use crate::definitions::FailureKind;

pub mod extract;
pub mod verify;

pub use extract::{extract_leaf_certificate, extract_payload};
pub use verify::{SignatureVerifier, VerificationOptions};

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("expected 3 dot-separated segments in compact JWS, found {0}")]
    MalformedToken(usize),
    #[error("could not decode JWS {segment}: {source}")]
    Decoding {
        segment: &'static str,
        #[source]
        source: codec::Error,
    },
    #[error("could not parse JWS header: {0}")]
    Header(#[from] serde_json::Error),
    #[error("JWS header does not carry an x5c certificate chain")]
    MissingCertificateChain,
    #[error("could not parse x5c certificate chain: {0:#}")]
    CertificateChain(anyhow::Error),
    #[error("unsupported signing algorithm: {0}")]
    UnsupportedAlgorithm(String),
    #[error("could not extract {algorithm} public key from certificate '{subject}': {reason}")]
    PublicKey {
        algorithm: SigningAlgorithm,
        subject: String,
        reason: String,
    },
    #[error("malformed {0} signature")]
    SignatureEncoding(SigningAlgorithm),
    #[error("JWT Signature validation failed")]
    SignatureMismatch,
    #[error("certificate '{subject}' has expired: {reason}")]
    CertificateExpired { subject: String, reason: String },
    #[error("certificate '{subject}' is not yet valid: {reason}")]
    CertificateNotYetValid { subject: String, reason: String },
}

impl Error {
    pub fn kind(&self) -> FailureKind {
        FailureKind::Cryptographic
    }
}

/// Signature algorithms accepted in the `alg` header.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumString, AsRefStr, Display,
)]
pub enum SigningAlgorithm {
    RS256,
    ES256,
    ES384,
}

impl Default for SigningAlgorithm {
    /// SBI mandates RS256 for device signatures.
    fn default() -> Self {
        Self::RS256
    }
}

/// Protected header of an SBI JWS.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JwsHeader {
    pub alg: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x5c: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub typ: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kid: Option<String>,
}

impl JwsHeader {
    pub fn algorithm(&self) -> Result<SigningAlgorithm, Error> {
        self.alg
            .parse()
            .map_err(|_| Error::UnsupportedAlgorithm(self.alg.clone()))
    }
}

/// The three undecoded segments of a compact JWS.
#[derive(Debug, Clone, Copy)]
pub struct CompactJws<'a> {
    pub header: &'a str,
    pub payload: &'a str,
    pub signature: &'a str,
}

impl<'a> CompactJws<'a> {
    pub fn split(token: &'a str) -> Result<Self, Error> {
        let parts: Vec<&str> = token.trim().split('.').collect();
        match parts.as_slice() {
            [header, payload, signature] => Ok(Self {
                header,
                payload,
                signature,
            }),
            _ => Err(Error::MalformedToken(parts.len())),
        }
    }

    pub fn decode_header(&self) -> Result<JwsHeader, Error> {
        let bytes = codec::base64url_decode(self.header).map_err(|source| Error::Decoding {
            segment: "header",
            source,
        })?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    pub fn decode_payload(&self) -> Result<String, Error> {
        codec::base64url_decode_to_string(self.payload).map_err(|source| Error::Decoding {
            segment: "payload",
            source,
        })
    }

    pub fn decode_signature(&self) -> Result<Vec<u8>, Error> {
        codec::base64url_decode(self.signature).map_err(|source| Error::Decoding {
            segment: "signature",
            source,
        })
    }
}

/// Public key of a leaf certificate, bound to the algorithm it verifies.
#[derive(Debug, Clone)]
pub enum VerificationKey {
    Rs256(rsa::pkcs1v15::VerifyingKey<Sha256>),
    Es256(p256::ecdsa::VerifyingKey),
    Es384(p384::ecdsa::VerifyingKey),
}

impl VerificationKey {
    pub fn from_certificate(
        certificate: &Certificate,
        algorithm: SigningAlgorithm,
    ) -> Result<Self, Error> {
        let key_error = |reason: String| Error::PublicKey {
            algorithm,
            subject: util::common_name_or_unknown(certificate).to_string(),
            reason,
        };
        let curve = SupportedCurve::from_certificate(certificate);

        match algorithm {
            SigningAlgorithm::RS256 => util::rsa_public_key(certificate)
                .map(|key| Self::Rs256(rsa::pkcs1v15::VerifyingKey::new(key)))
                .map_err(|e| key_error(format!("{e:#}"))),
            SigningAlgorithm::ES256 if curve == Some(SupportedCurve::P256) => {
                util::public_key::<p256::NistP256>(certificate)
                    .map(Self::Es256)
                    .map_err(|e| key_error(format!("{e:#}")))
            }
            SigningAlgorithm::ES384 if curve == Some(SupportedCurve::P384) => {
                util::public_key::<p384::NistP384>(certificate)
                    .map(Self::Es384)
                    .map_err(|e| key_error(format!("{e:#}")))
            }
            SigningAlgorithm::ES256 | SigningAlgorithm::ES384 => {
                Err(key_error(format!("key curve {curve:?} does not match")))
            }
        }
    }

    pub fn algorithm(&self) -> SigningAlgorithm {
        match self {
            Self::Rs256(_) => SigningAlgorithm::RS256,
            Self::Es256(_) => SigningAlgorithm::ES256,
            Self::Es384(_) => SigningAlgorithm::ES384,
        }
    }

    /// Verify a raw JWS signature (PKCS#1 v1.5 for RSA, `r || s` for ECDSA).
    pub fn verify(&self, message: &[u8], signature: &[u8]) -> Result<(), Error> {
        let encoding_error = Error::SignatureEncoding(self.algorithm());
        let verified = match self {
            Self::Rs256(key) => {
                let signature = rsa::pkcs1v15::Signature::try_from(signature)
                    .map_err(|_| encoding_error)?;
                key.verify(message, &signature)
            }
            Self::Es256(key) => {
                let signature =
                    p256::ecdsa::Signature::from_slice(signature).map_err(|_| encoding_error)?;
                key.verify(message, &signature)
            }
            Self::Es384(key) => {
                let signature =
                    p384::ecdsa::Signature::from_slice(signature).map_err(|_| encoding_error)?;
                key.verify(message, &signature)
            }
        };
        verified.map_err(|e| {
            tracing::info!("JWS signature could not be validated: {e:?}");
            Error::SignatureMismatch
        })
    }
}

/// A parsed compact JWS with its certificate chain.
#[derive(Debug, Clone)]
pub struct SignedToken {
    encoded_header: String,
    encoded_payload: String,
    header: JwsHeader,
    certificate_chain: X5Chain,
    signature: Vec<u8>,
}

impl SignedToken {
    pub fn parse(token: &str) -> Result<Self, Error> {
        let parts = CompactJws::split(token)?;
        let header = parts.decode_header()?;
        // Decoded eagerly so that a broken payload segment is reported as malformed input.
        parts.decode_payload()?;
        let signature = parts.decode_signature()?;

        let certificate_chain = match header.x5c.as_deref() {
            None | Some([]) => return Err(Error::MissingCertificateChain),
            Some(entries) => X5Chain::from_x5c(entries).map_err(Error::CertificateChain)?,
        };

        Ok(Self {
            encoded_header: parts.header.to_string(),
            encoded_payload: parts.payload.to_string(),
            header,
            certificate_chain,
            signature,
        })
    }

    pub fn encoded_header(&self) -> &str {
        &self.encoded_header
    }

    pub fn encoded_payload(&self) -> &str {
        &self.encoded_payload
    }

    pub fn header(&self) -> &JwsHeader {
        &self.header
    }

    pub fn algorithm(&self) -> Result<SigningAlgorithm, Error> {
        self.header.algorithm()
    }

    pub fn certificate_chain(&self) -> &X5Chain {
        &self.certificate_chain
    }

    pub fn leaf_certificate(&self) -> &Certificate {
        self.certificate_chain.end_entity_certificate()
    }

    /// The leaf certificate exactly as it appears in the `x5c` header.
    pub fn leaf_certificate_text(&self) -> &str {
        self.header
            .x5c
            .as_deref()
            .and_then(|entries| entries.first())
            .map(String::as_str)
            .unwrap_or_default()
    }

    pub fn signing_input(&self) -> String {
        format!("{}.{}", self.encoded_header, self.encoded_payload)
    }

    pub fn payload(&self) -> Result<String, Error> {
        codec::base64url_decode_to_string(&self.encoded_payload).map_err(|source| {
            Error::Decoding {
                segment: "payload",
                source,
            }
        })
    }

    pub fn verify_signature(&self, key: &VerificationKey) -> Result<(), Error> {
        key.verify(self.signing_input().as_bytes(), &self.signature)
    }
}
