use crate::definitions::helpers::NonEmptyVec;

use anyhow::{Context, Result};

use base64::{engine::general_purpose::STANDARD, Engine};
use x509_cert::der::Encode;
use x509_cert::{certificate::Certificate, der::Decode};

use super::util::common_name_or_unknown;

/// X.509 certificate with the DER representation held in memory for ease of serialization.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct CertificateWithDer {
    pub inner: Certificate,
    der: Vec<u8>,
}

impl CertificateWithDer {
    pub fn from_der(bytes: &[u8]) -> Result<Self> {
        let inner = Certificate::from_der(bytes)
            .context("unable to parse certificate from DER encoding")?;
        Ok(Self {
            inner,
            der: bytes.to_vec(),
        })
    }

    /// Parse an `x5c` header entry: standard base64 (not base64url) of the DER bytes.
    pub fn from_x5c(entry: &str) -> Result<Self> {
        let der = STANDARD
            .decode(entry.trim())
            .context("x5c entry is not valid base64")?;
        CertificateWithDer::from_der(&der)
    }

    pub fn from_cert(certificate: Certificate) -> Result<Self> {
        let der = certificate.to_der()?;
        Ok(Self {
            inner: certificate,
            der,
        })
    }

    pub fn der(&self) -> &[u8] {
        &self.der
    }

    /// The DER bytes in `x5c` form.
    pub fn to_x5c(&self) -> String {
        STANDARD.encode(&self.der)
    }
}

/// Certificate chain, leaf first. Never empty.
#[derive(Debug, Clone)]
pub struct X5Chain(NonEmptyVec<CertificateWithDer>);

impl From<NonEmptyVec<CertificateWithDer>> for X5Chain {
    fn from(v: NonEmptyVec<CertificateWithDer>) -> Self {
        Self(v)
    }
}

impl X5Chain {
    pub fn builder() -> Builder {
        Builder::default()
    }

    /// Build a chain from the entries of a JOSE `x5c` header.
    pub fn from_x5c<S: AsRef<str>>(entries: &[S]) -> Result<Self> {
        entries
            .iter()
            .enumerate()
            .try_fold(Self::builder(), |builder, (index, entry)| {
                builder
                    .with_x5c_certificate(entry.as_ref())
                    .with_context(|| format!("x5c entry {index} is not a certificate"))
            })?
            .build()
    }

    /// Retrieve the end-entity certificate.
    pub fn end_entity_certificate(&self) -> &Certificate {
        &self.0.first().inner
    }

    /// Retrieve the common name of the end-entity certificate.
    pub fn end_entity_common_name(&self) -> &str {
        common_name_or_unknown(self.end_entity_certificate())
    }

    /// Retrieve the root-entity certificate.
    pub fn root_entity_certificate(&self) -> &Certificate {
        &self.0.last().inner
    }

    /// Iterate over the certificates in the chain.
    pub fn iter(&self) -> impl Iterator<Item = &CertificateWithDer> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        false
    }
}

#[derive(Default, Debug, Clone)]
pub struct Builder {
    certs: Vec<CertificateWithDer>,
}

impl Builder {
    pub fn with_certificate(mut self, cert: Certificate) -> Result<Builder> {
        let x509 = CertificateWithDer::from_cert(cert)?;
        self.certs.push(x509);
        Ok(self)
    }
    pub fn with_der_certificate(mut self, data: &[u8]) -> Result<Builder> {
        let x509 = CertificateWithDer::from_der(data)?;
        self.certs.push(x509);
        Ok(self)
    }
    pub fn with_x5c_certificate(mut self, entry: &str) -> Result<Builder> {
        let x509 = CertificateWithDer::from_x5c(entry)?;
        self.certs.push(x509);
        Ok(self)
    }
    pub fn build(self) -> Result<X5Chain> {
        Ok(X5Chain(self.certs.try_into().context(
            "at least one certificate must be given to the builder",
        )?))
    }
}
