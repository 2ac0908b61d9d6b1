use anyhow::{Context, Error};
use const_oid::{
    db::{
        rfc4519::COMMON_NAME,
        rfc5912::{ID_EC_PUBLIC_KEY, SECP_256_R_1, SECP_384_R_1},
    },
    AssociatedOid, ObjectIdentifier,
};
use der::{
    asn1::{Ia5StringRef, PrintableStringRef, TeletexStringRef, Utf8StringRef},
    referenced::OwnedToRef,
    Encode, Tag, Tagged,
};
use ecdsa::{PrimeCurve, VerifyingKey};
use elliptic_curve::{
    sec1::{FromEncodedPoint, ToEncodedPoint},
    AffinePoint, CurveArithmetic, FieldBytesSize, PublicKey,
};
use rsa::{pkcs8::DecodePublicKey, RsaPublicKey};
use sec1::point::ModulusSize;
use x509_cert::{attr::AttributeValue, Certificate};

/// Elliptic curves a leaf certificate may carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SupportedCurve {
    P256,
    P384,
}

impl SupportedCurve {
    pub fn from_certificate(certificate: &Certificate) -> Option<Self> {
        let spki = &certificate.tbs_certificate.subject_public_key_info;
        if spki.algorithm.oid != ID_EC_PUBLIC_KEY {
            return None;
        }
        let curve: ObjectIdentifier = spki.algorithm.parameters.as_ref()?.decode_as().ok()?;
        if curve == SECP_256_R_1 {
            Some(Self::P256)
        } else if curve == SECP_384_R_1 {
            Some(Self::P384)
        } else {
            None
        }
    }
}

/// Get the public key from a certificate for verification.
pub fn public_key<C>(certificate: &Certificate) -> Result<VerifyingKey<C>, Error>
where
    C: AssociatedOid + CurveArithmetic + PrimeCurve,
    AffinePoint<C>: FromEncodedPoint<C> + ToEncodedPoint<C>,
    FieldBytesSize<C>: ModulusSize,
{
    certificate
        .tbs_certificate
        .subject_public_key_info
        .owned_to_ref()
        .try_into()
        .map(|key: PublicKey<C>| key.into())
        .context("could not parse public key from PKCS8 SPKI")
}

/// Get the RSA public key from a certificate for verification.
pub fn rsa_public_key(certificate: &Certificate) -> Result<RsaPublicKey, Error> {
    let spki = certificate
        .tbs_certificate
        .subject_public_key_info
        .to_der()
        .context("could not encode SPKI")?;
    RsaPublicKey::from_public_key_der(&spki).context("could not parse RSA public key from SPKI")
}

/// Get the first CommonName of the X.509 certificate, or return "Unknown".
pub fn common_name_or_unknown(certificate: &Certificate) -> &str {
    common_name(certificate).unwrap_or("Unknown")
}

fn common_name(certificate: &Certificate) -> Option<&str> {
    certificate
        .tbs_certificate
        .subject
        .0
        .iter()
        .flat_map(|rdn| rdn.0.iter())
        .filter_map(|attribute| {
            if attribute.oid == COMMON_NAME {
                attribute_value_to_str(&attribute.value)
            } else {
                None
            }
        })
        .next()
}

pub fn attribute_value_to_str(av: &AttributeValue) -> Option<&str> {
    match av.tag() {
        Tag::PrintableString => PrintableStringRef::try_from(av).ok().map(|s| s.as_str()),
        Tag::Utf8String => Utf8StringRef::try_from(av).ok().map(|s| s.as_str()),
        Tag::Ia5String => Ia5StringRef::try_from(av).ok().map(|s| s.as_str()),
        Tag::TeletexString => TeletexStringRef::try_from(av).ok().map(|s| s.as_str()),
        _ => None,
    }
}
