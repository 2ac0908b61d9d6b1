//! Inspection of tokens without verifying them.
use super::{CompactJws, Error, SigningAlgorithm};

/// Return the leaf `x5c` entry of `token` when it is signed with `expected`.
///
/// Tokens signed with any other algorithm yield `Ok(None)`.
pub fn extract_leaf_certificate(
    token: &str,
    expected: SigningAlgorithm,
) -> Result<Option<String>, Error> {
    let header = CompactJws::split(token)?.decode_header()?;
    if header.alg != expected.as_ref() {
        tracing::debug!(
            "not extracting certificate: token is signed with {}, expected {expected}",
            header.alg
        );
        return Ok(None);
    }
    header
        .x5c
        .and_then(|entries| entries.into_iter().next())
        .map(Some)
        .ok_or(Error::MissingCertificateChain)
}

/// Decode the payload of `token` as text, whether or not its signature is valid.
pub fn extract_payload(token: &str) -> Result<String, Error> {
    CompactJws::split(token)?.decode_payload()
}
