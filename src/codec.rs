//! base64url and UTF-8 helpers shared by every component.
use base64::{
    alphabet,
    engine::{general_purpose::GeneralPurpose, DecodePaddingMode, GeneralPurposeConfig},
    Engine,
};

/// URL-safe alphabet, unpadded on encode, padding tolerated on decode.
const BASE64_URL: GeneralPurpose = GeneralPurpose::new(
    &alphabet::URL_SAFE,
    GeneralPurposeConfig::new()
        .with_encode_padding(false)
        .with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid base64url: {0}")]
    Base64(#[from] base64::DecodeError),
    #[error("invalid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

pub fn base64url_decode(input: &str) -> Result<Vec<u8>, Error> {
    BASE64_URL.decode(input.trim()).map_err(Into::into)
}

pub fn base64url_encode(data: impl AsRef<[u8]>) -> String {
    BASE64_URL.encode(data)
}

pub fn to_utf8_string(bytes: Vec<u8>) -> Result<String, Error> {
    String::from_utf8(bytes).map_err(Into::into)
}

/// Decode a base64url segment straight into text.
pub fn base64url_decode_to_string(input: &str) -> Result<String, Error> {
    to_utf8_string(base64url_decode(input)?)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn encode_is_unpadded_and_url_safe() {
        assert_eq!(base64url_encode([0xfb, 0xff]), "-_8");
    }

    #[test]
    fn decode_accepts_padding() {
        assert_eq!(base64url_decode("-_8=").unwrap(), vec![0xfb, 0xff]);
        assert_eq!(base64url_decode("-_8").unwrap(), vec![0xfb, 0xff]);
    }

    #[test]
    fn decode_rejects_standard_alphabet() {
        assert!(base64url_decode("+/8").is_err());
    }

    #[test]
    fn text_must_be_utf8() {
        let encoded = base64url_encode([0xc3, 0x28]);
        assert!(matches!(
            base64url_decode_to_string(&encoded),
            Err(Error::Utf8(_))
        ));
        assert_eq!(
            base64url_decode_to_string(&base64url_encode("{}")).unwrap(),
            "{}"
        );
    }
}
