use proptest::prelude::*;

use sbi_trust::codec::{base64url_decode, base64url_decode_to_string, base64url_encode};

proptest! {
    #![proptest_config(ProptestConfig::with_cases(512))]

    #[test]
    fn decode_inverts_encode(bytes in proptest::collection::vec(any::<u8>(), 0..512)) {
        let encoded = base64url_encode(&bytes);
        prop_assert!(!encoded.contains(&['+', '/', '='][..]));
        prop_assert_eq!(base64url_decode(&encoded).unwrap(), bytes);
    }

    #[test]
    fn padding_is_tolerated(bytes in proptest::collection::vec(any::<u8>(), 1..64)) {
        let mut padded = base64url_encode(&bytes);
        while padded.len() % 4 != 0 {
            padded.push('=');
        }
        prop_assert_eq!(base64url_decode(&padded).unwrap(), bytes);
    }

    #[test]
    fn text_survives(text in ".*") {
        prop_assert_eq!(base64url_decode_to_string(&base64url_encode(&text)).unwrap(), text);
    }
}
