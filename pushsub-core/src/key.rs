//! VAPID application-server key conversion.
//!
//! Servers hand the page their public key as URL-safe base64 without padding
//! (the format `pushsub generate` writes). `PushManager.subscribe()` wants the
//! raw bytes, so the key is normalized to the standard alphabet, re-padded and
//! decoded.

use base64::{
    alphabet,
    engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig},
    Engine,
};
use thiserror::Error;

/// Standard-alphabet decoder that tolerates non-zero trailing bits, like `atob`.
const STANDARD_LENIENT: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new()
        .with_decode_allow_trailing_bits(true)
        .with_decode_padding_mode(DecodePaddingMode::RequireCanonical),
);

/// Key conversion errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum KeyError {
    #[error("VAPID key is not valid base64: {0}")]
    InvalidBase64(String),
}

/// Restore `=` padding and translate the URL-safe alphabet to the standard one.
///
/// Input that already carries padding is left alone.
pub fn normalize_url_base64(input: &str) -> String {
    let padding = (4 - input.len() % 4) % 4;
    let mut normalized = String::with_capacity(input.len() + padding);
    normalized.extend(input.chars().map(|c| match c {
        '-' => '+',
        '_' => '/',
        other => other,
    }));
    normalized.extend(std::iter::repeat('=').take(padding));
    normalized
}

/// Convert a URL-safe, unpadded base64 string into the key bytes.
pub fn url_base64_to_bytes(input: &str) -> Result<Vec<u8>, KeyError> {
    STANDARD_LENIENT
        .decode(normalize_url_base64(input))
        .map_err(|e| KeyError::InvalidBase64(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use base64::engine::general_purpose::{STANDARD, URL_SAFE_NO_PAD};

    #[test]
    fn test_aligned_input_matches_standard_decode() {
        let bytes = url_base64_to_bytes("FGDr").expect("decode");
        assert_eq!(bytes, STANDARD.decode("FGDr").expect("reference"));
        assert_eq!(bytes.len(), 3);
    }

    #[test]
    fn test_url_safe_chars_and_two_padding_chars() {
        // 6 chars -> needs "==" to reach a multiple of 4
        let input = "-_8-_w";
        assert_eq!(normalize_url_base64(input), "+/8+/w==");
        let bytes = url_base64_to_bytes(input).expect("decode");
        assert_eq!(bytes, STANDARD.decode("+/8+/w==").expect("reference"));
    }

    #[test]
    fn test_one_padding_char() {
        let input = "ab-_cdA";
        assert_eq!(normalize_url_base64(input), "ab+/cdA=");
        assert_eq!(
            url_base64_to_bytes(input).expect("decode"),
            STANDARD.decode("ab+/cdA=").expect("reference")
        );
    }

    #[test]
    fn test_vapid_sized_key_decodes_to_uncompressed_point() {
        let mut point = vec![0x04_u8];
        point.extend((0..64).map(|i| (i * 7 + 3) as u8));
        let encoded = URL_SAFE_NO_PAD.encode(&point);
        assert_eq!(encoded.len(), 87);

        let bytes = url_base64_to_bytes(&encoded).expect("decode");
        assert_eq!(bytes, point);
    }

    #[test]
    fn test_already_padded_input_is_untouched() {
        assert_eq!(normalize_url_base64("QQ=="), "QQ==");
        assert_eq!(url_base64_to_bytes("QQ==").expect("decode"), b"A".to_vec());
    }

    #[test]
    fn test_empty_input() {
        assert!(url_base64_to_bytes("").expect("decode").is_empty());
    }

    #[test]
    fn test_rejects_invalid_input() {
        assert!(url_base64_to_bytes("not base64!").is_err());
        // A single trailing sextet can never form a byte
        assert!(url_base64_to_bytes("abcde").is_err());
    }
}
