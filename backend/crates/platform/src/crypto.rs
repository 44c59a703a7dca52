//! Cryptographic Utilities

use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig, general_purpose};
use base64::{Engine, alphabet};
use rand::{RngCore, rngs::OsRng};

/// Standard alphabet; trailing `=` optional on decode
const STANDARD_ANY_PAD: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// Generate cryptographically secure random bytes
pub fn random_bytes(len: usize) -> Vec<u8> {
    let mut bytes = vec![0u8; len];
    OsRng.fill_bytes(&mut bytes);
    bytes
}

/// Encode bytes as standard (padded) base64
pub fn to_base64(bytes: &[u8]) -> String {
    general_purpose::STANDARD.encode(bytes)
}

/// Decode standard base64, with or without padding
pub fn from_base64(s: &str) -> Result<Vec<u8>, base64::DecodeError> {
    STANDARD_ANY_PAD.decode(s)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_random_bytes() {
        let bytes = random_bytes(32);
        assert_eq!(bytes.len(), 32);
        assert!(bytes.iter().any(|&b| b != 0));
        assert_ne!(random_bytes(32), bytes);
    }

    #[test]
    fn test_base64_known_value() {
        assert_eq!(to_base64(b"user@test.com:pw123"), "dXNlckB0ZXN0LmNvbTpwdzEyMw==");
        assert_eq!(
            from_base64("dXNlckB0ZXN0LmNvbTpwdzEyMw==").unwrap(),
            b"user@test.com:pw123"
        );
        assert!(from_base64("not base64!").is_err());
    }

    #[test]
    fn test_base64_padding_optional() {
        assert_eq!(
            from_base64("dXNlckB0ZXN0LmNvbTpwdzEyMw").unwrap(),
            b"user@test.com:pw123"
        );
        assert_eq!(from_base64("YQ").unwrap(), b"a");
        assert!(from_base64("Y").is_err());
    }
}
