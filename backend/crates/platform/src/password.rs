//! Password and Secret Hashing
//!
//! One-way hashing for anything stored at rest that must later be checked
//! against a presented value: account passwords and refresh tokens.
//!
//! - Argon2id, PHC string output (parameters and salt travel with the hash)
//! - Work factor taken from configuration, never hard-coded by callers
//! - Clear text passwords are NFKC-normalized and zeroized on drop
//!
//! ## Work factor
//! The work factor is the base-2 logarithm of the Argon2 memory cost in KiB:
//! every increment doubles the memory (and time) needed per hash. Because
//! parameters are embedded in the PHC string, hashes created under an older
//! factor still verify after the configuration changes.

use std::fmt;

use argon2::{
    Algorithm, Argon2, Params, PasswordHash, PasswordHasher as _, PasswordVerifier as _, Version,
    password_hash::SaltString,
};
use rand::rngs::OsRng;
use thiserror::Error;
use unicode_normalization::UnicodeNormalization;
use zeroize::{Zeroize, ZeroizeOnDrop};

// ============================================================================
// Constants
// ============================================================================

/// Minimum password length (NIST: SHALL be at least 8)
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Maximum password length
pub const MAX_PASSWORD_LENGTH: usize = 128;

/// Smallest accepted work factor (Argon2 needs at least 8 KiB)
pub const MIN_WORK_FACTOR: u32 = 3;

/// Largest accepted work factor (4 GiB)
pub const MAX_WORK_FACTOR: u32 = 22;

/// Default work factor (16 MiB)
pub const DEFAULT_WORK_FACTOR: u32 = 14;

/// Argon2 passes per hash
const TIME_COST: u32 = 2;

// ============================================================================
// Error Types
// ============================================================================

/// Password policy violations (registration only)
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PasswordPolicyError {
    #[error("Password must be at least {min} characters (got {actual})")]
    TooShort { min: usize, actual: usize },

    #[error("Password must be at most {max} characters (got {actual})")]
    TooLong { max: usize, actual: usize },

    #[error("Password cannot be empty or contain only whitespace")]
    EmptyOrWhitespace,

    #[error("Password contains invalid control characters")]
    InvalidCharacter,

    #[error("Password is too common or follows a predictable pattern")]
    CommonPattern,
}

/// Hashing failures
#[derive(Debug, Error)]
pub enum PasswordHashError {
    #[error("Work factor must be between {min} and {max} (got {actual})")]
    InvalidWorkFactor { min: u32, max: u32, actual: u32 },

    #[error("Password hashing failed: {0}")]
    HashingFailed(String),

    #[error("Invalid password hash format")]
    InvalidHashFormat,
}

// ============================================================================
// Clear Text Password (Zeroized on drop)
// ============================================================================

/// Clear text password, erased from memory when dropped
///
/// Not `Clone`; `Debug` output is redacted.
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct ClearTextPassword(String);

impl ClearTextPassword {
    /// Validate a password chosen at registration
    ///
    /// Rules:
    /// - 8 to 128 code points after NFKC normalization
    /// - not empty or whitespace only
    /// - no control characters other than space, tab and newline
    /// - not a well-known weak password or keyboard/number run
    pub fn new(raw: String) -> Result<Self, PasswordPolicyError> {
        let password = Self::from_input(raw);
        let normalized = password.0.as_str();

        if normalized.trim().is_empty() {
            return Err(PasswordPolicyError::EmptyOrWhitespace);
        }

        let char_count = normalized.chars().count();
        if char_count < MIN_PASSWORD_LENGTH {
            return Err(PasswordPolicyError::TooShort {
                min: MIN_PASSWORD_LENGTH,
                actual: char_count,
            });
        }
        if char_count > MAX_PASSWORD_LENGTH {
            return Err(PasswordPolicyError::TooLong {
                max: MAX_PASSWORD_LENGTH,
                actual: char_count,
            });
        }

        if normalized
            .chars()
            .any(|ch| ch.is_control() && !matches!(ch, ' ' | '\t' | '\n'))
        {
            return Err(PasswordPolicyError::InvalidCharacter);
        }

        if is_common_pattern(normalized) {
            return Err(PasswordPolicyError::CommonPattern);
        }

        Ok(password)
    }

    /// Wrap a presented password without applying the registration policy
    ///
    /// Used at login: the stored hash decides whether it is correct, and an
    /// account created under an older policy must still be able to sign in.
    /// Normalization is identical to [`ClearTextPassword::new`].
    pub fn from_input(raw: String) -> Self {
        let normalized: String = raw.nfkc().collect();
        let mut raw = raw;
        raw.zeroize();
        Self(normalized)
    }

    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }

    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl fmt::Debug for ClearTextPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ClearTextPassword")
            .field(&"[REDACTED]")
            .finish()
    }
}

// ============================================================================
// Hasher
// ============================================================================

/// Argon2id hasher bound to a configured work factor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PasswordHasher {
    work_factor: u32,
}

impl PasswordHasher {
    pub fn new(work_factor: u32) -> Result<Self, PasswordHashError> {
        if !(MIN_WORK_FACTOR..=MAX_WORK_FACTOR).contains(&work_factor) {
            return Err(PasswordHashError::InvalidWorkFactor {
                min: MIN_WORK_FACTOR,
                max: MAX_WORK_FACTOR,
                actual: work_factor,
            });
        }
        Ok(Self { work_factor })
    }

    pub fn work_factor(&self) -> u32 {
        self.work_factor
    }

    /// Memory cost in KiB: `2^work_factor`
    pub fn memory_cost_kib(&self) -> u32 {
        1 << self.work_factor
    }

    /// Hash a secret with a fresh random salt
    pub fn hash(&self, secret: &[u8]) -> Result<HashedPassword, PasswordHashError> {
        let params = Params::new(self.memory_cost_kib(), TIME_COST, 1, None)
            .map_err(|e| PasswordHashError::HashingFailed(e.to_string()))?;
        let argon2 = Argon2::new(Algorithm::Argon2id, Version::V0x13, params);

        let salt = SaltString::generate(OsRng);

        let hash = argon2
            .hash_password(secret, &salt)
            .map_err(|e| PasswordHashError::HashingFailed(e.to_string()))?;

        Ok(HashedPassword {
            hash: hash.to_string(),
        })
    }
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self {
            work_factor: DEFAULT_WORK_FACTOR,
        }
    }
}

// ============================================================================
// Hashed Password (Safe to store)
// ============================================================================

/// Argon2id hash in PHC string format
#[derive(Clone, PartialEq, Eq)]
pub struct HashedPassword {
    hash: String,
}

impl HashedPassword {
    /// Load a PHC string read from storage
    pub fn from_phc_string(s: impl Into<String>) -> Result<Self, PasswordHashError> {
        let hash = s.into();
        PasswordHash::new(&hash).map_err(|_| PasswordHashError::InvalidHashFormat)?;
        Ok(Self { hash })
    }

    pub fn as_phc_string(&self) -> &str {
        &self.hash
    }

    /// Check a presented secret against this hash
    ///
    /// Returns `false` on mismatch and on an unparsable hash; never errors.
    /// Parameters are read from the PHC string, not from the current config.
    pub fn verify(&self, secret: &[u8]) -> bool {
        let Ok(parsed_hash) = PasswordHash::new(&self.hash) else {
            return false;
        };

        Argon2::default().verify_password(secret, &parsed_hash).is_ok()
    }
}

impl fmt::Debug for HashedPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HashedPassword")
            .field("hash", &"[HASH]")
            .finish()
    }
}

// ============================================================================
// Helper Functions
// ============================================================================

const COMMON_PASSWORDS: &[&str] = &[
    "password",
    "password1",
    "password123",
    "iloveyou",
    "letmein1",
    "welcome1",
    "admin123",
    "sunshine",
    "princess",
    "football",
    "baseball",
    "trustno1",
];

const KEYBOARD_RUNS: &[&str] = &["qwerty", "asdfgh", "zxcvbn", "qazwsx", "1qaz2wsx"];

fn is_common_pattern(password: &str) -> bool {
    let lower = password.to_lowercase();

    let mut chars = lower.chars();
    if let Some(first) = chars.next() {
        if chars.all(|c| c == first) {
            return true;
        }
    }

    if is_sequential_numbers(&lower) {
        return true;
    }

    KEYBOARD_RUNS.iter().any(|run| lower.contains(run)) || COMMON_PASSWORDS.contains(&lower.as_str())
}

/// All-digit ascending or descending run, e.g. "12345678" or "98765432"
fn is_sequential_numbers(s: &str) -> bool {
    let Some(digits) = s
        .chars()
        .map(|c| c.to_digit(10))
        .collect::<Option<Vec<u32>>>()
    else {
        return false;
    };

    if digits.len() < 4 {
        return false;
    }

    let ascending = digits.windows(2).all(|w| w[1] == (w[0] + 1) % 10);
    let descending = digits.windows(2).all(|w| w[0] == (w[1] + 1) % 10);
    ascending || descending
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    // Smallest factor keeps the test suite fast.
    fn hasher() -> PasswordHasher {
        PasswordHasher::new(MIN_WORK_FACTOR).unwrap()
    }

    #[test]
    fn test_password_policy() {
        assert!(matches!(
            ClearTextPassword::new("short".to_string()),
            Err(PasswordPolicyError::TooShort { .. })
        ));
        assert!(matches!(
            ClearTextPassword::new("a1".repeat(65)),
            Err(PasswordPolicyError::TooLong { .. })
        ));
        assert!(matches!(
            ClearTextPassword::new("        ".to_string()),
            Err(PasswordPolicyError::EmptyOrWhitespace)
        ));
        assert!(matches!(
            ClearTextPassword::new("abc\u{0007}defgh".to_string()),
            Err(PasswordPolicyError::InvalidCharacter)
        ));
        assert!(ClearTextPassword::new("MySecure#Pass2024!".to_string()).is_ok());
        assert!(ClearTextPassword::new("パスワード安全です!".to_string()).is_ok());
    }

    #[test]
    fn test_common_patterns() {
        for weak in ["password123", "qwertyuiop", "12345678", "98765432", "zzzzzzzz"] {
            assert!(
                matches!(
                    ClearTextPassword::new(weak.to_string()),
                    Err(PasswordPolicyError::CommonPattern)
                ),
                "{weak} should be rejected"
            );
        }
    }

    #[test]
    fn test_from_input_skips_policy() {
        let password = ClearTextPassword::from_input("pw123".to_string());
        assert_eq!(password.as_bytes(), b"pw123");
        assert!(!password.is_blank());
        assert!(ClearTextPassword::from_input("   ".to_string()).is_blank());
    }

    #[test]
    fn test_hash_and_verify() {
        let hashed = hasher().hash(b"TestPassword123!").unwrap();

        assert!(hashed.verify(b"TestPassword123!"));
        assert!(!hashed.verify(b"WrongPassword123!"));
    }

    #[test]
    fn test_hash_is_salted() {
        let a = hasher().hash(b"same secret").unwrap();
        let b = hasher().hash(b"same secret").unwrap();
        assert_ne!(a.as_phc_string(), b.as_phc_string());
        assert!(a.verify(b"same secret") && b.verify(b"same secret"));
    }

    #[test]
    fn test_work_factor_is_encoded_in_hash() {
        let low = PasswordHasher::new(4).unwrap().hash(b"secret").unwrap();
        let high = PasswordHasher::new(5).unwrap().hash(b"secret").unwrap();

        assert!(low.as_phc_string().contains("m=16,"));
        assert!(high.as_phc_string().contains("m=32,"));
        assert!(low.verify(b"secret") && high.verify(b"secret"));
    }

    #[test]
    fn test_invalid_work_factor() {
        assert!(matches!(
            PasswordHasher::new(2),
            Err(PasswordHashError::InvalidWorkFactor { actual: 2, .. })
        ));
        assert!(PasswordHasher::new(MAX_WORK_FACTOR + 1).is_err());
        assert_eq!(PasswordHasher::default().work_factor(), DEFAULT_WORK_FACTOR);
    }

    #[test]
    fn test_phc_string_roundtrip() {
        let hashed = hasher().hash(b"TestPassword123!").unwrap();
        let restored = HashedPassword::from_phc_string(hashed.as_phc_string()).unwrap();
        assert!(restored.verify(b"TestPassword123!"));
    }

    #[test]
    fn test_invalid_phc_string() {
        assert!(HashedPassword::from_phc_string("not_a_valid_hash").is_err());
    }

    #[test]
    fn test_debug_redaction() {
        let password = ClearTextPassword::from_input("secret".to_string());
        let debug_output = format!("{:?}", password);
        assert!(debug_output.contains("REDACTED"));
        assert!(!debug_output.contains("secret"));
    }
}
