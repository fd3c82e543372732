//! Credential hasher port - salted one-way password digests

use base64::Engine;
use rand::RngCore;
use thiserror::Error;

/// Salt length in bytes before base64 encoding
pub const SALT_LEN: usize = 16;

#[derive(Error, Debug)]
pub enum CredentialError {
    #[error("invalid salt encoding: {0}")]
    InvalidSalt(String),

    #[error("hashing failed: {0}")]
    Hashing(String),

    /// The digest primitive cannot be set up; startup must abort
    #[error("hasher configuration rejected: {0}")]
    Configuration(String),
}

/// Salted password hashing.
///
/// Salts and digests are base64 text so they fit in a comma-separated line.
pub trait CredentialHasher: Send + Sync {
    /// Short algorithm name, used in logs
    fn name(&self) -> &'static str;

    /// Fresh random salt, base64 encoded
    fn generate_salt(&self) -> String {
        let mut salt = [0u8; SALT_LEN];
        rand::thread_rng().fill_bytes(&mut salt);
        encode(&salt)
    }

    /// Deterministic digest of `(password, salt)`, base64 encoded
    fn hash_password(&self, password: &str, salt: &str) -> Result<String, CredentialError>;

    /// Recompute and compare in constant time. Undecodable input never verifies.
    fn verify_password(&self, password: &str, salt: &str, expected_digest: &str) -> bool {
        match self.hash_password(password, salt) {
            Ok(actual) => digests_match(&actual, expected_digest),
            Err(_) => false,
        }
    }
}

pub(crate) fn encode(bytes: &[u8]) -> String {
    base64::engine::general_purpose::STANDARD.encode(bytes)
}

pub(crate) fn decode_salt(salt: &str) -> Result<Vec<u8>, CredentialError> {
    base64::engine::general_purpose::STANDARD
        .decode(salt)
        .map_err(|e| CredentialError::InvalidSalt(e.to_string()))
}

/// Compare two base64 digests over their decoded bytes
pub fn digests_match(actual: &str, expected: &str) -> bool {
    let engine = base64::engine::general_purpose::STANDARD;
    match (engine.decode(actual), engine.decode(expected)) {
        (Ok(a), Ok(b)) => constant_time_eq(&a, &b),
        _ => false,
    }
}

/// Runtime depends only on the input lengths, not on where they differ
fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constant_time_eq() {
        assert!(constant_time_eq(b"abc", b"abc"));
        assert!(!constant_time_eq(b"abc", b"abd"));
        assert!(!constant_time_eq(b"abc", b"abcd"));
        assert!(constant_time_eq(b"", b""));
    }

    #[test]
    fn test_digests_match_decodes() {
        assert!(digests_match("AAEC", "AAEC"));
        assert!(!digests_match("AAEC", "AAED"));
        assert!(!digests_match("AAEC", "not base64!"));
    }
}
