//! SHA-256 credential hasher
//!
//! digest = base64(SHA-256(salt_bytes || password_bytes)), the layout used
//! by existing `users.txt` files.

use sha2::{Digest, Sha256};

use crate::ports::{decode_salt, encode, CredentialError, CredentialHasher};

#[derive(Debug, Clone, Copy, Default)]
pub struct Sha256Hasher;

impl Sha256Hasher {
    pub fn new() -> Self {
        Self
    }
}

impl CredentialHasher for Sha256Hasher {
    fn name(&self) -> &'static str {
        "sha256"
    }

    fn hash_password(&self, password: &str, salt: &str) -> Result<String, CredentialError> {
        let salt = decode_salt(salt)?;
        let mut hasher = Sha256::new();
        hasher.update(&salt);
        hasher.update(password.as_bytes());
        Ok(encode(&hasher.finalize()))
    }
}
