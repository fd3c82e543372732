//! Argon2id credential hasher

use crate::config::Argon2Settings;
use crate::ports::{decode_salt, encode, CredentialError, CredentialHasher};

/// Digest length in bytes
const HASH_LEN: usize = 32;

/// Argon2id over `(password, salt)` with fixed parameters
#[derive(Debug, Clone)]
pub struct Argon2Hasher {
    params: argon2::Params,
}

impl Argon2Hasher {
    /// Fails when argon2 rejects the parameters
    pub fn new(settings: &Argon2Settings) -> Result<Self, CredentialError> {
        let params = argon2::Params::new(
            settings.memory_cost,
            settings.time_cost,
            settings.parallelism,
            Some(HASH_LEN),
        )
        .map_err(|e| CredentialError::Configuration(format!("argon2 params: {}", e)))?;

        Ok(Self { params })
    }

    fn argon2(&self) -> argon2::Argon2<'static> {
        argon2::Argon2::new(
            argon2::Algorithm::Argon2id,
            argon2::Version::V0x13,
            self.params.clone(),
        )
    }
}

impl CredentialHasher for Argon2Hasher {
    fn name(&self) -> &'static str {
        "argon2"
    }

    fn hash_password(&self, password: &str, salt: &str) -> Result<String, CredentialError> {
        let salt = decode_salt(salt)?;
        let mut digest = [0u8; HASH_LEN];
        self.argon2()
            .hash_password_into(password.as_bytes(), &salt, &mut digest)
            .map_err(|e| CredentialError::Hashing(e.to_string()))?;
        Ok(encode(&digest))
    }
}
