//! Password hashing and verification.

use crate::{AuthError, Result as AuthErrorResult};

use argon2::{Algorithm, Argon2, Params, PasswordHasher, PasswordVerifier, Version};
use password_hash::{PasswordHash, SaltString};

/// One-way credential hasher (Argon2id, PHC string output).
///
/// Every call salts with fresh OS entropy, so hashing the same password twice
/// yields different strings. Verification reads the cost parameters back out
/// of the PHC string, so hashes produced under an older cost setting keep
/// verifying after the configuration changes.
///
/// Hashing is deliberately slow; callers on an async runtime should dispatch
/// through `spawn_blocking` (the identity service does).
#[derive(Debug, Clone)]
pub struct CredentialHasher {
    params: Params,
}

impl CredentialHasher {
    /// Build a hasher with explicit Argon2 costs.
    ///
    /// `m_cost_kib` is memory in KiB, `t_cost` the iteration count, `p_cost`
    /// the lane count.
    #[track_caller]
    pub fn new(m_cost_kib: u32, t_cost: u32, p_cost: u32) -> AuthErrorResult<Self> {
        let params = Params::new(m_cost_kib, t_cost, p_cost, None)
            .map_err(|e| AuthError::hash(e.to_string()))?;
        Ok(Self { params })
    }

    fn argon2(&self) -> Argon2<'static> {
        Argon2::new(Algorithm::Argon2id, Version::V0x13, self.params.clone())
    }

    /// Hash a plaintext password into a salted PHC string.
    #[track_caller]
    pub fn hash(&self, plaintext: &str) -> AuthErrorResult<String> {
        let mut salt_bytes = [0u8; 16];
        getrandom::getrandom(&mut salt_bytes).map_err(|e| AuthError::hash(e.to_string()))?;
        let salt =
            SaltString::encode_b64(&salt_bytes).map_err(|e| AuthError::hash(e.to_string()))?;

        let phc = self
            .argon2()
            .hash_password(plaintext.as_bytes(), &salt)
            .map_err(|e| AuthError::hash(e.to_string()))?
            .to_string();
        Ok(phc)
    }

    /// Verify a plaintext password against a stored PHC string.
    ///
    /// Malformed hashes verify as false rather than erroring; the digest
    /// comparison itself is constant-time inside the argon2 crate.
    pub fn verify(&self, plaintext: &str, phc: &str) -> bool {
        match PasswordHash::new(phc) {
            Ok(parsed) => self
                .argon2()
                .verify_password(plaintext.as_bytes(), &parsed)
                .is_ok(),
            Err(_) => false,
        }
    }
}

impl Default for CredentialHasher {
    fn default() -> Self {
        Self {
            params: Params::default(),
        }
    }
}
