//! Password hashing and verification.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Algorithm, Argon2, Params, Version,
};

use crate::server::error::{internal::InternalError, AppError};

/// Argon2id password encoder.
///
/// Built once at startup and held in `AppState`, then handed to the services that create
/// or authenticate accounts. Verification reads the parameters embedded in the stored hash,
/// so changing the cost does not invalidate existing passwords.
#[derive(Debug, Clone, Copy)]
pub struct PasswordEncoder {
    memory_kib: u32,
    iterations: u32,
    parallelism: u32,
}

impl PasswordEncoder {
    pub fn new(memory_kib: u32, iterations: u32, parallelism: u32) -> Self {
        Self {
            memory_kib,
            iterations,
            parallelism,
        }
    }

    /// Minimal cost parameters for tests.
    #[cfg(test)]
    pub fn fast() -> Self {
        Self::new(Params::MIN_M_COST, 1, 1)
    }

    fn argon2(&self) -> Result<Argon2<'static>, AppError> {
        let params = Params::new(self.memory_kib, self.iterations, self.parallelism, None)
            .map_err(|e| InternalError::PasswordHash {
                reason: e.to_string(),
            })?;

        Ok(Argon2::new(Algorithm::Argon2id, Version::V0x13, params))
    }

    /// Hashes a plaintext password into a PHC string with a fresh random salt.
    pub fn hash(&self, password: &str) -> Result<String, AppError> {
        let salt = SaltString::generate(&mut OsRng);

        let hash = self
            .argon2()?
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| InternalError::PasswordHash {
                reason: e.to_string(),
            })?;

        Ok(hash.to_string())
    }

    /// Checks a plaintext password against a stored hash.
    ///
    /// A stored value that is not a valid PHC string never matches.
    pub fn verify(&self, password: &str, hash: &str) -> bool {
        let Ok(parsed) = PasswordHash::new(hash) else {
            tracing::warn!("Stored password hash could not be parsed");
            return false;
        };

        Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok()
    }
}

impl Default for PasswordEncoder {
    /// OWASP baseline for Argon2id: 19 MiB, 2 iterations, 1 lane.
    fn default() -> Self {
        Self::new(19456, 2, 1)
    }
}
