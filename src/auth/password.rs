//! Password hashing with Argon2id.

use argon2::{
    Algorithm, Argon2, Params, Version,
    password_hash::{PasswordHash, PasswordHasher as _, PasswordVerifier, SaltString, rand_core::OsRng},
};

use super::errors::{AuthError, AuthResult};

/// Password-hashing work factors
///
/// Defaults follow the argon2 crate's recommended parameters. Raising them
/// makes brute force proportionally more expensive; stored hashes embed the
/// parameters they were produced with, so verification keeps working across
/// configuration changes.
#[derive(Debug, Clone)]
pub struct HasherConfig {
    /// Memory cost in KiB
    pub memory_kib: u32,

    /// Number of passes over memory
    pub iterations: u32,

    /// Degree of parallelism
    pub parallelism: u32,
}

impl Default for HasherConfig {
    fn default() -> Self {
        Self {
            memory_kib: Params::DEFAULT_M_COST,
            iterations: Params::DEFAULT_T_COST,
            parallelism: Params::DEFAULT_P_COST,
        }
    }
}

/// Salted, one-way password hasher
#[derive(Clone)]
pub struct PasswordHasher {
    argon2: Argon2<'static>,
}

impl PasswordHasher {
    /// Create a hasher with the given work factors
    ///
    /// # Errors
    ///
    /// * `AuthError::HashingFailed` - Work factors outside Argon2's valid ranges
    pub fn new(config: &HasherConfig) -> AuthResult<Self> {
        let params = Params::new(config.memory_kib, config.iterations, config.parallelism, None)
            .map_err(|_| AuthError::HashingFailed)?;

        Ok(Self {
            argon2: Argon2::new(Algorithm::Argon2id, Version::V0x13, params),
        })
    }

    /// Hash a plaintext password with a fresh random salt
    ///
    /// Output is a PHC-format string embedding algorithm, parameters, and
    /// salt. Two hashes of the same password differ.
    pub fn hash(&self, plaintext: &str) -> AuthResult<String> {
        let salt = SaltString::generate(&mut OsRng);

        Ok(self
            .argon2
            .hash_password(plaintext.as_bytes(), &salt)
            .map_err(|_| AuthError::HashingFailed)?
            .to_string())
    }

    /// Verify a plaintext password against a stored hash
    ///
    /// Returns `false` on mismatch and on malformed hash input alike; a bad
    /// stored hash must never abort the caller's flow.
    pub fn verify(&self, plaintext: &str, hash: &str) -> bool {
        let Ok(parsed) = PasswordHash::new(hash) else {
            return false;
        };

        self.argon2
            .verify_password(plaintext.as_bytes(), &parsed)
            .is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hasher() -> PasswordHasher {
        PasswordHasher::new(&HasherConfig::default()).unwrap()
    }

    #[test]
    fn test_hash_verify_round_trip() {
        let hasher = hasher();
        let hash = hasher.hash("secret1").unwrap();

        assert!(hasher.verify("secret1", &hash));
        assert!(!hasher.verify("secret2", &hash));
    }

    #[test]
    fn test_hash_is_salted() {
        let hasher = hasher();
        let first = hasher.hash("secret1").unwrap();
        let second = hasher.hash("secret1").unwrap();

        assert_ne!(first, second, "Same password should hash differently");
        assert!(hasher.verify("secret1", &first));
        assert!(hasher.verify("secret1", &second));
    }

    #[test]
    fn test_verify_malformed_hash_returns_false() {
        let hasher = hasher();

        assert!(!hasher.verify("secret1", ""));
        assert!(!hasher.verify("secret1", "not-a-phc-string"));
        assert!(!hasher.verify("secret1", "$argon2id$v=19$garbage"));
    }

    #[test]
    fn test_hash_never_contains_plaintext() {
        let hasher = hasher();
        let hash = hasher.hash("hunter2-plaintext").unwrap();

        assert!(!hash.contains("hunter2-plaintext"));
        assert!(hash.starts_with("$argon2id$"));
    }

    #[test]
    fn test_invalid_work_factors_rejected() {
        let config = HasherConfig {
            memory_kib: 0,
            iterations: 0,
            parallelism: 0,
        };

        assert!(matches!(
            PasswordHasher::new(&config),
            Err(AuthError::HashingFailed)
        ));
    }
}
