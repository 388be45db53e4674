//! Argon2id adapter for the domain's password hashing port.
//!
//! Digests are PHC strings, so parameters and salt travel with the digest
//! and verification needs no extra state.

use argon2::Argon2;
use argon2::password_hash::{
    PasswordHash, PasswordHasher as _, PasswordVerifier as _, SaltString,
};
use rand::rngs::OsRng;

use crate::domain::PasswordDigest;
use crate::domain::ports::{PasswordHashError, PasswordHasher};

/// Argon2id implementation of the hashing port with default parameters.
#[derive(Debug, Clone, Default)]
pub struct Argon2PasswordHasher;

impl PasswordHasher for Argon2PasswordHasher {
    fn hash(&self, password: &str) -> Result<PasswordDigest, PasswordHashError> {
        let salt = SaltString::generate(&mut OsRng);
        let digest = Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map_err(|err| PasswordHashError::hash(err.to_string()))?
            .to_string();
        PasswordDigest::new(digest).map_err(|err| PasswordHashError::hash(err.to_string()))
    }

    fn verify(&self, password: &str, digest: &PasswordDigest) -> bool {
        let Ok(parsed) = PasswordHash::new(digest.as_str()) else {
            return false;
        };
        Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok()
    }
}

#[cfg(test)]
mod tests {
    #![expect(
        clippy::expect_used,
        reason = "test code uses expect for clear failure messages"
    )]

    use super::*;
    use rstest::rstest;

    #[rstest]
    fn hash_then_verify_round_trips() {
        let hasher = Argon2PasswordHasher;
        let digest = hasher.hash("correctpw").expect("hashing succeeds");

        assert!(digest.as_str().starts_with("$argon2id$"));
        assert!(hasher.verify("correctpw", &digest));
        assert!(!hasher.verify("wrongpw", &digest));
    }

    #[rstest]
    fn digests_are_salted_per_call() {
        let hasher = Argon2PasswordHasher;
        let first = hasher.hash("correctpw").expect("hashing succeeds");
        let second = hasher.hash("correctpw").expect("hashing succeeds");
        assert_ne!(first.as_str(), second.as_str());
    }

    #[rstest]
    fn verification_tolerates_garbage_digests() {
        let hasher = Argon2PasswordHasher;
        let digest = PasswordDigest::new("not-a-phc-string").expect("opaque digest");
        assert!(!hasher.verify("anything", &digest));
    }
}
