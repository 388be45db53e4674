//! Domain ports implemented by driven adapters.
//!
//! Ports describe how the domain expects to interact with the persistence
//! engine and the password-hashing capability. Each trait exposes strongly
//! typed errors so adapters map their failures into predictable variants.

use async_trait::async_trait;
use thiserror::Error;

use super::user::{PasswordDigest, User};

/// Which unique column a duplicate-key violation landed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DuplicateField {
    /// The `username` uniqueness constraint fired.
    Username,
    /// The `email` uniqueness constraint fired.
    Email,
}

/// Persistence errors raised by [`UserRepository`] adapters.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UserPersistenceError {
    /// Repository connection could not be established.
    #[error("user repository connection failed: {message}")]
    Connection { message: String },
    /// Query or mutation failed during execution.
    #[error("user repository query failed: {message}")]
    Query { message: String },
    /// An insert violated a uniqueness constraint. This is the
    /// authoritative duplicate signal: it fires even when two registrations
    /// race past the service's pre-check.
    #[error("user record already exists for {field:?}")]
    DuplicateKey { field: DuplicateField },
}

impl UserPersistenceError {
    /// Helper for connection oriented failures.
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    /// Helper for query failures.
    pub fn query(message: impl Into<String>) -> Self {
        Self::Query {
            message: message.into(),
        }
    }

    /// Helper for uniqueness violations.
    pub const fn duplicate_key(field: DuplicateField) -> Self {
        Self::DuplicateKey { field }
    }
}

/// Persistence port for user records.
///
/// Implementations must enforce uniqueness of `username` and `email` at
/// write time and report violations as
/// [`UserPersistenceError::DuplicateKey`].
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Persist a new user record.
    async fn insert(&self, user: &User) -> Result<(), UserPersistenceError>;

    /// Find the record whose username equals `username` or whose email
    /// equals `email`. Both columns are unique, so at most one record can
    /// match each; when both match different records the username match is
    /// returned.
    async fn find_by_username_or_email(
        &self,
        username: &str,
        email: &str,
    ) -> Result<Option<User>, UserPersistenceError>;

    /// Whether any record holds this username.
    async fn username_exists(&self, username: &str) -> Result<bool, UserPersistenceError>;

    /// Whether any record holds this email address.
    async fn email_exists(&self, email: &str) -> Result<bool, UserPersistenceError>;
}

/// Failures raised by the hashing adapter.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PasswordHashError {
    /// The hashing primitive rejected the input or its parameters.
    #[error("password hashing failed: {message}")]
    Hash { message: String },
}

impl PasswordHashError {
    /// Helper for hashing failures.
    pub fn hash(message: impl Into<String>) -> Self {
        Self::Hash {
            message: message.into(),
        }
    }
}

/// One-way password hashing capability.
///
/// Treated as trusted by the domain: `hash` produces an opaque digest and
/// `verify` checks a raw password against one. Verification failure is not
/// an error, it is a `false`.
pub trait PasswordHasher: Send + Sync {
    /// Derive a digest from a raw password.
    fn hash(&self, password: &str) -> Result<PasswordDigest, PasswordHashError>;

    /// Check a raw password against a stored digest.
    fn verify(&self, password: &str, digest: &PasswordDigest) -> bool;
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn persistence_error_helpers_carry_their_messages() {
        let connection = UserPersistenceError::connection("refused");
        let query = UserPersistenceError::query("syntax");
        assert!(connection.to_string().contains("refused"));
        assert!(query.to_string().contains("syntax"));
    }

    #[rstest]
    #[case(DuplicateField::Username)]
    #[case(DuplicateField::Email)]
    fn duplicate_key_preserves_the_field(#[case] field: DuplicateField) {
        let err = UserPersistenceError::duplicate_key(field);
        assert_eq!(err, UserPersistenceError::DuplicateKey { field });
    }
}
