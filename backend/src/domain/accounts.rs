//! Account service: registration, authentication, availability checks.
//!
//! Each operation is a single stateless request/response transaction against
//! the user repository. The service never holds a connection across calls;
//! the repository's uniqueness constraints make the read-then-write sequence
//! of registration safe under concurrency.

use std::sync::Arc;

use serde::Serialize;
use tracing::{error, warn};
use utoipa::ToSchema;

use super::credentials::{LoginCredentials, Registration};
use super::error::Error;
use super::ports::{DuplicateField, PasswordHasher, UserPersistenceError, UserRepository};
use super::user::{PublicUser, User, UserId};

/// Caller-facing message for a duplicated email address.
const EMAIL_TAKEN: &str = "Email already registered";
/// Caller-facing message for a duplicated username.
const USERNAME_TAKEN: &str = "Username already taken";
/// Single message for both unknown-identifier and wrong-password failures,
/// so callers cannot distinguish which occurred.
const INVALID_CREDENTIALS: &str = "Invalid credentials";

/// Availability verdict for a username or email candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
pub struct Availability {
    /// Whether no existing record holds the candidate value.
    pub available: bool,
}

impl Availability {
    const fn taken() -> Self {
        Self { available: false }
    }

    const fn free() -> Self {
        Self { available: true }
    }
}

/// Use-cases over the user store and the hashing capability.
///
/// Handlers own validated inputs ([`Registration`], [`LoginCredentials`]);
/// this service owns uniqueness enforcement, credential verification, and
/// the public-view projection.
#[derive(Clone)]
pub struct AccountService {
    users: Arc<dyn UserRepository>,
    hasher: Arc<dyn PasswordHasher>,
}

impl AccountService {
    /// Create a service over the given repository and hasher.
    pub fn new(users: Arc<dyn UserRepository>, hasher: Arc<dyn PasswordHasher>) -> Self {
        Self { users, hasher }
    }

    /// Register a new user.
    ///
    /// The lookup before the insert exists only to report which field
    /// collided; the insert itself is the authoritative uniqueness check
    /// and maps a raced duplicate to the same conflict error.
    pub async fn register(&self, registration: &Registration) -> Result<PublicUser, Error> {
        let existing = self
            .users
            .find_by_username_or_email(
                registration.username().as_str(),
                registration.email().as_str(),
            )
            .await
            .map_err(map_persistence_error)?;

        if let Some(record) = existing {
            // Email takes priority when both fields collide.
            if record.email() == registration.email() {
                return Err(Error::conflict(EMAIL_TAKEN));
            }
            return Err(Error::conflict(USERNAME_TAKEN));
        }

        let digest = self.hasher.hash(registration.password()).map_err(|err| {
            error!(cause = %err, "password hashing failed during registration");
            Error::internal("password hashing failed")
        })?;

        let user = User::new(
            UserId::random(),
            registration.username().clone(),
            registration.email().clone(),
            digest,
            registration.full_name().clone(),
            registration.role(),
        );

        self.users
            .insert(&user)
            .await
            .map_err(map_persistence_error)?;

        Ok(user.public_view())
    }

    /// Authenticate by username-or-email plus password.
    pub async fn authenticate(
        &self,
        credentials: &LoginCredentials,
    ) -> Result<PublicUser, Error> {
        let identifier = credentials.identifier();
        let record = self
            .users
            .find_by_username_or_email(identifier, &identifier.to_lowercase())
            .await
            .map_err(map_persistence_error)?;

        match record {
            Some(user) if self.hasher.verify(credentials.password(), user.password_digest()) => {
                Ok(user.public_view())
            }
            Some(_) => Err(Error::unauthorized(INVALID_CREDENTIALS)),
            None => {
                // Hash the presented password anyway so the no-such-user
                // path costs roughly the same as a failed verification.
                let _ = self.hasher.hash(credentials.password());
                Err(Error::unauthorized(INVALID_CREDENTIALS))
            }
        }
    }

    /// Check whether a username or email candidate is still free.
    ///
    /// Never fails: unknown fields, blank values, and repository errors all
    /// degrade to "not available" so the caller sees the same shape as a
    /// real negative.
    pub async fn check_availability(&self, field: &str, value: &str) -> Availability {
        let value = value.trim();
        if value.is_empty() {
            return Availability::taken();
        }

        let exists = match field {
            "username" => self.users.username_exists(value).await,
            "email" => self.users.email_exists(&value.to_lowercase()).await,
            _ => return Availability::taken(),
        };

        match exists {
            Ok(true) => Availability::taken(),
            Ok(false) => Availability::free(),
            Err(err) => {
                warn!(cause = %err, field, "availability check degraded to unavailable");
                Availability::taken()
            }
        }
    }
}

/// Map repository failures to domain errors; duplicate keys become the same
/// field-specific conflicts the pre-check produces, everything else is an
/// internal error with the cause preserved for server-side logging.
fn map_persistence_error(error: UserPersistenceError) -> Error {
    match error {
        UserPersistenceError::DuplicateKey {
            field: DuplicateField::Email,
        } => Error::conflict(EMAIL_TAKEN),
        UserPersistenceError::DuplicateKey {
            field: DuplicateField::Username,
        } => Error::conflict(USERNAME_TAKEN),
        UserPersistenceError::Connection { message } | UserPersistenceError::Query { message } => {
            Error::internal(message)
        }
    }
}
