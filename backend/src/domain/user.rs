//! User identity record and its validated field types.
//!
//! Every field newtype normalises and validates its input at construction,
//! so a [`User`] that exists is a user that satisfies the record invariants:
//! trimmed non-empty username and full name, lowercased well-formed email,
//! and a role drawn from the closed set.

use std::fmt;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Maximum allowed length for a username.
pub const USERNAME_MAX: usize = 64;
/// Maximum allowed length for an email address.
pub const EMAIL_MAX: usize = 255;
/// Maximum allowed length for a full name.
pub const FULL_NAME_MAX: usize = 128;

/// Validation errors returned by the field constructors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserValidationError {
    EmptyUsername,
    UsernameTooLong { max: usize },
    EmptyEmail,
    InvalidEmail,
    EmailTooLong { max: usize },
    EmptyFullName,
    FullNameTooLong { max: usize },
    InvalidRole,
    EmptyDigest,
}

impl fmt::Display for UserValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyUsername => write!(f, "username must not be empty"),
            Self::UsernameTooLong { max } => {
                write!(f, "username must be at most {max} characters")
            }
            Self::EmptyEmail => write!(f, "email must not be empty"),
            Self::InvalidEmail => write!(f, "Valid email is required"),
            Self::EmailTooLong { max } => write!(f, "email must be at most {max} characters"),
            Self::EmptyFullName => write!(f, "full name must not be empty"),
            Self::FullNameTooLong { max } => {
                write!(f, "full name must be at most {max} characters")
            }
            Self::InvalidRole => write!(f, "Invalid role selected"),
            Self::EmptyDigest => write!(f, "password digest must not be empty"),
        }
    }
}

impl std::error::Error for UserValidationError {}

/// Stable user identifier. Assigned once at creation and never updated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserId(Uuid);

impl UserId {
    /// Generate a new random identifier for a record being created.
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Wrap an identifier loaded from storage.
    pub const fn from_uuid(id: Uuid) -> Self {
        Self(id)
    }

    /// Access the underlying UUID.
    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Globally unique login handle, trimmed of surrounding whitespace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Username(String);

impl Username {
    /// Validate and construct a [`Username`].
    pub fn new(username: impl AsRef<str>) -> Result<Self, UserValidationError> {
        let trimmed = username.as_ref().trim();
        if trimmed.is_empty() {
            return Err(UserValidationError::EmptyUsername);
        }
        if trimmed.chars().count() > USERNAME_MAX {
            return Err(UserValidationError::UsernameTooLong { max: USERNAME_MAX });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the username as a string slice.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

static EMAIL_RE: OnceLock<Regex> = OnceLock::new();

fn email_regex() -> &'static Regex {
    EMAIL_RE.get_or_init(|| {
        // Shape check only; deliverability is not this layer's concern.
        let pattern = r"^[^@\s]+@[^@\s]+\.[^@\s]+$";
        Regex::new(pattern).unwrap_or_else(|error| panic!("email regex failed to compile: {error}"))
    })
}

/// Globally unique email address, trimmed and lowercased at construction so
/// storage, login lookup, and availability checks all agree on case.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Validate and construct an [`EmailAddress`].
    pub fn new(email: impl AsRef<str>) -> Result<Self, UserValidationError> {
        let normalised = email.as_ref().trim().to_lowercase();
        if normalised.is_empty() {
            return Err(UserValidationError::EmptyEmail);
        }
        if normalised.chars().count() > EMAIL_MAX {
            return Err(UserValidationError::EmailTooLong { max: EMAIL_MAX });
        }
        if !email_regex().is_match(&normalised) {
            return Err(UserValidationError::InvalidEmail);
        }
        Ok(Self(normalised))
    }

    /// Borrow the address as a string slice.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Display name of the account holder, trimmed of surrounding whitespace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FullName(String);

impl FullName {
    /// Validate and construct a [`FullName`].
    pub fn new(full_name: impl AsRef<str>) -> Result<Self, UserValidationError> {
        let trimmed = full_name.as_ref().trim();
        if trimmed.is_empty() {
            return Err(UserValidationError::EmptyFullName);
        }
        if trimmed.chars().count() > FULL_NAME_MAX {
            return Err(UserValidationError::FullNameTooLong { max: FULL_NAME_MAX });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the name as a string slice.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for FullName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Closed set of account roles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// A learner account.
    Student,
    /// An instructor account.
    Teacher,
}

impl Role {
    /// Parse a role from its wire representation.
    pub fn parse(role: &str) -> Result<Self, UserValidationError> {
        match role.trim() {
            "student" => Ok(Self::Student),
            "teacher" => Ok(Self::Teacher),
            _ => Err(UserValidationError::InvalidRole),
        }
    }

    /// Wire representation of the role.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Student => "student",
            Self::Teacher => "teacher",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Opaque password digest in PHC string form.
///
/// Never serialised outward; [`PublicUser`] is the only view that crosses
/// the HTTP boundary and it does not carry this field.
#[derive(Clone, PartialEq, Eq)]
pub struct PasswordDigest(String);

impl PasswordDigest {
    /// Wrap digest material produced by the hashing adapter or loaded from
    /// storage.
    pub fn new(digest: impl Into<String>) -> Result<Self, UserValidationError> {
        let digest = digest.into();
        if digest.is_empty() {
            return Err(UserValidationError::EmptyDigest);
        }
        Ok(Self(digest))
    }

    /// Borrow the digest as a string slice.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Debug for PasswordDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PasswordDigest(..)")
    }
}

/// A persisted user record.
///
/// ## Invariants
/// - `username` and `email` are unique across all records; the store's
///   UNIQUE constraints enforce this, the service pre-check only improves
///   the error message.
/// - `id` is immutable once assigned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    id: UserId,
    username: Username,
    email: EmailAddress,
    password_digest: PasswordDigest,
    full_name: FullName,
    role: Role,
}

impl User {
    /// Assemble a user from already-validated parts.
    pub const fn new(
        id: UserId,
        username: Username,
        email: EmailAddress,
        password_digest: PasswordDigest,
        full_name: FullName,
        role: Role,
    ) -> Self {
        Self {
            id,
            username,
            email,
            password_digest,
            full_name,
            role,
        }
    }

    /// Rebuild a user from stored column values, re-validating each field.
    pub fn from_storage(
        id: Uuid,
        username: &str,
        email: &str,
        password_digest: &str,
        full_name: &str,
        role: &str,
    ) -> Result<Self, UserValidationError> {
        Ok(Self {
            id: UserId::from_uuid(id),
            username: Username::new(username)?,
            email: EmailAddress::new(email)?,
            password_digest: PasswordDigest::new(password_digest)?,
            full_name: FullName::new(full_name)?,
            role: Role::parse(role)?,
        })
    }

    /// Record identifier.
    pub const fn id(&self) -> &UserId {
        &self.id
    }

    /// Unique login handle.
    pub const fn username(&self) -> &Username {
        &self.username
    }

    /// Unique email address.
    pub const fn email(&self) -> &EmailAddress {
        &self.email
    }

    /// Stored credential material.
    pub const fn password_digest(&self) -> &PasswordDigest {
        &self.password_digest
    }

    /// Display name.
    pub const fn full_name(&self) -> &FullName {
        &self.full_name
    }

    /// Account role.
    pub const fn role(&self) -> Role {
        self.role
    }

    /// The subset of this record that is safe to return to callers.
    pub fn public_view(&self) -> PublicUser {
        PublicUser {
            id: *self.id.as_uuid(),
            username: self.username.as_str().to_owned(),
            email: self.email.as_str().to_owned(),
            role: self.role,
            full_name: self.full_name.as_str().to_owned(),
        }
    }
}

/// Caller-facing snapshot of a user record. Excludes the password digest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct PublicUser {
    /// Record identifier.
    pub id: Uuid,
    /// Unique login handle.
    pub username: String,
    /// Unique email address.
    pub email: String,
    /// Account role.
    pub role: Role,
    /// Display name.
    pub full_name: String,
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
    #[case("  alice  ", "alice")]
    #[case("bob_2", "bob_2")]
    fn username_is_trimmed(#[case] input: &str, #[case] expected: &str) {
        let username = Username::new(input).expect("valid username");
        assert_eq!(username.as_str(), expected);
    }

    #[rstest]
    #[case("")]
    #[case("   ")]
    fn username_rejects_blank(#[case] input: &str) {
        let err = Username::new(input).expect_err("blank username rejected");
        assert_eq!(err, UserValidationError::EmptyUsername);
    }

    #[rstest]
    fn email_is_trimmed_and_lowercased() {
        let email = EmailAddress::new("  Alice@Example.COM ").expect("valid email");
        assert_eq!(email.as_str(), "alice@example.com");
    }

    #[rstest]
    #[case("not-an-email")]
    #[case("missing@domain")]
    #[case("two words@example.com")]
    fn email_rejects_malformed_input(#[case] input: &str) {
        let err = EmailAddress::new(input).expect_err("malformed email rejected");
        assert_eq!(err, UserValidationError::InvalidEmail);
    }

    #[rstest]
    #[case("student", Role::Student)]
    #[case("teacher", Role::Teacher)]
    #[case(" teacher ", Role::Teacher)]
    fn role_parses_the_closed_set(#[case] input: &str, #[case] expected: Role) {
        assert_eq!(Role::parse(input), Ok(expected));
    }

    #[rstest]
    #[case("admin")]
    #[case("Student")]
    #[case("")]
    fn role_rejects_everything_else(#[case] input: &str) {
        assert_eq!(Role::parse(input), Err(UserValidationError::InvalidRole));
    }

    #[rstest]
    fn public_view_excludes_the_digest() {
        let user = User::from_storage(
            Uuid::new_v4(),
            "alice",
            "alice@x.com",
            "$argon2id$stub",
            "Alice A",
            "student",
        )
        .expect("valid record");

        let view = user.public_view();
        assert_eq!(view.username, "alice");
        assert_eq!(view.email, "alice@x.com");
        assert_eq!(view.role, Role::Student);
        assert_eq!(view.full_name, "Alice A");

        let json = serde_json::to_value(&view).expect("serialisable view");
        assert!(json.get("password_digest").is_none());
        assert_eq!(
            json.get("full_name").and_then(serde_json::Value::as_str),
            Some("Alice A")
        );
        assert_eq!(
            json.get("role").and_then(serde_json::Value::as_str),
            Some("student")
        );
    }

    #[rstest]
    fn digest_debug_output_is_redacted() {
        let digest = PasswordDigest::new("$argon2id$secret").expect("valid digest");
        assert_eq!(format!("{digest:?}"), "PasswordDigest(..)");
    }
}
