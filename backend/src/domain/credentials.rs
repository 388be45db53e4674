//! Validated operation inputs for registration and login.
//!
//! Keep inbound payload parsing outside the domain by exposing constructors
//! that validate string inputs before a handler talks to the account
//! service. Raw passwords are held in [`Zeroizing`] buffers so they are
//! wiped when the request finishes.

use std::fmt;

use zeroize::Zeroizing;

use super::user::{EmailAddress, FullName, Role, UserValidationError, Username};

/// Minimum allowed raw password length, in characters.
pub const PASSWORD_MIN: usize = 6;

/// Domain error returned when login payload values are invalid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CredentialsValidationError {
    /// Identifier was missing or blank once trimmed.
    EmptyIdentifier,
    /// Password was blank.
    EmptyPassword,
}

impl fmt::Display for CredentialsValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyIdentifier => write!(f, "identifier must not be empty"),
            Self::EmptyPassword => write!(f, "password must not be empty"),
        }
    }
}

impl std::error::Error for CredentialsValidationError {}

/// Validated login credentials.
///
/// ## Invariants
/// - `identifier` is trimmed and non-empty; it may be either a username or
///   an email address, resolved at lookup time.
/// - `password` is non-empty but retains caller-provided whitespace to
///   avoid surprising credential comparisons.
#[derive(Debug, Clone)]
pub struct LoginCredentials {
    identifier: String,
    password: Zeroizing<String>,
}

impl LoginCredentials {
    /// Construct credentials from raw identifier/password inputs.
    pub fn try_from_parts(
        identifier: &str,
        password: &str,
    ) -> Result<Self, CredentialsValidationError> {
        let normalised = identifier.trim();
        if normalised.is_empty() {
            return Err(CredentialsValidationError::EmptyIdentifier);
        }
        if password.is_empty() {
            return Err(CredentialsValidationError::EmptyPassword);
        }
        Ok(Self {
            identifier: normalised.to_owned(),
            password: Zeroizing::new(password.to_owned()),
        })
    }

    /// Identifier string matched against both username and email.
    pub fn identifier(&self) -> &str {
        self.identifier.as_str()
    }

    /// Password string provided by the caller.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

/// Validation failures for a registration payload, in the order the checks
/// run. Each variant's display string is the caller-facing message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistrationValidationError {
    /// One or more of the five fields is empty after trimming.
    MissingFields,
    /// Role is outside the closed set.
    InvalidRole,
    /// Raw password is shorter than [`PASSWORD_MIN`] characters.
    PasswordTooShort,
    /// Email does not have a plausible `local@domain` shape.
    InvalidEmail,
    /// A field exceeded its storage bound.
    Field(UserValidationError),
}

impl fmt::Display for RegistrationValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingFields => write!(f, "All fields are required"),
            Self::InvalidRole => write!(f, "Invalid role selected"),
            Self::PasswordTooShort => {
                write!(f, "Password must be at least {PASSWORD_MIN} characters long")
            }
            Self::InvalidEmail => write!(f, "Valid email is required"),
            Self::Field(err) => err.fmt(f),
        }
    }
}

impl std::error::Error for RegistrationValidationError {}

/// Validated registration input: all fields trimmed, role parsed, password
/// length checked. Construction order short-circuits on the first failure:
/// required fields, then role, then password length, then email shape.
#[derive(Debug, Clone)]
pub struct Registration {
    username: Username,
    email: EmailAddress,
    password: Zeroizing<String>,
    full_name: FullName,
    role: Role,
}

impl Registration {
    /// Validate and construct a registration from raw string inputs.
    pub fn try_from_parts(
        username: &str,
        email: &str,
        password: &str,
        full_name: &str,
        role: &str,
    ) -> Result<Self, RegistrationValidationError> {
        let all_present = !username.trim().is_empty()
            && !email.trim().is_empty()
            && !password.is_empty()
            && !full_name.trim().is_empty()
            && !role.trim().is_empty();
        if !all_present {
            return Err(RegistrationValidationError::MissingFields);
        }

        let role = Role::parse(role).map_err(|_| RegistrationValidationError::InvalidRole)?;

        if password.chars().count() < PASSWORD_MIN {
            return Err(RegistrationValidationError::PasswordTooShort);
        }

        let email = EmailAddress::new(email).map_err(|err| match err {
            UserValidationError::InvalidEmail => RegistrationValidationError::InvalidEmail,
            other => RegistrationValidationError::Field(other),
        })?;
        let username = Username::new(username).map_err(RegistrationValidationError::Field)?;
        let full_name = FullName::new(full_name).map_err(RegistrationValidationError::Field)?;

        Ok(Self {
            username,
            email,
            password: Zeroizing::new(password.to_owned()),
            full_name,
            role,
        })
    }

    /// Requested login handle.
    pub const fn username(&self) -> &Username {
        &self.username
    }

    /// Requested email address, already normalised.
    pub const fn email(&self) -> &EmailAddress {
        &self.email
    }

    /// Raw password awaiting hashing.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }

    /// Display name.
    pub const fn full_name(&self) -> &FullName {
        &self.full_name
    }

    /// Requested role.
    pub const fn role(&self) -> Role {
        self.role
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

    fn valid_parts() -> (&'static str, &'static str, &'static str, &'static str, &'static str) {
        ("alice", "alice@x.com", "correctpw", "Alice A", "student")
    }

    #[rstest]
    fn registration_accepts_valid_input() {
        let (username, email, password, full_name, role) = valid_parts();
        let registration =
            Registration::try_from_parts(username, email, password, full_name, role)
                .expect("valid registration");
        assert_eq!(registration.username().as_str(), "alice");
        assert_eq!(registration.email().as_str(), "alice@x.com");
        assert_eq!(registration.password(), "correctpw");
        assert_eq!(registration.role(), Role::Student);
    }

    #[rstest]
    #[case("", "a@x.com", "secret1", "A", "student")]
    #[case("alice", "   ", "secret1", "A", "student")]
    #[case("alice", "a@x.com", "", "A", "student")]
    #[case("alice", "a@x.com", "secret1", "  ", "student")]
    #[case("alice", "a@x.com", "secret1", "A", "")]
    fn registration_requires_every_field(
        #[case] username: &str,
        #[case] email: &str,
        #[case] password: &str,
        #[case] full_name: &str,
        #[case] role: &str,
    ) {
        let err = Registration::try_from_parts(username, email, password, full_name, role)
            .expect_err("missing field rejected");
        assert_eq!(err, RegistrationValidationError::MissingFields);
    }

    #[rstest]
    fn registration_rejects_unknown_roles() {
        let err = Registration::try_from_parts("a", "a@x.com", "secret1", "A", "admin")
            .expect_err("unknown role rejected");
        assert_eq!(err, RegistrationValidationError::InvalidRole);
        assert_eq!(err.to_string(), "Invalid role selected");
    }

    #[rstest]
    fn registration_enforces_the_password_boundary() {
        let err = Registration::try_from_parts("a", "a@x.com", "five5", "A", "student")
            .expect_err("five characters rejected");
        assert_eq!(err, RegistrationValidationError::PasswordTooShort);

        let ok = Registration::try_from_parts("a", "a@x.com", "sixsix", "A", "student");
        assert!(ok.is_ok(), "six characters accepted");
    }

    #[rstest]
    fn registration_role_check_precedes_password_length() {
        // Both checks would fail; the role message must win per the
        // documented ordering.
        let err = Registration::try_from_parts("a", "a@x.com", "pw", "A", "admin")
            .expect_err("invalid role and short password");
        assert_eq!(err, RegistrationValidationError::InvalidRole);
    }

    #[rstest]
    fn registration_rejects_malformed_email_last() {
        let err = Registration::try_from_parts("a", "not-an-email", "secret1", "A", "student")
            .expect_err("malformed email rejected");
        assert_eq!(err, RegistrationValidationError::InvalidEmail);
        assert_eq!(err.to_string(), "Valid email is required");
    }

    #[rstest]
    #[case("  ", "password")]
    #[case("", "password")]
    fn login_requires_an_identifier(#[case] identifier: &str, #[case] password: &str) {
        let err = LoginCredentials::try_from_parts(identifier, password)
            .expect_err("blank identifier rejected");
        assert_eq!(err, CredentialsValidationError::EmptyIdentifier);
    }

    #[rstest]
    fn login_requires_a_password() {
        let err =
            LoginCredentials::try_from_parts("alice", "").expect_err("blank password rejected");
        assert_eq!(err, CredentialsValidationError::EmptyPassword);
    }

    #[rstest]
    fn login_trims_the_identifier_but_not_the_password() {
        let creds =
            LoginCredentials::try_from_parts("  alice  ", " pw ").expect("valid credentials");
        assert_eq!(creds.identifier(), "alice");
        assert_eq!(creds.password(), " pw ");
    }
}
