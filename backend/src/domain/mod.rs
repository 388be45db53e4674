//! Domain core for the account service.
//!
//! Purpose: Define the strongly typed entities, validated input structs, and
//! the [`AccountService`] use-cases shared by the HTTP and persistence
//! layers. Types are immutable after construction and document their
//! invariants in each type's Rustdoc.
//!
//! Public surface:
//! - `Error` / `ErrorCode` — transport-agnostic failure payloads.
//! - `User`, `PublicUser`, `Role` and the validated field newtypes.
//! - `Registration`, `LoginCredentials` — validated operation inputs.
//! - `AccountService` — register, authenticate, and availability checks.
//! - `ports` — repository and hashing traits implemented by adapters.

pub mod accounts;
pub mod credentials;
pub mod error;
pub mod ports;
pub mod user;

pub use self::accounts::{AccountService, Availability};
pub use self::credentials::{
    CredentialsValidationError, LoginCredentials, Registration, RegistrationValidationError,
};
pub use self::error::{Error, ErrorCode};
pub use self::user::{
    EmailAddress, FullName, PasswordDigest, PublicUser, Role, User, UserId, UserValidationError,
    Username,
};
