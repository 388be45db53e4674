//! Account API handlers.
//!
//! ```text
//! POST /api/register           {"username","email","password","fullName","role"}
//! POST /api/login              {"identifier","password"}
//! POST /api/check-availability {"field","value"}
//! ```
//!
//! Register and login answer `{success, message, user}`; the availability
//! check always answers 200 with `{available}` so probing it reveals nothing
//! beyond the verdict.

use actix_web::{post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{
    Availability, CredentialsValidationError, Error, LoginCredentials, PublicUser, Registration,
    RegistrationValidationError,
};
use crate::inbound::http::error::guard_internal;
use crate::inbound::http::{ApiResult, HttpState};

const REGISTRATION_FAILURE: &str = "An error occurred during registration";
const LOGIN_FAILURE: &str = "An error occurred during login";

/// Registration request body for `POST /api/register`.
///
/// Every field defaults to empty so a missing key reaches domain validation
/// and earns "All fields are required" rather than an extractor rejection.
#[derive(Debug, Clone, Default, Deserialize, Serialize, ToSchema)]
#[serde(default)]
pub struct RegisterRequest {
    /// Requested login handle.
    pub username: String,
    /// Requested email address.
    pub email: String,
    /// Raw password, at least six characters.
    pub password: String,
    /// Display name; camelCase on the wire.
    #[serde(rename = "fullName")]
    pub full_name: String,
    /// Either `student` or `teacher`.
    pub role: String,
}

impl TryFrom<RegisterRequest> for Registration {
    type Error = RegistrationValidationError;

    fn try_from(value: RegisterRequest) -> Result<Self, Self::Error> {
        Self::try_from_parts(
            &value.username,
            &value.email,
            &value.password,
            &value.full_name,
            &value.role,
        )
    }
}

/// Login request body for `POST /api/login`.
///
/// Fields default to empty so a missing key maps to the same 400 as a blank
/// one.
#[derive(Debug, Clone, Default, Deserialize, Serialize, ToSchema)]
#[serde(default)]
pub struct LoginRequest {
    /// Username or email address.
    pub identifier: String,
    /// Raw password.
    pub password: String,
}

impl TryFrom<LoginRequest> for LoginCredentials {
    type Error = CredentialsValidationError;

    fn try_from(value: LoginRequest) -> Result<Self, Self::Error> {
        Self::try_from_parts(&value.identifier, &value.password)
    }
}

/// Availability request body for `POST /api/check-availability`.
///
/// Fields default to absent so a malformed or partial body degrades to a
/// negative verdict instead of a 4xx.
#[derive(Debug, Clone, Default, Deserialize, Serialize, ToSchema)]
pub struct AvailabilityRequest {
    /// Either `username` or `email`.
    pub field: Option<String>,
    /// Candidate value to probe.
    pub value: Option<String>,
}

/// Success envelope for register and login.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct AccountResponse {
    /// Always `true` on this path.
    #[schema(example = true)]
    pub success: bool,
    /// Human-readable outcome description.
    #[schema(example = "Login successful")]
    pub message: String,
    /// Snapshot of the user record, digest excluded.
    pub user: PublicUser,
}

impl AccountResponse {
    fn new(message: &str, user: PublicUser) -> Self {
        Self {
            success: true,
            message: message.to_owned(),
            user,
        }
    }
}

/// Register a new user.
#[utoipa::path(
    post,
    path = "/api/register",
    request_body = RegisterRequest,
    responses(
        (status = 200, description = "Registration successful", body = AccountResponse),
        (status = 400, description = "Invalid input", body = crate::inbound::http::ApiError),
        (status = 409, description = "Username or email already taken", body = crate::inbound::http::ApiError),
        (status = 500, description = "Unexpected failure", body = crate::inbound::http::ApiError)
    ),
    tags = ["accounts"],
    operation_id = "register"
)]
#[post("/register")]
pub async fn register(
    state: web::Data<HttpState>,
    payload: web::Json<RegisterRequest>,
) -> ApiResult<web::Json<AccountResponse>> {
    let registration = Registration::try_from(payload.into_inner())
        .map_err(|err| Error::invalid_request(err.to_string()))?;
    let user = state
        .accounts
        .register(&registration)
        .await
        .map_err(|err| guard_internal(err, REGISTRATION_FAILURE))?;
    Ok(web::Json(AccountResponse::new("Registration successful", user)))
}

/// Authenticate by username-or-email plus password.
#[utoipa::path(
    post,
    path = "/api/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = AccountResponse),
        (status = 400, description = "Missing identifier or password", body = crate::inbound::http::ApiError),
        (status = 401, description = "Invalid credentials", body = crate::inbound::http::ApiError),
        (status = 500, description = "Unexpected failure", body = crate::inbound::http::ApiError)
    ),
    tags = ["accounts"],
    operation_id = "login"
)]
#[post("/login")]
pub async fn login(
    state: web::Data<HttpState>,
    payload: web::Json<LoginRequest>,
) -> ApiResult<web::Json<AccountResponse>> {
    let credentials = LoginCredentials::try_from(payload.into_inner())
        .map_err(|_| Error::invalid_request("Email/username and password are required"))?;
    let user = state
        .accounts
        .authenticate(&credentials)
        .await
        .map_err(|err| guard_internal(err, LOGIN_FAILURE))?;
    Ok(web::Json(AccountResponse::new("Login successful", user)))
}

/// Check whether a username or email is still free.
///
/// Always answers 200: malformed bodies, unknown fields, and store errors
/// all degrade to `{"available": false}`.
#[utoipa::path(
    post,
    path = "/api/check-availability",
    request_body = AvailabilityRequest,
    responses(
        (status = 200, description = "Availability verdict", body = Availability)
    ),
    tags = ["accounts"],
    operation_id = "checkAvailability"
)]
#[post("/check-availability")]
pub async fn check_availability(
    state: web::Data<HttpState>,
    body: web::Bytes,
) -> web::Json<Availability> {
    let request: AvailabilityRequest = serde_json::from_slice(&body).unwrap_or_default();
    let verdict = state
        .accounts
        .check_availability(
            request.field.as_deref().unwrap_or(""),
            request.value.as_deref().unwrap_or(""),
        )
        .await;
    web::Json(verdict)
}
