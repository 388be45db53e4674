//! HTTP error payloads and mapping from domain errors.
//!
//! Keep the domain free of transport concerns by translating
//! [`Error`](crate::domain::Error) into Actix responses here. Every error
//! body has the shape `{"success": false, "message": "..."}`; internal
//! causes are logged server-side and replaced with a generic message before
//! crossing the boundary.

use actix_web::error::JsonPayloadError;
use actix_web::{HttpRequest, HttpResponse, ResponseError, http::StatusCode};
use serde::Serialize;
use tracing::{debug, error};
use utoipa::ToSchema;

use crate::domain::{Error, ErrorCode};

/// Fallback message for internal failures with no endpoint context.
const GENERIC_FAILURE: &str = "An unexpected error occurred";

/// Standard error envelope returned by the HTTP adapter.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ApiError {
    #[serde(skip)]
    code: ErrorCode,
    /// Always `false`; mirrors the success envelope so clients can branch
    /// on one field.
    #[schema(example = false)]
    success: bool,
    /// User-safe failure description.
    #[schema(example = "Invalid credentials")]
    message: String,
}

impl ApiError {
    /// Construct an error payload directly.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            success: false,
            message: message.into(),
        }
    }

    /// Stable machine-readable error code.
    pub const fn code(&self) -> ErrorCode {
        self.code
    }

    /// User-safe message.
    pub fn message(&self) -> &str {
        self.message.as_str()
    }

    const fn to_status_code(&self) -> StatusCode {
        match self.code {
            ErrorCode::InvalidRequest => StatusCode::BAD_REQUEST,
            ErrorCode::Unauthorized => StatusCode::UNAUTHORIZED,
            ErrorCode::Conflict => StatusCode::CONFLICT,
            ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<Error> for ApiError {
    fn from(value: Error) -> Self {
        if value.code() == ErrorCode::InternalError {
            error!(cause = %value, "internal error promoted to API error");
            return Self::new(ErrorCode::InternalError, GENERIC_FAILURE);
        }
        Self::new(value.code(), value.message())
    }
}

/// Map a domain failure, replacing internal causes with an
/// endpoint-specific message ("An error occurred during registration" and
/// the like) after logging the real cause.
pub fn guard_internal(value: Error, context: &'static str) -> ApiError {
    if value.code() == ErrorCode::InternalError {
        error!(cause = %value, context, "account operation failed");
        return ApiError::new(ErrorCode::InternalError, context);
    }
    ApiError::from(value)
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for ApiError {}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        self.to_status_code()
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(self)
    }
}

/// Replace Actix's plain-text JSON extractor rejection with the standard
/// envelope. Missing keys are absorbed by the request structs' defaults, so
/// this only fires when the payload itself cannot be parsed as the expected
/// shape.
pub fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    debug!(cause = %err, "rejected unparseable JSON payload");
    ApiError::new(ErrorCode::InvalidRequest, "Invalid request body").into()
}

/// Convenience alias for HTTP handlers.
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    #![expect(
        clippy::expect_used,
        reason = "test code uses expect for clear failure messages"
    )]

    use super::*;
    use rstest::rstest;
    use serde_json::Value;

    #[rstest]
    #[case(Error::invalid_request("All fields are required"), StatusCode::BAD_REQUEST)]
    #[case(Error::unauthorized("Invalid credentials"), StatusCode::UNAUTHORIZED)]
    #[case(Error::conflict("Username already taken"), StatusCode::CONFLICT)]
    #[case(Error::internal("pool exhausted"), StatusCode::INTERNAL_SERVER_ERROR)]
    fn domain_codes_map_to_statuses(#[case] error: Error, #[case] expected: StatusCode) {
        let api_error = ApiError::from(error);
        assert_eq!(api_error.status_code(), expected);
    }

    #[rstest]
    fn internal_causes_are_redacted() {
        let api_error = ApiError::from(Error::internal("connection string leaked"));
        assert_eq!(api_error.message(), GENERIC_FAILURE);
    }

    #[rstest]
    fn guard_internal_applies_the_endpoint_context() {
        let api_error = guard_internal(
            Error::internal("diesel: relation missing"),
            "An error occurred during registration",
        );
        assert_eq!(api_error.message(), "An error occurred during registration");
        assert_eq!(api_error.code(), ErrorCode::InternalError);
    }

    #[rstest]
    fn guard_internal_leaves_user_facing_errors_alone() {
        let api_error = guard_internal(
            Error::conflict("Email already registered"),
            "An error occurred during registration",
        );
        assert_eq!(api_error.message(), "Email already registered");
    }

    #[rstest]
    fn envelope_serialises_success_false_and_message() {
        let api_error = ApiError::new(ErrorCode::Conflict, "Email already registered");
        let value = serde_json::to_value(&api_error).expect("serialisable error");
        assert_eq!(value.get("success"), Some(&Value::Bool(false)));
        assert_eq!(
            value.get("message").and_then(Value::as_str),
            Some("Email already registered")
        );
        assert!(value.get("code").is_none());
    }
}
