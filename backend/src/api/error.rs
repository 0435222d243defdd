//! HTTP error payloads and mapping from domain errors.
//!
//! The wire contract is inherited from the service this one replaces:
//! validation failures and business-rule conflicts all answer 409 with a
//! JSON `{"message": ...}` envelope, unrouted requests answer 404 plain
//! text, and unhandled failures answer 500 plain text. 409 stands in where
//! 400 and 404 would be conventional; clients depend on it, so it stays.

use actix_web::http::StatusCode;
use actix_web::{HttpRequest, HttpResponse, ResponseError, web};
use serde::{Deserialize, Serialize};
use tracing::{debug, error};
use utoipa::ToSchema;

use crate::domain::UserServiceError;

/// Message returned when a request body fails schema validation.
pub const INVALID_ARGUMENTS: &str = "Invalid arguments!";
/// Message returned when a create collides with an existing email.
pub const USER_ALREADY_EXISTS: &str = "User already exists!";
/// Message returned when an update targets an unknown email.
pub const USER_NOT_FOUND: &str = "User not found!";

const INTERNAL_BODY: &str = "Something broke!";
const NO_MATCH_BODY: &str = "Page not found";
const TEXT_PLAIN: &str = "text/plain; charset=utf-8";

/// JSON envelope carried by conflict responses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ErrorMessage {
    /// Human-readable description of the rejection.
    #[schema(example = "Invalid arguments!")]
    pub message: String,
}

/// Error type returned by HTTP handlers.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    /// Recoverable rejection answered with 409 and a JSON message envelope.
    #[error("{0}")]
    Conflict(String),
    /// Unexpected failure answered with 500 plain text.
    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    /// Conflict response for bodies failing schema validation.
    pub fn invalid_arguments() -> Self {
        Self::Conflict(INVALID_ARGUMENTS.into())
    }

    /// Conflict response for creates targeting a taken email.
    pub fn already_exists() -> Self {
        Self::Conflict(USER_ALREADY_EXISTS.into())
    }

    /// Conflict response for updates targeting an unknown email.
    pub fn not_found() -> Self {
        Self::Conflict(USER_NOT_FOUND.into())
    }

    /// Internal error carrying diagnostic detail for the log line only.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }
}

impl From<UserServiceError> for ApiError {
    fn from(err: UserServiceError) -> Self {
        match err {
            UserServiceError::AlreadyExists => Self::already_exists(),
            UserServiceError::NotFound => Self::not_found(),
            UserServiceError::Persistence(inner) => Self::internal(inner.to_string()),
        }
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::Conflict(_) => StatusCode::CONFLICT,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        match self {
            Self::Conflict(message) => HttpResponse::Conflict().json(ErrorMessage {
                message: message.clone(),
            }),
            Self::Internal(message) => {
                // Diagnostic detail stays in the log; the body is fixed.
                error!(error = %message, "unhandled failure reached the error responder");
                HttpResponse::InternalServerError()
                    .content_type(TEXT_PLAIN)
                    .body(INTERNAL_BODY)
            }
        }
    }
}

/// Convenience alias for HTTP handlers.
pub type ApiResult<T> = Result<T, ApiError>;

/// Responder for requests no route matches, covering unsupported methods on
/// the resource path.
pub async fn page_not_found() -> HttpResponse {
    HttpResponse::NotFound()
        .content_type(TEXT_PLAIN)
        .body(NO_MATCH_BODY)
}

/// Map JSON extractor failures (malformed bodies, missing or mistyped
/// fields) onto the schema-validation rejection.
pub fn json_payload_error_handler(
    err: actix_web::error::JsonPayloadError,
    _req: &HttpRequest,
) -> actix_web::Error {
    debug!(error = %err, "request body rejected");
    ApiError::invalid_arguments().into()
}

/// JSON extractor configuration shared by every route.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(json_payload_error_handler)
}

#[cfg(test)]
mod tests {
    //! Response-shape coverage for the error envelope and fallbacks.

    use actix_web::body::to_bytes;

    use super::*;
    use crate::domain::ports::UserPersistenceError;

    async fn body_string(response: HttpResponse) -> String {
        let bytes = to_bytes(response.into_body())
            .await
            .expect("reading response body succeeds");
        String::from_utf8(bytes.to_vec()).expect("body is UTF-8")
    }

    #[actix_web::test]
    async fn conflicts_render_the_json_message_envelope() {
        let cases = [
            (ApiError::invalid_arguments(), INVALID_ARGUMENTS),
            (ApiError::already_exists(), USER_ALREADY_EXISTS),
            (ApiError::not_found(), USER_NOT_FOUND),
        ];

        for (err, expected) in cases {
            let response = err.error_response();
            assert_eq!(response.status(), StatusCode::CONFLICT);
            let payload: ErrorMessage =
                serde_json::from_str(&body_string(response).await).expect("envelope parses");
            assert_eq!(payload.message, expected);
        }
    }

    #[actix_web::test]
    async fn internal_errors_render_fixed_plain_text() {
        let response = ApiError::internal("connection refused").error_response();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let content_type = response
            .headers()
            .get("content-type")
            .and_then(|v| v.to_str().ok())
            .map(str::to_owned);
        assert_eq!(content_type.as_deref(), Some(TEXT_PLAIN));
        assert_eq!(body_string(response).await, INTERNAL_BODY);
    }

    #[actix_web::test]
    async fn no_match_responder_renders_plain_text_404() {
        let response = page_not_found().await;

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_string(response).await, NO_MATCH_BODY);
    }

    #[test]
    fn service_errors_map_to_their_conflict_messages() {
        assert_eq!(
            ApiError::from(UserServiceError::AlreadyExists),
            ApiError::already_exists()
        );
        assert_eq!(
            ApiError::from(UserServiceError::NotFound),
            ApiError::not_found()
        );
        let mapped = ApiError::from(UserServiceError::Persistence(
            UserPersistenceError::connection("refused"),
        ));
        assert!(matches!(mapped, ApiError::Internal(_)));
    }
}
