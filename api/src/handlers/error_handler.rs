//! Mapping of session errors to HTTP responses
//!
//! Every error body is an [`ErrorResponse`] with a fixed message per kind.
//! Store and signing details stay in the logs.

use actix_web::{error::InternalError, http::StatusCode, web, HttpRequest, HttpResponse};
use tracing::{debug, error, warn};
use validator::ValidationErrors;

use auth_core::errors::DomainError;
use auth_shared::errors::{error_codes, ErrorResponse};

/// Status code and client message for a domain error
fn classify(error: &DomainError) -> (StatusCode, &'static str) {
    match error {
        DomainError::BadCredentials { .. } => (
            StatusCode::BAD_REQUEST,
            "The supplied registration data is invalid",
        ),
        DomainError::InvalidCredentials => (
            StatusCode::UNAUTHORIZED,
            "Invalid identifier or password",
        ),
        DomainError::ExpiredToken => (
            StatusCode::UNAUTHORIZED,
            "Refresh token is expired or unknown",
        ),
        DomainError::TooManyRequests => (
            StatusCode::TOO_MANY_REQUESTS,
            "Refresh token use limit reached, please log in again",
        ),
        DomainError::Internal { .. } => (
            StatusCode::INTERNAL_SERVER_ERROR,
            "An internal error occurred",
        ),
        DomainError::Unavailable { .. } => (
            StatusCode::SERVICE_UNAVAILABLE,
            "Service temporarily unavailable, please retry",
        ),
    }
}

/// Convert a domain error into its HTTP response
pub fn handle_domain_error(error: DomainError) -> HttpResponse {
    let (status, message) = classify(&error);
    let code = error.code();

    match &error {
        DomainError::Internal { operation, source } => {
            error!(operation, error = %source, "Request failed with internal error");
        }
        DomainError::Unavailable { operation } => {
            warn!(operation, "Request failed: store unavailable");
        }
        other => debug!(code, error = %other, "Request rejected"),
    }

    let mut body = ErrorResponse::new(code, message);
    if let DomainError::BadCredentials { reason } = &error {
        body = body.add_detail("reason", reason);
    }

    HttpResponse::build(status).json(body)
}

/// 400 response for a request body that failed field validation
pub fn validation_error_response(errors: &ValidationErrors) -> HttpResponse {
    let fields: Vec<&str> = errors.field_errors().keys().copied().collect();
    debug!(?fields, "Request validation failed");

    HttpResponse::BadRequest().json(
        ErrorResponse::new(error_codes::VALIDATION_ERROR, "Invalid request data")
            .add_detail("fields", fields),
    )
}

/// JSON extractor configuration answering malformed bodies with the
/// standard error envelope
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .limit(16 * 1024)
        .error_handler(|err, _req: &HttpRequest| {
            debug!(error = %err, "Malformed JSON body");
            let response = HttpResponse::BadRequest().json(ErrorResponse::new(
                error_codes::VALIDATION_ERROR,
                "Malformed request body",
            ));
            InternalError::from_response(err, response).into()
        })
}
