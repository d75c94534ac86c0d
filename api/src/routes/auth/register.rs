use actix_web::{web, HttpResponse};
use validator::Validate;

use auth_core::repositories::{RefreshStore, UserRepository};

use super::AppState;
use crate::dto::auth_dto::{RegisterRequest, RegisterResponse};
use crate::handlers::error_handler::{handle_domain_error, validation_error_response};

/// Handler for POST /api/v1/auth/register
///
/// # Request Body
///
/// ```json
/// { "name": "alice", "email": "alice@example.com", "password": "secret" }
/// ```
///
/// # Response
///
/// ## Success (201 Created)
/// ```json
/// { "accessToken": "eyJ...", "refreshToken": "2f1c..." }
/// ```
///
/// ## Errors
/// - 400 Bad Request: empty fields, malformed email or name/email already taken
/// - 500 Internal Server Error: store or signing failure
/// - 503 Service Unavailable: store timeout
pub async fn register<U, S>(
    state: web::Data<AppState<U, S>>,
    request: web::Json<RegisterRequest>,
) -> HttpResponse
where
    U: UserRepository + 'static,
    S: RefreshStore + 'static,
{
    if let Err(errors) = request.validate() {
        return validation_error_response(&errors);
    }

    match state
        .session_service
        .register(&request.name, &request.email, &request.password)
        .await
    {
        Ok(pair) => HttpResponse::Created().json(RegisterResponse::from(pair)),
        Err(error) => handle_domain_error(error),
    }
}
