use actix_web::{web, HttpResponse};
use validator::Validate;

use auth_core::repositories::{RefreshStore, UserRepository};

use super::AppState;
use crate::dto::auth_dto::{LoginRequest, LoginResponse};
use crate::handlers::error_handler::{handle_domain_error, validation_error_response};

/// Handler for POST /api/v1/auth/login
///
/// `identifier` matches either the user name or the email.
///
/// ## Success (200 OK)
/// ```json
/// { "token": "eyJ...", "refreshToken": "2f1c..." }
/// ```
///
/// ## Errors
/// - 401 Unauthorized: unknown identifier or wrong password
pub async fn login<U, S>(
    state: web::Data<AppState<U, S>>,
    request: web::Json<LoginRequest>,
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
        .login(&request.identifier, &request.password)
        .await
    {
        Ok(pair) => HttpResponse::Ok().json(LoginResponse::from(pair)),
        Err(error) => handle_domain_error(error),
    }
}
