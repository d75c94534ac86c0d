use actix_web::{web, HttpResponse};
use validator::Validate;

use auth_core::repositories::{RefreshStore, UserRepository};

use super::AppState;
use crate::dto::auth_dto::{LogoutRequest, MessageResponse};
use crate::handlers::error_handler::{handle_domain_error, validation_error_response};

/// Handler for POST /api/v1/auth/logout
///
/// Re-checks the credentials, then revokes the supplied refresh token if any.
/// Access tokens already issued stay valid until they expire.
///
/// ## Errors
/// - 401 Unauthorized: unknown identifier or wrong password
pub async fn logout<U, S>(
    state: web::Data<AppState<U, S>>,
    request: web::Json<LogoutRequest>,
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
        .logout(
            &request.identifier,
            &request.password,
            request.refresh_token.as_deref(),
        )
        .await
    {
        Ok(()) => HttpResponse::Ok().json(MessageResponse::new("Logged out successfully")),
        Err(error) => handle_domain_error(error),
    }
}
