use actix_web::{web, HttpResponse};
use validator::Validate;

use auth_core::repositories::{RefreshStore, UserRepository};

use super::AppState;
use crate::dto::auth_dto::{RefreshRequest, RefreshResponse};
use crate::handlers::error_handler::{handle_domain_error, validation_error_response};

/// Handler for POST /api/v1/auth/refresh
///
/// Redeems one use of a refresh token for a fresh access token. The refresh
/// token itself is not rotated.
///
/// # Request Body
///
/// ```json
/// { "refresh": "2f1c..." }
/// ```
///
/// # Response
///
/// ## Success (200 OK)
/// ```json
/// { "token": "eyJ..." }
/// ```
///
/// ## Errors
/// - 401 Unauthorized: refresh token expired, revoked or unknown
/// - 429 Too Many Requests: refresh token uses exhausted
pub async fn refresh<U, S>(
    state: web::Data<AppState<U, S>>,
    request: web::Json<RefreshRequest>,
) -> HttpResponse
where
    U: UserRepository + 'static,
    S: RefreshStore + 'static,
{
    if let Err(errors) = request.validate() {
        return validation_error_response(&errors);
    }

    match state.session_service.refresh_token(&request.refresh).await {
        Ok(token) => HttpResponse::Ok().json(RefreshResponse { token }),
        Err(error) => handle_domain_error(error),
    }
}
