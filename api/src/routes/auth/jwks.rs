use actix_web::{web, HttpResponse};

use auth_core::repositories::{RefreshStore, UserRepository};

use super::AppState;

/// Handler for GET /api/v1/auth/jwks
///
/// Publishes the current verification key as a JWK set so downstream
/// services can check access tokens without calling back.
pub async fn jwks<U, S>(state: web::Data<AppState<U, S>>) -> HttpResponse
where
    U: UserRepository + 'static,
    S: RefreshStore + 'static,
{
    HttpResponse::Ok()
        .insert_header(("Cache-Control", "public, max-age=60"))
        .json(state.session_service.public_key_set())
}
