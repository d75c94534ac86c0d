//! Application factory
//!
//! Builds the actix-web [`App`] around a shared [`AppState`]. The binary and
//! the integration tests go through the same factory.

use actix_web::body::MessageBody;
use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{web, App, HttpResponse};
use tracing_actix_web::TracingLogger;

use auth_core::repositories::{RefreshStore, UserRepository};
use auth_shared::errors::{error_codes, ErrorResponse};

use crate::handlers::error_handler::json_config;
use crate::routes::auth::{
    jwks::jwks, login::login, logout::logout, refresh::refresh, register::register, AppState,
};

/// Create the application with all routes and middleware
pub fn create_app<U, S>(
    app_state: web::Data<AppState<U, S>>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
>
where
    U: UserRepository + 'static,
    S: RefreshStore + 'static,
{
    App::new()
        .app_data(app_state)
        .app_data(json_config())
        .wrap(TracingLogger::default())
        .route("/health", web::get().to(health_check))
        .service(
            web::scope("/api/v1").service(
                web::scope("/auth")
                    .route("/register", web::post().to(register::<U, S>))
                    .route("/login", web::post().to(login::<U, S>))
                    .route("/refresh", web::post().to(refresh::<U, S>))
                    .route("/logout", web::post().to(logout::<U, S>))
                    .route("/jwks", web::get().to(jwks::<U, S>)),
            ),
        )
        .default_service(web::route().to(not_found))
}

async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy",
        "service": "auth-api",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}

async fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(ErrorResponse::new(
        error_codes::NOT_FOUND,
        "The requested resource was not found",
    ))
}
