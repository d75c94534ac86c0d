//! Authentication route handlers
//!
//! Registration, login, refresh-token redemption, logout and the published
//! verification key set. Each handler is generic over the user and refresh
//! stores so tests can mount the same routes over in-memory adapters.

pub mod jwks;
pub mod login;
pub mod logout;
pub mod refresh;
pub mod register;

use std::sync::Arc;

use auth_core::repositories::{RefreshStore, UserRepository};
use auth_core::services::SessionService;

/// Shared state handed to every route
pub struct AppState<U, S>
where
    U: UserRepository,
    S: RefreshStore,
{
    pub session_service: Arc<SessionService<U, S>>,
}

impl<U, S> AppState<U, S>
where
    U: UserRepository,
    S: RefreshStore,
{
    pub fn new(session_service: Arc<SessionService<U, S>>) -> Self {
        Self { session_service }
    }
}
