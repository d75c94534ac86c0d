//! Domain entities representing core business objects.

pub mod token;
pub mod user;


// Re-export commonly used types
pub use token::{
    refresh_key, AccessClaims, ACCESS_TOKEN_EXPIRY_MINUTES, REFRESH_FIELD_RATE,
    REFRESH_FIELD_USER, REFRESH_KEY_PREFIX, REFRESH_TOKEN_EXPIRY_DAYS, REFRESH_TOKEN_MAX_USES,
};
pub use user::User;
