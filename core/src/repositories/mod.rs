//! Interfaces of the external stores the session layer depends on.

pub mod refresh;
pub mod user;

pub use refresh::{DecrementOutcome, RefreshFields, RefreshStore};
pub use user::UserRepository;
