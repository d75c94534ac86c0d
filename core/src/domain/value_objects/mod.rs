//! Value objects representing immutable domain concepts.

pub mod key_set;
pub mod token_pair;

// Re-export commonly used types
pub use key_set::{Jwk, PublishedKeySet};
pub use token_pair::TokenPair;
