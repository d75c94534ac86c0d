//! Password hashing and verification

mod hasher;

#[cfg(test)]
mod tests;

pub use hasher::CredentialHasher;
