//! User repository trait defining the interface for user data persistence.
//!
//! The relational user store lives outside this crate; the session layer only
//! needs to create users and find them by id or by login identifier.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::user::User;
use crate::errors::StoreError;

/// Repository trait for User entity persistence operations
///
/// Implementations enforce uniqueness of `name` and `email` and report a
/// collision as [`StoreError::Duplicate`].
///
/// # Example
/// ```no_run
/// # use auth_core::repositories::UserRepository;
/// # async fn example(repo: &impl UserRepository) -> Result<(), Box<dyn std::error::Error>> {
/// match repo.find_by_identifier("alice@example.com").await? {
///     Some(user) => println!("User found: {}", user.id),
///     None => println!("User not found"),
/// }
/// # Ok(())
/// # }
/// ```
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Create a new user
    ///
    /// # Arguments
    /// * `user` - The User entity to persist
    ///
    /// # Returns
    /// * `Ok(())` - User stored
    /// * `Err(StoreError::Duplicate)` - Name or email already taken
    /// * `Err(StoreError)` - Database or other error occurred
    async fn create(&self, user: &User) -> Result<(), StoreError>;

    /// Find a user by their unique identifier
    ///
    /// # Returns
    /// * `Ok(Some(User))` - User found
    /// * `Ok(None)` - No user found with given ID
    /// * `Err(StoreError)` - Database or other error occurred
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, StoreError>;

    /// Find a user whose name or email equals `identifier`
    ///
    /// # Returns
    /// * `Ok(Some(User))` - User found
    /// * `Ok(None)` - No user matches
    /// * `Err(StoreError)` - Database or other error occurred
    async fn find_by_identifier(&self, identifier: &str) -> Result<Option<User>, StoreError>;

    /// Delete a user
    ///
    /// # Returns
    /// * `Ok(true)` - User was deleted
    /// * `Ok(false)` - User not found
    /// * `Err(StoreError)` - Deletion failed
    async fn delete(&self, id: Uuid) -> Result<bool, StoreError>;
}
