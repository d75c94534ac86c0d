//! In-memory [`UserRepository`]

use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;
use uuid::Uuid;

use auth_core::domain::entities::user::User;
use auth_core::errors::StoreError;
use auth_core::repositories::UserRepository;

/// User store held in a map, with the same uniqueness rules as the
/// MySQL schema
#[derive(Default)]
pub struct InMemoryUserRepository {
    users: RwLock<HashMap<Uuid, User>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored users
    pub async fn len(&self) -> usize {
        self.users.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.users.read().await.is_empty()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, user: &User) -> Result<(), StoreError> {
        let mut users = self.users.write().await;

        let taken = users.values().find_map(|existing| {
            if existing.name == user.name {
                Some("name")
            } else if existing.email == user.email {
                Some("email")
            } else {
                None
            }
        });
        if let Some(field) = taken.or_else(|| users.contains_key(&user.id).then_some("id")) {
            return Err(StoreError::Duplicate {
                field: field.to_string(),
            });
        }

        users.insert(user.id, user.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, StoreError> {
        Ok(self.users.read().await.get(&id).cloned())
    }

    async fn find_by_identifier(&self, identifier: &str) -> Result<Option<User>, StoreError> {
        Ok(self
            .users
            .read()
            .await
            .values()
            .find(|u| u.matches_identifier(identifier))
            .cloned())
    }

    async fn delete(&self, id: Uuid) -> Result<bool, StoreError> {
        Ok(self.users.write().await.remove(&id).is_some())
    }
}
