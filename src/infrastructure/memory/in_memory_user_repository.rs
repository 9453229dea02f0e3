//! Process-local implementation of user repository.

use async_trait::async_trait;
use serde_json::json;
use std::collections::HashMap;
use tokio::sync::RwLock;

use crate::domain::entities::User;
use crate::domain::repositories::UserRepository;
use crate::error::AppError;

#[derive(Default)]
pub struct InMemoryUserRepository {
    users: RwLock<HashMap<String, User>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a repository pre-populated with `users`.
    pub fn with_users(users: impl IntoIterator<Item = User>) -> Self {
        Self {
            users: RwLock::new(
                users
                    .into_iter()
                    .map(|user| (user.id.clone(), user))
                    .collect(),
            ),
        }
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_id(&self, id: &str) -> Result<Option<User>, AppError> {
        Ok(self.users.read().await.get(id).cloned())
    }

    async fn insert(&self, user: &User) -> Result<(), AppError> {
        let mut users = self.users.write().await;

        if users.contains_key(&user.id) {
            return Err(AppError::conflict(
                "Unique constraint violation",
                json!({ "constraint": "users_pkey" }),
            ));
        }

        users.insert(user.id.clone(), user.clone());
        Ok(())
    }
}
