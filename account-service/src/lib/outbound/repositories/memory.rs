use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::account::errors::AccountError;
use crate::account::models::EmailAddress;
use crate::account::models::User;
use crate::account::models::UserId;
use crate::account::ports::UserRepository;

/// Process-local user store.
///
/// Id and email uniqueness are checked and the insert performed under a single
/// write lock, so concurrent registrations cannot both succeed.
#[derive(Default)]
pub struct InMemoryUserRepository {
    users: RwLock<HashMap<UserId, User>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, user: User) -> Result<User, AccountError> {
        let mut props = user.to_props();
        props.email = props.email.normalized();
        let user = User::rehydrate(props);

        let mut users = self.users.write().await;

        if users.contains_key(user.id()) {
            return Err(AccountError::Conflict(user.id().to_string()));
        }
        if users.values().any(|existing| existing.email() == user.email()) {
            return Err(AccountError::EmailAlreadyExists(user.email().to_string()));
        }

        users.insert(user.id().clone(), user.clone());

        Ok(user)
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, AccountError> {
        Ok(self.users.read().await.get(id).cloned())
    }

    async fn find_by_email(&self, email: &EmailAddress) -> Result<Option<User>, AccountError> {
        let email = email.normalized();

        Ok(self
            .users
            .read()
            .await
            .values()
            .find(|user| user.email() == &email)
            .cloned())
    }
}
