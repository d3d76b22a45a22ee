//! User repository trait and in-memory implementation

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use bankcards::user::User;
use bankcards::{Error, Result};

/// User repository trait for data access
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Persist a new user. The storage layer enforces username
    /// uniqueness; callers may pre-check, but this insert is the source
    /// of truth.
    async fn insert(&self, user: User) -> Result<User>;

    /// Look a user up by id
    async fn find_by_id(&self, user_id: Uuid) -> Result<Option<User>>;

    /// Look a user up by unique username
    async fn find_by_username(&self, username: &str) -> Result<Option<User>>;
}

#[derive(Default)]
struct UserStore {
    users: HashMap<Uuid, User>,
    by_username: HashMap<String, Uuid>,
}

/// In-memory user repository implementation
#[derive(Default)]
pub struct InMemoryUserRepository {
    store: RwLock<UserStore>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn insert(&self, user: User) -> Result<User> {
        let mut store = self.store.write().await;
        if store.by_username.contains_key(&user.username) {
            return Err(Error::DuplicateUsername(user.username));
        }
        store.by_username.insert(user.username.clone(), user.id);
        store.users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn find_by_id(&self, user_id: Uuid) -> Result<Option<User>> {
        let store = self.store.read().await;
        Ok(store.users.get(&user_id).cloned())
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>> {
        let store = self.store.read().await;
        let id = match store.by_username.get(username) {
            Some(id) => *id,
            None => return Ok(None),
        };
        Ok(store.users.get(&id).cloned())
    }
}
