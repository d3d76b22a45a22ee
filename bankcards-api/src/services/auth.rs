//! Registration and login service

use std::sync::Arc;

use bcrypt::DEFAULT_COST;
use tracing::info;

use bankcards::user::User;
use bankcards::{Error, Result};

use crate::middleware::auth::JwtKeys;
use crate::models::dto::JwtAuthResponse;
use crate::repository::UserRepository;

/// Authentication service: registration and token issuance
pub struct AuthService {
    users: Arc<dyn UserRepository>,
    jwt_keys: Arc<JwtKeys>,
    token_ttl_hours: i64,
    bcrypt_cost: u32,
}

impl AuthService {
    pub fn new(users: Arc<dyn UserRepository>, jwt_keys: Arc<JwtKeys>, token_ttl_hours: i64) -> Self {
        Self {
            users,
            jwt_keys,
            token_ttl_hours,
            bcrypt_cost: DEFAULT_COST,
        }
    }

    /// Lower the hashing cost; tests use the bcrypt minimum to stay fast
    pub fn with_bcrypt_cost(mut self, cost: u32) -> Self {
        self.bcrypt_cost = cost;
        self
    }

    /// Register a new user with the default role set `{USER}`
    ///
    /// The username pre-check only fails fast; the repository insert
    /// enforces uniqueness authoritatively under its own lock.
    pub async fn register(
        &self,
        username: &str,
        password: &str,
        first_name: &str,
        last_name: &str,
    ) -> Result<String> {
        if self.users.find_by_username(username).await?.is_some() {
            return Err(Error::DuplicateUsername(username.to_string()));
        }

        let password_hash = bcrypt::hash(password, self.bcrypt_cost)
            .map_err(|e| Error::Configuration(format!("password hashing failed: {e}")))?;

        let user = self
            .users
            .insert(User::new(
                username.to_string(),
                password_hash,
                first_name.to_string(),
                last_name.to_string(),
            ))
            .await?;

        info!(username = %user.username, "user registered");
        Ok("User registered successfully".to_string())
    }

    /// Verify credentials and issue an access token
    pub async fn login(&self, username: &str, password: &str) -> Result<JwtAuthResponse> {
        let user = self
            .users
            .find_by_username(username)
            .await?
            .ok_or_else(|| Error::InvalidCredentials("bad username or password".into()))?;

        let verified = bcrypt::verify(password, &user.password_hash)
            .map_err(|e| Error::Configuration(format!("credential verification failed: {e}")))?;
        if !verified {
            return Err(Error::InvalidCredentials("bad username or password".into()));
        }

        let access_token = self.jwt_keys.issue(&user, self.token_ttl_hours)?;
        info!(username = %user.username, "login succeeded");
        Ok(JwtAuthResponse {
            access_token,
            token_type: "Bearer".to_string(),
        })
    }
}
