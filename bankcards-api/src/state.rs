//! Application state shared across handlers

use std::sync::Arc;

use bankcards::crypto::{CardCipher, StaticKeyProvider};
use bankcards::Result;

use crate::config::ApiConfig;
use crate::middleware::auth::JwtKeys;
use crate::repository::{
    CardRepository, InMemoryCardRepository, InMemoryUserRepository, UserRepository,
};
use crate::services::{AuthService, CardService};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub card_service: Arc<CardService>,
    pub auth_service: Arc<AuthService>,
    pub jwt_keys: Arc<JwtKeys>,
    /// Card repository, exposed for seeding and tests
    pub card_repository: Arc<dyn CardRepository>,
    /// User repository, exposed for seeding and tests
    pub user_repository: Arc<dyn UserRepository>,
}

impl AppState {
    /// Assemble the state from configuration
    ///
    /// Fails when the encryption secret is not exactly 16 bytes; callers
    /// treat that as fatal at startup.
    pub fn new(config: &ApiConfig) -> Result<Self> {
        let key_provider = StaticKeyProvider::new(config.encryption_secret.as_bytes().to_vec());
        let cipher = Arc::new(CardCipher::new(&key_provider)?);

        let card_repository: Arc<dyn CardRepository> = Arc::new(InMemoryCardRepository::new());
        let user_repository: Arc<dyn UserRepository> = Arc::new(InMemoryUserRepository::new());
        let jwt_keys = Arc::new(JwtKeys::new(config.jwt_secret.as_bytes()));

        let card_service = Arc::new(CardService::new(
            card_repository.clone(),
            user_repository.clone(),
            cipher,
        ));
        let auth_service = Arc::new(AuthService::new(
            user_repository.clone(),
            jwt_keys.clone(),
            config.token_ttl_hours,
        ));

        Ok(Self {
            card_service,
            auth_service,
            jwt_keys,
            card_repository,
            user_repository,
        })
    }
}
