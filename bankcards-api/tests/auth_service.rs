//! Tests for registration and login

use std::sync::Arc;

use bankcards::Error;
use bankcards_api::middleware::auth::JwtKeys;
use bankcards_api::repository::{InMemoryUserRepository, UserRepository};
use bankcards_api::services::AuthService;

fn service() -> (AuthService, Arc<dyn UserRepository>, Arc<JwtKeys>) {
    let users: Arc<dyn UserRepository> = Arc::new(InMemoryUserRepository::new());
    let jwt_keys = Arc::new(JwtKeys::new(b"auth-test-secret"));
    // Minimum bcrypt cost keeps the tests fast
    let service = AuthService::new(users.clone(), jwt_keys.clone(), 1).with_bcrypt_cost(4);
    (service, users, jwt_keys)
}

#[tokio::test]
async fn register_then_login_issues_a_verifiable_token() {
    let (service, users, jwt_keys) = service();

    let message = service
        .register("alice", "s3cret!", "Alice", "Smith")
        .await
        .unwrap();
    assert_eq!(message, "User registered successfully");

    // The stored credential is a hash, never the raw password
    let stored = users.find_by_username("alice").await.unwrap().unwrap();
    assert_ne!(stored.password_hash, "s3cret!");

    let response = service.login("alice", "s3cret!").await.unwrap();
    assert_eq!(response.token_type, "Bearer");

    let claims = jwt_keys.verify(&response.access_token).unwrap();
    assert_eq!(claims.sub, "alice");
    assert_eq!(claims.roles, vec!["USER".to_string()]);
    assert!(claims.exp > claims.iat);
}

#[tokio::test]
async fn duplicate_username_is_rejected() {
    let (service, _, _) = service();

    service
        .register("alice", "s3cret!", "Alice", "Smith")
        .await
        .unwrap();
    let result = service.register("alice", "other", "Other", "Alice").await;
    assert!(matches!(result, Err(Error::DuplicateUsername(_))));
}

#[tokio::test]
async fn login_failures_are_indistinguishable() {
    let (service, _, _) = service();
    service
        .register("alice", "s3cret!", "Alice", "Smith")
        .await
        .unwrap();

    let wrong_password = service.login("alice", "wrong").await;
    let unknown_user = service.login("nobody", "s3cret!").await;

    let Err(Error::InvalidCredentials(a)) = wrong_password else {
        panic!("expected invalid credentials");
    };
    let Err(Error::InvalidCredentials(b)) = unknown_user else {
        panic!("expected invalid credentials");
    };
    assert_eq!(a, b);
}
