//! Authentication and authorization middleware
//!
//! Bearer tokens are HS256 JWTs carrying the username and role names.
//! Handlers receive the decoded principal as an [`AuthUser`] extractor
//! and call [`AuthUser::require_role`] explicitly before touching the
//! services; ownership checks live deeper, in the card service itself.

use std::collections::HashSet;

use axum::{async_trait, extract::FromRequestParts, http::header, http::request::Parts};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use bankcards::user::{Role, User};
use bankcards::{Error, Result};

use crate::error::ApiError;
use crate::state::AppState;

/// JWT claims structure
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (username)
    pub sub: String,
    /// Role names (`"USER"`, `"ADMIN"`)
    pub roles: Vec<String>,
    /// Issued at
    pub iat: i64,
    /// Expiration time
    pub exp: i64,
}

/// Signing and verification keys for access tokens
pub struct JwtKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
}

impl JwtKeys {
    pub fn new(secret: &[u8]) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
        }
    }

    /// Issue a token for a user
    pub fn issue(&self, user: &User, ttl_hours: i64) -> Result<String> {
        let now = Utc::now();
        let claims = Claims {
            sub: user.username.clone(),
            roles: user.roles.iter().map(|r| r.name().to_string()).collect(),
            iat: now.timestamp(),
            exp: (now + Duration::hours(ttl_hours)).timestamp(),
        };

        encode(&Header::default(), &claims, &self.encoding)
            .map_err(|e| Error::Configuration(format!("failed to issue token: {e}")))
    }

    /// Verify a token and return its claims
    pub fn verify(&self, token: &str) -> Result<Claims> {
        decode::<Claims>(token, &self.decoding, &Validation::new(Algorithm::HS256))
            .map(|data| data.claims)
            .map_err(|e| Error::InvalidCredentials(format!("invalid token: {e}")))
    }
}

/// Authenticated principal resolved from the Authorization header
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub username: String,
    pub roles: HashSet<Role>,
}

impl AuthUser {
    /// Explicit role guard called at the top of each protected handler
    pub fn require_role(&self, role: Role) -> std::result::Result<(), ApiError> {
        if self.roles.contains(&role) {
            Ok(())
        } else {
            Err(ApiError(Error::AccessDenied(format!(
                "role {} is required for this operation",
                role.name()
            ))))
        }
    }
}

#[async_trait]
impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> std::result::Result<Self, Self::Rejection> {
        let header_value = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or_else(|| {
                ApiError(Error::InvalidCredentials(
                    "missing authorization header".into(),
                ))
            })?;

        let token = header_value.strip_prefix("Bearer ").ok_or_else(|| {
            ApiError(Error::InvalidCredentials(
                "authorization header must carry a bearer token".into(),
            ))
        })?;

        let claims = state.jwt_keys.verify(token)?;
        let roles = claims
            .roles
            .iter()
            .filter_map(|name| Role::parse(name))
            .collect();

        Ok(AuthUser {
            username: claims.sub,
            roles,
        })
    }
}
