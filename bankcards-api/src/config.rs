//! Environment-driven configuration

use std::env;

/// API server configuration, read once at startup
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Listen address, e.g. `0.0.0.0:8080`
    pub bind_addr: String,
    /// HS256 signing secret for access tokens
    pub jwt_secret: String,
    /// 16-byte secret for card-number encryption; wrong length is fatal
    pub encryption_secret: String,
    /// Access token lifetime in hours
    pub token_ttl_hours: i64,
}

impl ApiConfig {
    /// Load configuration from environment variables with development defaults
    pub fn from_env() -> Self {
        Self {
            bind_addr: env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:8080".to_string()),
            jwt_secret: env::var("JWT_SECRET")
                .unwrap_or_else(|_| "default_secret_change_in_production".to_string()),
            encryption_secret: env::var("CARD_ENCRYPTION_SECRET")
                .unwrap_or_else(|_| "0123456789abcdef".to_string()),
            token_ttl_hours: env::var("TOKEN_TTL_HOURS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(24),
        }
    }
}
