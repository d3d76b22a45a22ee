//! Request/response DTOs and their validation
//!
//! Validation runs at the edge, before any service call, so malformed
//! input never reaches the core.

use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use bankcards::{Error, Result};

/// Public view of a card: masked number only, derived at read time
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CardDto {
    pub id: Uuid,
    pub masked_card_number: String,
    pub expiry_date: NaiveDate,
    pub status: String,
    pub balance: Decimal,
}

/// Balance-only view; deliberately does not expose the card status
#[derive(Debug, Serialize, Deserialize)]
pub struct BalanceDto {
    pub balance: Decimal,
}

/// Administrator request to issue a card for a user
#[derive(Debug, Deserialize, Serialize)]
pub struct CreateCardRequest {
    pub user_id: Uuid,
    pub card_number: String,
    pub expiry_date: NaiveDate,
}

impl CreateCardRequest {
    pub fn validate(&self) -> Result<()> {
        if self.card_number.len() != 16 || !self.card_number.bytes().all(|b| b.is_ascii_digit()) {
            return Err(Error::Validation(
                "card number must be exactly 16 digits".into(),
            ));
        }
        if self.expiry_date <= Utc::now().date_naive() {
            return Err(Error::Validation("expiry date must be in the future".into()));
        }
        Ok(())
    }
}

/// Transfer between two cards of the requesting user
#[derive(Debug, Deserialize, Serialize)]
pub struct TransferRequest {
    pub from_card_id: Uuid,
    pub to_card_id: Uuid,
    pub amount: Decimal,
}

impl TransferRequest {
    pub fn validate(&self) -> Result<()> {
        if self.amount <= Decimal::ZERO {
            return Err(Error::Validation(
                "transfer amount must be positive".into(),
            ));
        }
        Ok(())
    }
}

/// New-user registration payload
#[derive(Debug, Deserialize, Serialize)]
pub struct RegisterRequest {
    pub username: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
}

impl RegisterRequest {
    pub fn validate(&self) -> Result<()> {
        if self.username.trim().is_empty() {
            return Err(Error::Validation("username must not be blank".into()));
        }
        if self.password.len() < 6 {
            return Err(Error::Validation(
                "password must be at least 6 characters".into(),
            ));
        }
        if self.first_name.trim().is_empty() || self.last_name.trim().is_empty() {
            return Err(Error::Validation("first and last name are required".into()));
        }
        Ok(())
    }
}

/// Login payload
#[derive(Debug, Deserialize, Serialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Issued-token response
#[derive(Debug, Serialize, Deserialize)]
pub struct JwtAuthResponse {
    pub access_token: String,
    pub token_type: String,
}

/// Registration confirmation
#[derive(Debug, Serialize, Deserialize)]
pub struct RegisterResponse {
    pub message: String,
}
