//! Bank-cards domain core
//!
//! This library holds the parts of the back office with invariants worth
//! protecting: the card entity and its status state machine, balance
//! arithmetic for transfers, card-number encryption, and display masking.
//! HTTP routing, token issuance, and persistence live in `bankcards-api`
//! and only call into the types defined here.

pub mod card;
pub mod crypto;
pub mod error;
pub mod mask;
pub mod user;

// Re-export commonly used types for convenience
pub use error::{Error, Result};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
