//! Business services

pub mod auth;
pub mod cards;

pub use auth::AuthService;
pub use cards::CardService;
