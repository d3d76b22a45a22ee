//! Persistence collaborators
//!
//! The services only see the repository traits; the shipped
//! implementations keep records in memory behind a single writer lock,
//! which stands in for the one-storage-transaction-per-operation model.

pub mod cards;
pub mod users;

pub use cards::{CardRepository, InMemoryCardRepository};
pub use users::{InMemoryUserRepository, UserRepository};
