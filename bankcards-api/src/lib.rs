//! REST API server for the bank-cards back office
//!
//! Exposes the `bankcards` domain core over authenticated HTTP endpoints:
//! administrators issue and manage cards, users view their own cards,
//! request blocks, check balances, and transfer between their own cards.

pub mod config;
pub mod error;
pub mod middleware;
pub mod models;
pub mod repository;
pub mod routes;
pub mod services;
pub mod state;
