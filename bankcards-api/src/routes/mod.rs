//! Route table for the HTTP surface

pub mod admin;
pub mod auth;
pub mod cards;

use axum::{
    middleware::from_fn,
    routing::{delete, get, patch, post},
    Router,
};

use crate::error::error_details;
use crate::state::AppState;

/// Build the application router
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/auth/register", post(auth::register))
        .route("/api/auth/login", post(auth::login))
        .route(
            "/api/admin/cards",
            post(admin::create_card).get(admin::list_all_cards),
        )
        .route("/api/admin/cards/:id/block", patch(admin::block_card))
        .route("/api/admin/cards/:id/activate", patch(admin::activate_card))
        .route("/api/admin/cards/:id", delete(admin::delete_card))
        .route("/api/cards", get(cards::list_my_cards))
        .route("/api/cards/:id/request-block", patch(cards::request_block))
        .route("/api/cards/transfer", post(cards::transfer))
        .route("/api/cards/:id/balance", get(cards::get_balance))
        .layer(from_fn(error_details))
        .with_state(state)
}
