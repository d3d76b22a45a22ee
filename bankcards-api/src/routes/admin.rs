//! Administrator endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use bankcards::user::Role;

use crate::error::ApiError;
use crate::middleware::auth::AuthUser;
use crate::models::dto::{CardDto, CreateCardRequest};
use crate::models::page::{Page, PageParams};
use crate::state::AppState;

/// Handler for `POST /api/admin/cards`: issues a card for a user.
pub async fn create_card(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(request): Json<CreateCardRequest>,
) -> Result<(StatusCode, Json<CardDto>), ApiError> {
    auth.require_role(Role::Admin)?;
    request.validate()?;

    let card = state
        .card_service
        .create_card(request.user_id, &request.card_number, request.expiry_date)
        .await?;
    Ok((StatusCode::CREATED, Json(card)))
}

/// Handler for `GET /api/admin/cards?page&size`: one page of every card
/// in the system.
pub async fn list_all_cards(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(params): Query<PageParams>,
) -> Result<Json<Page<CardDto>>, ApiError> {
    auth.require_role(Role::Admin)?;
    let (page, size) = params.normalize();
    Ok(Json(state.card_service.list_all_cards(page, size).await?))
}

/// Handler for `PATCH /api/admin/cards/{id}/block`: confirms a requested
/// block or forces one.
pub async fn block_card(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(card_id): Path<Uuid>,
) -> Result<Json<CardDto>, ApiError> {
    auth.require_role(Role::Admin)?;
    Ok(Json(state.card_service.block_by_admin(card_id).await?))
}

/// Handler for `PATCH /api/admin/cards/{id}/activate`: reactivates a
/// blocked card.
pub async fn activate_card(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(card_id): Path<Uuid>,
) -> Result<Json<CardDto>, ApiError> {
    auth.require_role(Role::Admin)?;
    Ok(Json(state.card_service.activate_by_admin(card_id).await?))
}

/// Handler for `DELETE /api/admin/cards/{id}`: removes a card permanently.
pub async fn delete_card(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(card_id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    auth.require_role(Role::Admin)?;
    state.card_service.delete_by_admin(card_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
