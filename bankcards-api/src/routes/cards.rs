//! Card endpoints for the authenticated owner

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use bankcards::user::Role;

use crate::error::ApiError;
use crate::middleware::auth::AuthUser;
use crate::models::dto::{BalanceDto, CardDto, TransferRequest};
use crate::models::page::{Page, PageParams};
use crate::state::AppState;

/// Handler for `GET /api/cards?page&size`: one page of the principal's
/// own cards.
pub async fn list_my_cards(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(params): Query<PageParams>,
) -> Result<Json<Page<CardDto>>, ApiError> {
    auth.require_role(Role::User)?;
    let (page, size) = params.normalize();
    let cards = state
        .card_service
        .list_cards_for_user(&auth.username, page, size)
        .await?;
    Ok(Json(cards))
}

/// Handler for `PATCH /api/cards/{id}/request-block`: owner-initiated
/// block request.
pub async fn request_block(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(card_id): Path<Uuid>,
) -> Result<Json<CardDto>, ApiError> {
    auth.require_role(Role::User)?;
    let card = state
        .card_service
        .request_block(card_id, &auth.username)
        .await?;
    Ok(Json(card))
}

/// Handler for `POST /api/cards/transfer`: moves funds between two of the
/// principal's own cards.
pub async fn transfer(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(request): Json<TransferRequest>,
) -> Result<StatusCode, ApiError> {
    auth.require_role(Role::User)?;
    request.validate()?;

    state
        .card_service
        .transfer(
            request.from_card_id,
            request.to_card_id,
            request.amount,
            &auth.username,
        )
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Handler for `GET /api/cards/{id}/balance`: balance of one of the
/// principal's cards.
pub async fn get_balance(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(card_id): Path<Uuid>,
) -> Result<Json<BalanceDto>, ApiError> {
    auth.require_role(Role::User)?;
    let balance = state
        .card_service
        .get_balance(card_id, &auth.username)
        .await?;
    Ok(Json(balance))
}
