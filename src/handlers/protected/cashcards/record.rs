use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};

use crate::auth::Principal;
use crate::database::models::{CashCard, CashCardRequest};
use crate::error::ApiError;
use crate::AppState;

/// GET /cashcards/:id
pub async fn get(
    State(state): State<AppState>,
    principal: Principal,
    Path(id): Path<i64>,
) -> Result<Json<CashCard>, ApiError> {
    let card = state.cards.find(id, &principal).await?;
    Ok(Json(card))
}

/// PUT /cashcards/:id - replace the amount; 204 on success
pub async fn put(
    State(state): State<AppState>,
    principal: Principal,
    Path(id): Path<i64>,
    payload: Result<Json<CashCardRequest>, JsonRejection>,
) -> Result<StatusCode, ApiError> {
    let Json(request) = payload?;
    state.cards.update(id, request, &principal).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /cashcards/:id - 204 on success
pub async fn delete(
    State(state): State<AppState>,
    principal: Principal,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    state.cards.delete(id, &principal).await?;
    Ok(StatusCode::NO_CONTENT)
}
