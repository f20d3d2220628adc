use axum::{
    extract::{rejection::JsonRejection, Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};

use crate::auth::Principal;
use crate::database::models::{CashCard, CashCardRequest};
use crate::error::ApiError;
use crate::filter::PageRequest;
use crate::AppState;

use super::cashcard_path;

/// GET /cashcards?page=&size=&sort= - one page of the caller's cards.
/// Only the page content is returned, without totals.
pub async fn list(
    State(state): State<AppState>,
    principal: Principal,
    Query(params): Query<Vec<(String, String)>>,
) -> Result<Json<Vec<CashCard>>, ApiError> {
    let page = PageRequest::from_query_pairs(&params, &state.paging)?;
    let cards = state.cards.list(&page, &principal).await?;
    Ok(Json(cards))
}

/// POST /cashcards - create a card owned by the caller
pub async fn post(
    State(state): State<AppState>,
    principal: Principal,
    payload: Result<Json<CashCardRequest>, JsonRejection>,
) -> Result<Response, ApiError> {
    let Json(request) = payload?;
    let saved = state.cards.create(request, &principal).await?;

    let id = saved
        .id
        .ok_or_else(|| ApiError::internal_server_error("Store did not assign an id"))?;

    Ok((StatusCode::CREATED, [(header::LOCATION, cashcard_path(id))]).into_response())
}
