use async_trait::async_trait;
use axum::{
    extract::{FromRequestParts, Request, State},
    http::{header::AUTHORIZATION, request::Parts},
    middleware::Next,
    response::Response,
};

use crate::auth::{AuthError, Principal};
use crate::error::ApiError;
use crate::AppState;

/// Basic authentication middleware for /cashcards.
///
/// Rejects missing or wrong credentials with 401 and callers lacking the required role
/// with 403, before any handler runs. On success the `Principal` is stored in the request
/// extensions for handlers to extract.
pub async fn basic_auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let authorization = request
        .headers()
        .get(AUTHORIZATION)
        .map(|value| value.to_str().map(str::to_string).map_err(|_| AuthError::MalformedHeader))
        .transpose()?;

    // Argon2 verification is CPU-bound, keep it off the async workers
    let gate = state.gate.clone();
    let admitted = tokio::task::spawn_blocking(move || gate.admit(authorization.as_deref()))
        .await
        .map_err(|e| {
            tracing::error!("Credential check task failed: {}", e);
            ApiError::internal_server_error("An error occurred while processing your request")
        })?;

    let principal = admitted.map_err(|e| {
        tracing::warn!("Rejected {} {}: {}", request.method(), request.uri().path(), e);
        e
    })?;

    request.extensions_mut().insert(principal);
    Ok(next.run(request).await)
}

#[async_trait]
impl<S> FromRequestParts<S> for Principal
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Principal>()
            .cloned()
            .ok_or_else(|| ApiError::unauthorized("Authentication required"))
    }
}
