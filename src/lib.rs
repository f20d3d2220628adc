pub mod auth;
pub mod cli;
pub mod config;
pub mod database;
pub mod error;
pub mod filter;
pub mod handlers;
pub mod middleware;
pub mod services;

use axum::{
    extract::DefaultBodyLimit,
    http::HeaderValue,
    routing::get,
    Router,
};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::auth::{AuthError, CredentialGate};
use crate::config::AppConfig;
use crate::database::CashCardRepository;
use crate::filter::PagingDefaults;
use crate::services::CashCardService;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub cards: CashCardService,
    pub gate: Arc<CredentialGate>,
    pub paging: PagingDefaults,
}

impl AppState {
    /// Fails only if a configured password cannot be hashed
    pub fn new(config: &AppConfig, repository: Arc<dyn CashCardRepository>) -> Result<Self, AuthError> {
        Ok(Self {
            cards: CashCardService::new(repository),
            gate: Arc::new(CredentialGate::from_config(&config.security)?),
            paging: PagingDefaults {
                default_size: config.api.default_page_size,
                max_size: config.api.max_page_size,
            },
        })
    }
}

/// Build the full router: public routes plus the Basic-authenticated /cashcards routes
pub fn app(config: &AppConfig, state: AppState) -> Router {
    let router = Router::new()
        // Public
        .route("/health", get(handlers::public::health))
        // Protected
        .merge(cashcard_routes(state.clone()))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(DefaultBodyLimit::max(config.api.max_request_size_bytes)),
        );

    let router = match cors_layer(config) {
        Some(cors) => router.layer(cors),
        None => router,
    };

    router.with_state(state)
}

fn cashcard_routes(state: AppState) -> Router<AppState> {
    use handlers::protected::cashcards;

    Router::new()
        .route(
            "/cashcards",
            get(cashcards::cashcards_list).post(cashcards::cashcards_post),
        )
        .route(
            "/cashcards/:id",
            get(cashcards::cashcard_get)
                .put(cashcards::cashcard_put)
                .delete(cashcards::cashcard_delete),
        )
        .route_layer(axum::middleware::from_fn_with_state(
            state,
            middleware::basic_auth_middleware,
        ))
}

fn cors_layer(config: &AppConfig) -> Option<CorsLayer> {
    if !config.security.enable_cors {
        return None;
    }
    if config.security.cors_origins.is_empty() {
        return Some(CorsLayer::permissive());
    }

    let origins: Vec<HeaderValue> = config
        .security
        .cors_origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();

    Some(
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods(tower_http::cors::Any)
            .allow_headers(tower_http::cors::Any),
    )
}
