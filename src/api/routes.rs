//! Router configuration for the API.
//!
//! This module provides centralized route registration and middleware
//! configuration for the application.

use axum::{
    Router,
    http::{HeaderName, Method, header},
    middleware,
};
use tower_http::cors::{Any, CorsLayer};

use crate::api::handlers;
use crate::api::middleware::{ensure_connected, logging_middleware, request_id_middleware};
use crate::state::AppState;

/// Permissive CORS policy: any origin, the CRUD verbs, the usual headers.
pub fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            Method::GET,
            Method::HEAD,
            Method::OPTIONS,
            Method::POST,
            Method::PUT,
            Method::DELETE,
        ])
        .allow_headers([
            header::ORIGIN,
            HeaderName::from_static("x-requested-with"),
            header::CONTENT_TYPE,
            header::ACCEPT,
            header::AUTHORIZATION,
            header::ACCESS_CONTROL_REQUEST_METHOD,
            header::ACCESS_CONTROL_REQUEST_HEADERS,
        ])
}

/// Creates the main application router with all routes and middleware.
///
/// # Middleware Order
/// Middleware is applied in reverse order of declaration (last added runs first):
/// 1. Request ID - generates/propagates request IDs
/// 2. Logging - one span per request, tagged with the request ID
/// 3. CORS - answers preflight requests before the store is touched
/// 4. Store bootstrap - connects the user store on first use, 503 on failure;
///    matched routes only, so unknown paths 404 without connecting
///
/// # Routes
/// - `/users` - User CRUD operations
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .nest("/users", handlers::users::user_routes())
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            ensure_connected,
        ))
        .layer(cors_layer())
        .layer(middleware::from_fn(logging_middleware))
        .layer(middleware::from_fn(request_id_middleware))
        .with_state(state)
}
