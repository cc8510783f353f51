pub mod auth;
pub mod health;
pub mod middleware;
pub mod points;
pub mod state;

// Re-export the shared state to make it easily accessible to the binary
// and the integration tests.
pub use state::AppState;

use axum::{
    http::header::{ACCEPT, CONTENT_TYPE},
    http::Method,
    middleware as axum_middleware,
    routing::{get, post},
    Router,
};
use serde::Serialize;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use utoipa::{OpenApi, ToSchema};

//=========================================================================================
// OpenAPI Master Definition
//=========================================================================================

#[derive(OpenApi)]
#[openapi(
    paths(
        auth::login_handler,
        auth::logout_handler,
        auth::session_handler,
        points::get_points_handler,
        points::update_points_handler,
        points::reset_points_handler,
        health::health_handler,
    ),
    components(
        schemas(
            auth::LoginRequest,
            auth::SessionResponse,
            points::PointsPayload,
            points::MoneyPayload,
            health::HealthResponse,
            MessageResponse
        )
    ),
    tags(
        (name = "Points Tracker API", description = "API endpoints for the household points tracker.")
    )
)]
pub struct ApiDoc;

//=========================================================================================
// Shared Response Types
//=========================================================================================

/// A bare human-readable message: the logout confirmation and every error
/// response body use this shape.
#[derive(Serialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

//=========================================================================================
// Router Assembly
//=========================================================================================

/// Builds the full API router. The binary serves exactly this (plus the
/// Swagger UI); the integration tests serve it on an ephemeral port.
pub fn api_router(state: Arc<AppState>) -> Router {
    // CORS for the browser frontend, which is served from a different origin
    // during development. Credentials must be allowed or the browser drops
    // the session cookie.
    let cors = CorsLayer::new()
        .allow_origin(state.config.cors_origin.clone())
        .allow_credentials(true)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([CONTENT_TYPE, ACCEPT]);

    // Public routes (no auth required)
    let public_routes = Router::new()
        .route("/api/login", post(auth::login_handler))
        .route("/api/logout", post(auth::logout_handler))
        .route("/api/session", get(auth::session_handler))
        .route("/api/health", get(health::health_handler));

    // Routes for any logged-in user
    let authed_routes = Router::new()
        .route("/api/points", get(points::get_points_handler))
        .layer(axum_middleware::from_fn_with_state(
            state.clone(),
            middleware::require_auth,
        ));

    // Admin-only mutations. The layer added last runs first, so
    // `require_auth` resolves the identity before `require_admin` checks it.
    let admin_routes = Router::new()
        .route("/api/points", post(points::update_points_handler))
        .route("/api/points/reset", post(points::reset_points_handler))
        .layer(axum_middleware::from_fn(middleware::require_admin))
        .layer(axum_middleware::from_fn_with_state(
            state.clone(),
            middleware::require_auth,
        ));

    Router::new()
        .merge(public_routes)
        .merge(authed_routes)
        .merge(admin_routes)
        .layer(cors)
        .with_state(state)
}
