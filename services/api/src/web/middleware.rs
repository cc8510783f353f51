//! services/api/src/web/middleware.rs
//!
//! Authentication and authorization middleware for protecting routes.

use axum::{
    extract::{Request, State},
    http::{header, HeaderMap, StatusCode},
    middleware::Next,
    response::Response,
    Json,
};
use points_tracker_core::domain::UserIdentity;
use std::sync::Arc;
use tracing::{error, warn};

use crate::web::state::AppState;
use crate::web::MessageResponse;

/// Pulls the session token out of the `Cookie` header, if one is present.
///
/// Shared with the logout handler, which also needs the raw token but must
/// not fail when it is absent.
pub(crate) fn extract_session_token(headers: &HeaderMap) -> Option<String> {
    let cookie_header = headers.get(header::COOKIE)?.to_str().ok()?;
    cookie_header
        .split(';')
        .find_map(|c| c.trim().strip_prefix("session="))
        .map(|token| token.to_string())
}

/// Middleware that validates the session cookie and extracts the identity.
///
/// If valid, inserts the `UserIdentity` into request extensions for handlers
/// (and `require_admin`) to use. If invalid or missing, returns 401.
pub async fn require_auth(
    State(state): State<Arc<AppState>>,
    mut req: Request,
    next: Next,
) -> Result<Response, (StatusCode, Json<MessageResponse>)> {
    let unauthorized = || {
        (
            StatusCode::UNAUTHORIZED,
            Json(MessageResponse::new("Authentication required")),
        )
    };

    // 1. Extract the session token from the cookie header
    let token = extract_session_token(req.headers()).ok_or_else(unauthorized)?;

    // 2. Resolve the token against the session store
    let identity = state
        .sessions
        .resolve_session(&token)
        .await
        .map_err(|e| {
            error!("Failed to resolve session: {:?}", e);
            unauthorized()
        })?
        .ok_or_else(unauthorized)?;

    // 3. Insert the identity into request extensions
    req.extensions_mut().insert(identity);

    // 4. Continue to the handler
    Ok(next.run(req).await)
}

/// Middleware that rejects non-admin identities with 403.
///
/// Must be layered inside `require_auth`, which puts the `UserIdentity` into
/// the request extensions. A request that reaches this point without one is
/// a routing mistake and is rejected outright.
pub async fn require_admin(
    req: Request,
    next: Next,
) -> Result<Response, (StatusCode, Json<MessageResponse>)> {
    let identity = req.extensions().get::<UserIdentity>().ok_or((
        StatusCode::UNAUTHORIZED,
        Json(MessageResponse::new("Authentication required")),
    ))?;

    if !identity.is_admin() {
        warn!(username = %identity.username, "Rejected non-admin mutation attempt");
        return Err((
            StatusCode::FORBIDDEN,
            Json(MessageResponse::new("Admin access required")),
        ));
    }

    Ok(next.run(req).await)
}
