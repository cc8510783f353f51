//! services/api/src/web/auth.rs
//!
//! Authentication endpoints for login, logout, and the session probe the
//! frontend calls on page load.

use axum::{
    extract::rejection::JsonRejection,
    extract::State,
    http::{header, HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};
use points_tracker_core::domain::UserIdentity;
use points_tracker_core::ports::PortError;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::error;
use utoipa::ToSchema;

use crate::web::middleware::extract_session_token;
use crate::web::state::AppState;
use crate::web::MessageResponse;

//=========================================================================================
// Request/Response Types
//=========================================================================================

#[derive(Deserialize, ToSchema)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Describes the caller's session. Returned by both login and the session
/// probe; `authenticated: false` comes with none of the identity fields.
#[derive(Serialize, ToSchema)]
pub struct SessionResponse {
    pub authenticated: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(rename = "childView", skip_serializing_if = "Option::is_none")]
    pub child_view: Option<String>,
}

impl SessionResponse {
    fn for_identity(identity: &UserIdentity) -> Self {
        Self {
            authenticated: true,
            username: Some(identity.username.clone()),
            role: Some(identity.role.as_str().to_string()),
            child_view: identity.child_view.map(|c| c.as_str().to_string()),
        }
    }

    fn anonymous() -> Self {
        Self {
            authenticated: false,
            username: None,
            role: None,
            child_view: None,
        }
    }
}

//=========================================================================================
// Handlers
//=========================================================================================

/// POST /api/login - Check credentials and establish a session
#[utoipa::path(
    post,
    path = "/api/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful, session cookie set", body = SessionResponse),
        (status = 400, description = "Malformed request body", body = MessageResponse),
        (status = 401, description = "Invalid credentials", body = MessageResponse),
        (status = 500, description = "Internal server error", body = MessageResponse)
    )
)]
pub async fn login_handler(
    State(state): State<Arc<AppState>>,
    body: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<impl IntoResponse, (StatusCode, Json<MessageResponse>)> {
    // 1. Reject bodies that are not JSON of the right shape
    let Json(req) = body.map_err(|rejection| {
        (
            StatusCode::BAD_REQUEST,
            Json(MessageResponse::new(rejection.body_text())),
        )
    })?;

    // 2. Check the credentials
    let user = state
        .credentials
        .authenticate(&req.username, &req.password)
        .await
        .map_err(|e| match e {
            PortError::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                Json(MessageResponse::new("Invalid username or password")),
            ),
            other => {
                error!("Failed to check credentials: {:?}", other);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(MessageResponse::new("Login failed")),
                )
            }
        })?;

    // 3. Establish the server-side session
    let identity = UserIdentity::from_user(&user);
    let token = state
        .sessions
        .create_session(identity.clone())
        .await
        .map_err(|e| {
            error!("Failed to create session: {:?}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(MessageResponse::new("Failed to create session")),
            )
        })?;

    // 4. Create the session cookie
    // No `Secure` attribute: the service is reachable over plain HTTP on the
    // household network, and a Secure cookie would never be sent back.
    let cookie = format!(
        "session={}; HttpOnly; SameSite=Lax; Path=/; Max-Age={}",
        token, state.config.session_ttl_secs
    );

    // 5. Return the session descriptor with the cookie
    Ok((
        StatusCode::OK,
        [(header::SET_COOKIE, cookie)],
        Json(SessionResponse::for_identity(&identity)),
    ))
}

/// POST /api/logout - Drop the session and clear the cookie
#[utoipa::path(
    post,
    path = "/api/logout",
    responses(
        (status = 200, description = "Logged out (also when no session existed)", body = MessageResponse),
        (status = 500, description = "Internal server error", body = MessageResponse)
    )
)]
pub async fn logout_handler(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, (StatusCode, Json<MessageResponse>)> {
    // 1. Drop the server-side session, if the request carried one.
    // Logging out without a session is still a success.
    if let Some(token) = extract_session_token(&headers) {
        state.sessions.destroy_session(&token).await.map_err(|e| {
            error!("Failed to destroy session: {:?}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(MessageResponse::new("Logout failed")),
            )
        })?;
    }

    // 2. Clear the cookie
    let cookie = "session=; HttpOnly; SameSite=Lax; Path=/; Max-Age=0";

    Ok((
        StatusCode::OK,
        [(header::SET_COOKIE, cookie.to_string())],
        Json(MessageResponse::new("Logged out")),
    ))
}

/// GET /api/session - Report whether the caller has a live session
#[utoipa::path(
    get,
    path = "/api/session",
    responses(
        (status = 200, description = "Session status (authenticated or not)", body = SessionResponse)
    )
)]
pub async fn session_handler(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Json<SessionResponse> {
    // Always 200: the body says whether the caller is logged in.
    let Some(token) = extract_session_token(&headers) else {
        return Json(SessionResponse::anonymous());
    };

    match state.sessions.resolve_session(&token).await {
        Ok(Some(identity)) => Json(SessionResponse::for_identity(&identity)),
        Ok(None) => Json(SessionResponse::anonymous()),
        Err(e) => {
            error!("Failed to resolve session: {:?}", e);
            Json(SessionResponse::anonymous())
        }
    }
}
