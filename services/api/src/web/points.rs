//! services/api/src/web/points.rs
//!
//! Contains the Axum handlers for the points REST endpoints. Reads are
//! filtered to the caller's visibility; writes are whole-record replacements
//! and are admin-only (enforced by the middleware in front of these routes).

use axum::{
    extract::rejection::JsonRejection,
    extract::{Extension, State},
    http::StatusCode,
    Json,
};
use points_tracker_core::domain::{MoneyByChild, PointsRecord, UserIdentity};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::error;
use utoipa::ToSchema;

use crate::web::state::AppState;
use crate::web::MessageResponse;

//=========================================================================================
// API Response and Payload Structs
//=========================================================================================

/// The wire form of the points record, used for both requests and responses.
#[derive(Serialize, Deserialize, ToSchema)]
pub struct PointsPayload {
    pub adrian: Vec<u32>,
    pub emma: Vec<u32>,
    pub goals: MoneyPayload,
    pub savings: MoneyPayload,
}

#[derive(Serialize, Deserialize, ToSchema)]
pub struct MoneyPayload {
    pub adrian: f64,
    pub emma: f64,
}

impl PointsPayload {
    fn to_domain(self) -> PointsRecord {
        PointsRecord {
            adrian: self.adrian,
            emma: self.emma,
            goals: MoneyByChild {
                adrian: self.goals.adrian,
                emma: self.goals.emma,
            },
            savings: MoneyByChild {
                adrian: self.savings.adrian,
                emma: self.savings.emma,
            },
        }
    }

    fn from_domain(record: &PointsRecord) -> Self {
        Self {
            adrian: record.adrian.clone(),
            emma: record.emma.clone(),
            goals: MoneyPayload {
                adrian: record.goals.adrian,
                emma: record.goals.emma,
            },
            savings: MoneyPayload {
                adrian: record.savings.adrian,
                emma: record.savings.emma,
            },
        }
    }
}

//=========================================================================================
// REST API Handlers
//=========================================================================================

/// GET /api/points - The points record, filtered to the caller's visibility
#[utoipa::path(
    get,
    path = "/api/points",
    responses(
        (status = 200, description = "The visible portion of the points record", body = PointsPayload),
        (status = 401, description = "Not logged in", body = MessageResponse),
        (status = 500, description = "Internal server error", body = MessageResponse)
    )
)]
pub async fn get_points_handler(
    State(state): State<Arc<AppState>>,
    Extension(identity): Extension<UserIdentity>,
) -> Result<Json<PointsPayload>, (StatusCode, Json<MessageResponse>)> {
    let record = state.points.get_points().await.map_err(|e| {
        error!("Failed to get points: {:?}", e);
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(MessageResponse::new("Failed to get points")),
        )
    })?;

    let visible = record.restricted_to(identity.visibility());
    Ok(Json(PointsPayload::from_domain(&visible)))
}

/// POST /api/points - Replace the stored record wholesale (admin only)
#[utoipa::path(
    post,
    path = "/api/points",
    request_body = PointsPayload,
    responses(
        (status = 200, description = "The record as stored", body = PointsPayload),
        (status = 400, description = "Malformed request body", body = MessageResponse),
        (status = 401, description = "Not logged in", body = MessageResponse),
        (status = 403, description = "Caller is not an admin", body = MessageResponse),
        (status = 500, description = "Internal server error", body = MessageResponse)
    )
)]
pub async fn update_points_handler(
    State(state): State<Arc<AppState>>,
    body: Result<Json<PointsPayload>, JsonRejection>,
) -> Result<Json<PointsPayload>, (StatusCode, Json<MessageResponse>)> {
    // 1. Reject bodies that are not JSON of the right shape
    let Json(payload) = body.map_err(|rejection| {
        (
            StatusCode::BAD_REQUEST,
            Json(MessageResponse::new(rejection.body_text())),
        )
    })?;

    // 2. Store the record wholesale; last write wins
    let stored = state
        .points
        .replace_points(payload.to_domain())
        .await
        .map_err(|e| {
            error!("Failed to update points: {:?}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(MessageResponse::new("Failed to update points")),
            )
        })?;

    Ok(Json(PointsPayload::from_domain(&stored)))
}

/// POST /api/points/reset - Clear both children's points, keep the money fields (admin only)
#[utoipa::path(
    post,
    path = "/api/points/reset",
    responses(
        (status = 200, description = "The cleared record", body = PointsPayload),
        (status = 401, description = "Not logged in", body = MessageResponse),
        (status = 403, description = "Caller is not an admin", body = MessageResponse),
        (status = 500, description = "Internal server error", body = MessageResponse)
    )
)]
pub async fn reset_points_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<PointsPayload>, (StatusCode, Json<MessageResponse>)> {
    let record = state.points.reset_points().await.map_err(|e| {
        error!("Failed to reset points: {:?}", e);
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(MessageResponse::new("Failed to reset points")),
        )
    })?;

    Ok(Json(PointsPayload::from_domain(&record)))
}
