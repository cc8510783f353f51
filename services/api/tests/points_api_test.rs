//! End-to-end tests for the points endpoints: visibility filtering, the
//! admin-only mutations, and the reset semantics.

mod helpers;

use helpers::{sample_points, spawn_app};
use serde_json::json;

#[tokio::test]
async fn points_endpoints_reject_anonymous_callers() {
    let app = spawn_app().await;

    let response = app.get_points().await;
    assert_eq!(response.status().as_u16(), 401);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["message"], "Authentication required");

    let response = app.post_points(&sample_points()).await;
    assert_eq!(response.status().as_u16(), 401);

    let response = app.post_reset().await;
    assert_eq!(response.status().as_u16(), 401);
}

#[tokio::test]
async fn admin_round_trips_the_full_record() {
    let app = spawn_app().await;
    app.login_as("parent", "parent123").await;

    // A fresh store serves the empty default.
    let body: serde_json::Value = app.get_points().await.json().await.unwrap();
    assert_eq!(body["adrian"], json!([]));
    assert_eq!(body["emma"], json!([]));
    assert_eq!(body["goals"]["adrian"], 0.0);

    let response = app.post_points(&sample_points()).await;
    assert_eq!(response.status().as_u16(), 200);
    let stored: serde_json::Value = response.json().await.unwrap();
    assert_eq!(stored, sample_points());

    // Admins read back exactly what they stored.
    let body: serde_json::Value = app.get_points().await.json().await.unwrap();
    assert_eq!(body, sample_points());
}

#[tokio::test]
async fn replacing_the_record_is_idempotent() {
    let app = spawn_app().await;
    app.login_as("parent", "parent123").await;

    let first: serde_json::Value = app.post_points(&sample_points()).await.json().await.unwrap();
    let second: serde_json::Value = app.post_points(&sample_points()).await.json().await.unwrap();
    assert_eq!(first, second);

    let body: serde_json::Value = app.get_points().await.json().await.unwrap();
    assert_eq!(body, sample_points());
}

#[tokio::test]
async fn viewers_see_only_their_own_child() {
    let app = spawn_app().await;

    app.login_as("parent", "parent123").await;
    app.post_points(&sample_points()).await;
    app.post_logout().await;

    // Adrian's viewer sees Adrian's points, Emma's sequence comes back empty.
    app.login_as("adrian", "adrian123").await;
    let body: serde_json::Value = app.get_points().await.json().await.unwrap();
    assert_eq!(body["adrian"], json!([1, 2, 3]));
    assert_eq!(body["emma"], json!([]));
    // The money fields are not filtered.
    assert_eq!(body["goals"]["emma"], 20.0);
    assert_eq!(body["savings"]["adrian"], 12.5);

    // And the other way around for Emma's viewer.
    app.login_as("emma", "emma123").await;
    let body: serde_json::Value = app.get_points().await.json().await.unwrap();
    assert_eq!(body["adrian"], json!([]));
    assert_eq!(body["emma"], json!([5]));
}

#[tokio::test]
async fn viewers_cannot_mutate_the_record() {
    let app = spawn_app().await;

    app.login_as("parent", "parent123").await;
    app.post_points(&sample_points()).await;

    app.login_as("adrian", "adrian123").await;

    let response = app.post_points(&json!({
        "adrian": [1, 2, 3, 4, 5],
        "emma": [],
        "goals": { "adrian": 0.0, "emma": 0.0 },
        "savings": { "adrian": 0.0, "emma": 0.0 }
    })).await;
    assert_eq!(response.status().as_u16(), 403);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["message"], "Admin access required");

    let response = app.post_reset().await;
    assert_eq!(response.status().as_u16(), 403);

    // The stored record is untouched by the rejected attempts.
    app.login_as("parent", "parent123").await;
    let body: serde_json::Value = app.get_points().await.json().await.unwrap();
    assert_eq!(body, sample_points());
}

#[tokio::test]
async fn reset_clears_points_but_keeps_goals_and_savings() {
    let app = spawn_app().await;
    app.login_as("parent", "parent123").await;
    app.post_points(&sample_points()).await;

    let response = app.post_reset().await;
    assert_eq!(response.status().as_u16(), 200);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["adrian"], json!([]));
    assert_eq!(body["emma"], json!([]));
    assert_eq!(body["goals"]["adrian"], 50.0);
    assert_eq!(body["goals"]["emma"], 20.0);
    assert_eq!(body["savings"]["adrian"], 12.5);

    // The cleared state is what was persisted.
    let body: serde_json::Value = app.get_points().await.json().await.unwrap();
    assert_eq!(body["adrian"], json!([]));
    assert_eq!(body["goals"]["adrian"], 50.0);
}

#[tokio::test]
async fn malformed_points_bodies_are_bad_requests() {
    let app = spawn_app().await;
    app.login_as("parent", "parent123").await;

    // Points must be numbers, not strings.
    let response = app.post_points(&json!({
        "adrian": ["one", "two"],
        "emma": [],
        "goals": { "adrian": 0.0, "emma": 0.0 },
        "savings": { "adrian": 0.0, "emma": 0.0 }
    })).await;
    assert_eq!(response.status().as_u16(), 400);

    // A missing field is also rejected.
    let response = app.post_points(&json!({ "adrian": [1] })).await;
    assert_eq!(response.status().as_u16(), 400);
}
