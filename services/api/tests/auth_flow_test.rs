//! End-to-end tests for login, logout and the session probe.

mod helpers;

use helpers::spawn_app;

#[tokio::test]
async fn health_check_works() {
    let app = spawn_app().await;

    let response = app.get_health().await;
    assert_eq!(response.status().as_u16(), 200);

    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["status"], "healthy");
    assert!(body["timestamp"].is_string());
}

#[tokio::test]
async fn login_sets_a_session_cookie_and_reports_the_identity() {
    let app = spawn_app().await;

    let response = app.post_login("parent", "parent123").await;
    assert_eq!(response.status().as_u16(), 200);

    let cookie = response
        .headers()
        .get("set-cookie")
        .expect("login response carried no Set-Cookie header")
        .to_str()
        .unwrap()
        .to_string();
    assert!(cookie.starts_with("session="));
    assert!(cookie.contains("HttpOnly"));
    assert!(cookie.contains("SameSite=Lax"));
    assert!(cookie.contains("Path=/"));
    assert!(cookie.contains("Max-Age=3600"));

    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["authenticated"], true);
    assert_eq!(body["username"], "parent");
    assert_eq!(body["role"], "admin");
    // An admin has no child scope, and the field is omitted entirely.
    assert!(body.get("childView").is_none());
}

#[tokio::test]
async fn viewer_login_reports_its_child_scope() {
    let app = spawn_app().await;

    let response = app.post_login("adrian", "adrian123").await;
    assert_eq!(response.status().as_u16(), 200);

    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["role"], "viewer");
    assert_eq!(body["childView"], "adrian");
}

#[tokio::test]
async fn wrong_password_is_unauthorized_and_creates_no_session() {
    let app = spawn_app().await;

    let response = app.post_login("parent", "wrong").await;
    assert_eq!(response.status().as_u16(), 401);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["message"], "Invalid username or password");

    // An unknown username gets the same answer as a wrong password.
    let response = app.post_login("stranger", "parent123").await;
    assert_eq!(response.status().as_u16(), 401);

    // No session came out of either attempt.
    let session: serde_json::Value = app.get_session().await.json().await.unwrap();
    assert_eq!(session["authenticated"], false);
}

#[tokio::test]
async fn malformed_login_bodies_are_bad_requests() {
    let app = spawn_app().await;

    // Not JSON at all.
    let response = app.post_login_raw("{ this is not json").await;
    assert_eq!(response.status().as_u16(), 400);
    let body: serde_json::Value = response.json().await.unwrap();
    assert!(body["message"].is_string());

    // Valid JSON, but missing the password field.
    let response = app.post_login_raw(r#"{ "username": "parent" }"#).await;
    assert_eq!(response.status().as_u16(), 400);

    let session: serde_json::Value = app.get_session().await.json().await.unwrap();
    assert_eq!(session["authenticated"], false);
}

#[tokio::test]
async fn session_probe_tracks_login_and_logout() {
    let app = spawn_app().await;

    // Fresh client: anonymous, but still a 200.
    let response = app.get_session().await;
    assert_eq!(response.status().as_u16(), 200);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["authenticated"], false);
    assert!(body.get("username").is_none());

    app.login_as("emma", "emma123").await;
    let body: serde_json::Value = app.get_session().await.json().await.unwrap();
    assert_eq!(body["authenticated"], true);
    assert_eq!(body["username"], "emma");
    assert_eq!(body["childView"], "emma");

    let response = app.post_logout().await;
    assert_eq!(response.status().as_u16(), 200);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["message"], "Logged out");

    let body: serde_json::Value = app.get_session().await.json().await.unwrap();
    assert_eq!(body["authenticated"], false);
}

#[tokio::test]
async fn logout_without_a_session_still_succeeds() {
    let app = spawn_app().await;

    let response = app.post_logout().await;
    assert_eq!(response.status().as_u16(), 200);

    // The clearing cookie is set even when there was nothing to clear.
    let cookie = response
        .headers()
        .get("set-cookie")
        .expect("logout response carried no Set-Cookie header")
        .to_str()
        .unwrap();
    assert!(cookie.contains("Max-Age=0"));
}
