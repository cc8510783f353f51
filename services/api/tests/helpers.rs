//! Shared helpers for the end-to-end API tests.
//!
//! Each test gets its own server on an ephemeral port, backed by a fresh
//! temporary data directory. The credential store seeds its default accounts
//! into that directory, so tests log in as `parent`, `adrian` or `emma`.

use api_lib::adapters::{FileCredentialStore, FilePointsStore, MemorySessionStore};
use api_lib::config::Config;
use api_lib::web::{api_router, AppState};
use serde_json::json;
use std::sync::Arc;
use tempfile::TempDir;
use tokio::net::TcpListener;

/// A running test instance of the API server.
pub struct TestApp {
    pub address: String,
    /// A cookie-keeping client, so a login carries over to later requests.
    pub api_client: reqwest::Client,
    // Held so the data directory outlives the server.
    _data_dir: TempDir,
}

/// Starts the full application on an ephemeral port.
pub async fn spawn_app() -> TestApp {
    let data_dir = TempDir::new().expect("Failed to create a temp data dir");

    let config = Arc::new(Config {
        bind_address: "127.0.0.1:0".parse().unwrap(),
        data_dir: data_dir.path().to_path_buf(),
        log_level: tracing::Level::WARN,
        session_ttl_secs: 3600,
        cors_origin: "http://localhost:5173".parse().unwrap(),
    });

    let credentials = Arc::new(
        FileCredentialStore::load(data_dir.path())
            .await
            .expect("Failed to seed the credential store"),
    );
    let points = Arc::new(FilePointsStore::new(data_dir.path()));
    let sessions = Arc::new(MemorySessionStore::new(config.session_ttl_secs));

    let state = Arc::new(AppState {
        credentials,
        points,
        sessions,
        config,
    });
    let app = api_router(state);

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    let api_client = reqwest::Client::builder()
        .cookie_store(true)
        .build()
        .unwrap();

    TestApp {
        address: format!("http://127.0.0.1:{}", addr.port()),
        api_client,
        _data_dir: data_dir,
    }
}

impl TestApp {
    /// Logs in with the given credentials.
    pub async fn post_login(&self, username: &str, password: &str) -> reqwest::Response {
        self.api_client
            .post(format!("{}/api/login", self.address))
            .json(&json!({ "username": username, "password": password }))
            .send()
            .await
            .expect("Failed to execute request.")
    }

    /// Logs in and asserts it worked, for tests that only need the session.
    pub async fn login_as(&self, username: &str, password: &str) {
        let response = self.post_login(username, password).await;
        assert_eq!(response.status().as_u16(), 200, "login as {} failed", username);
    }

    /// Sends a raw (possibly malformed) login body with a JSON content type.
    pub async fn post_login_raw(&self, body: &'static str) -> reqwest::Response {
        self.api_client
            .post(format!("{}/api/login", self.address))
            .header("Content-Type", "application/json")
            .body(body)
            .send()
            .await
            .expect("Failed to execute request.")
    }

    pub async fn post_logout(&self) -> reqwest::Response {
        self.api_client
            .post(format!("{}/api/logout", self.address))
            .send()
            .await
            .expect("Failed to execute request.")
    }

    pub async fn get_session(&self) -> reqwest::Response {
        self.api_client
            .get(format!("{}/api/session", self.address))
            .send()
            .await
            .expect("Failed to execute request.")
    }

    pub async fn get_points(&self) -> reqwest::Response {
        self.api_client
            .get(format!("{}/api/points", self.address))
            .send()
            .await
            .expect("Failed to execute request.")
    }

    pub async fn post_points(&self, body: &serde_json::Value) -> reqwest::Response {
        self.api_client
            .post(format!("{}/api/points", self.address))
            .json(body)
            .send()
            .await
            .expect("Failed to execute request.")
    }

    pub async fn post_reset(&self) -> reqwest::Response {
        self.api_client
            .post(format!("{}/api/points/reset", self.address))
            .send()
            .await
            .expect("Failed to execute request.")
    }

    pub async fn get_health(&self) -> reqwest::Response {
        self.api_client
            .get(format!("{}/api/health", self.address))
            .send()
            .await
            .expect("Failed to execute request.")
    }
}

/// A full points record in wire form, with distinct values in every field so
/// mix-ups between fields show up in assertions.
pub fn sample_points() -> serde_json::Value {
    json!({
        "adrian": [1, 2, 3],
        "emma": [5],
        "goals": { "adrian": 50.0, "emma": 20.0 },
        "savings": { "adrian": 12.5, "emma": 0.0 }
    })
}
