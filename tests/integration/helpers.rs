//! Shared test helpers for integration tests.

#![allow(dead_code)]

use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::extract::ConnectInfo;
use axum::http::{Request, StatusCode};
use chrono::{Duration, Utc};
use serde_json::Value;
use tower::ServiceExt;

use ipgate_api::{AppState, build_router};
use ipgate_auth::{
    LoginGate, MemorySessionStore, MemorySettingsStore, MemoryUserDirectory, PasswordHasher,
    SettingsService,
};
use ipgate_core::config::AppConfig;
use ipgate_core::types::{GateSettings, SessionId, SessionRecord, UserId, UserRecord};

/// Minimal configuration; everything but the database URL is defaulted.
pub const BASE_CONFIG: &str = r#"
[database]
url = "postgres://ipgate@localhost/ipgate_test"
"#;

/// Test application context backed by in-memory collaborators
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
    /// User accounts
    pub users: MemoryUserDirectory,
    /// Live sessions
    pub sessions: MemorySessionStore,
    /// Raw settings storage, bypassing validation
    pub settings_store: MemorySettingsStore,
    /// Settings front door shared with the router
    pub settings: SettingsService,
    /// Application config
    pub config: AppConfig,
}

/// Response captured from the router
pub struct TestResponse {
    /// HTTP status
    pub status: StatusCode,
    /// Raw body text
    pub body: String,
}

impl TestResponse {
    /// Parse the body as JSON
    pub fn json(&self) -> Value {
        serde_json::from_str(&self.body).expect("response body is not JSON")
    }
}

impl TestApp {
    /// Create a test application with the default configuration
    pub fn new(settings: GateSettings) -> Self {
        Self::with_config(settings, "")
    }

    /// Create a test application with extra TOML appended to the base config
    pub fn with_config(settings: GateSettings, extra_toml: &str) -> Self {
        let config = AppConfig::from_toml_str(&format!("{BASE_CONFIG}\n{extra_toml}"))
            .expect("Failed to parse test config");

        let users = MemoryUserDirectory::new();
        let sessions = MemorySessionStore::new();
        let settings_store = MemorySettingsStore::new(settings);
        let settings = SettingsService::new(Arc::new(settings_store.clone()), &config.gate);
        let login_gate = LoginGate::new(
            Arc::new(users.clone()),
            Arc::new(PasswordHasher::new()),
            &config.gate,
        );

        let router = build_router(AppState::new(
            config.clone(),
            settings.clone(),
            login_gate,
        ));

        Self {
            router,
            users,
            sessions,
            settings_store,
            settings,
            config,
        }
    }

    /// Create a user with an Argon2 hash of `password`
    pub async fn create_user(&self, username: &str, password: &str) -> UserId {
        let hash = PasswordHasher::new()
            .hash_password(password)
            .expect("Failed to hash password");
        let id = UserId::new();
        self.users
            .insert(UserRecord {
                id,
                username: username.to_string(),
                password_hash: hash,
            })
            .await;
        id
    }

    /// Record a session last active `minutes_ago` from `ip`
    pub async fn create_session(&self, user_id: UserId, ip: &str, minutes_ago: i64) -> SessionId {
        let id = SessionId::new();
        self.sessions
            .insert(SessionRecord {
                id,
                user_id,
                ip_address: ip.to_string(),
                last_activity: Utc::now() - Duration::minutes(minutes_ago),
            })
            .await;
        id
    }

    /// Send a request as if it came from `peer`
    pub async fn request(
        &self,
        method: &str,
        uri: &str,
        body: Option<Value>,
        peer: &str,
        headers: &[(&str, &str)],
    ) -> TestResponse {
        let peer: IpAddr = peer.parse().expect("peer address");
        let mut builder = Request::builder()
            .method(method)
            .uri(uri)
            .extension(ConnectInfo(SocketAddr::new(peer, 50000)));
        for (name, value) in headers {
            builder = builder.header(*name, *value);
        }

        let request = match body {
            Some(json) => builder
                .header("content-type", "application/json")
                .body(Body::from(json.to_string())),
            None => builder.body(Body::empty()),
        }
        .expect("Failed to build request");

        self.send(request).await
    }

    /// POST a URL-encoded form body from `peer`, as a browser would
    pub async fn post_form(&self, uri: &str, form: &str, peer: &str) -> TestResponse {
        let peer: IpAddr = peer.parse().expect("peer address");
        let request = Request::builder()
            .method("POST")
            .uri(uri)
            .extension(ConnectInfo(SocketAddr::new(peer, 50000)))
            .header("content-type", "application/x-www-form-urlencoded")
            .body(Body::from(form.to_string()))
            .expect("Failed to build request");

        self.send(request).await
    }

    async fn send(&self, request: Request<Body>) -> TestResponse {
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Router failed");

        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("Failed to read body");

        TestResponse {
            status,
            body: String::from_utf8_lossy(&bytes).into_owned(),
        }
    }

    /// POST a login from `peer`
    pub async fn login(&self, username: &str, password: &str, peer: &str) -> TestResponse {
        let body = serde_json::json!({
            "username": username,
            "password": password,
        });
        self.request("POST", "/api/auth/login", Some(body), peer, &[])
            .await
    }
}

/// Settings with enforcement on and the given list and template
pub fn enforcing(valid_ips: &str, error_text: &str) -> GateSettings {
    GateSettings {
        valid_ips: valid_ips.to_string(),
        check_before_login: true,
        error_text: error_text.to_string(),
    }
}
