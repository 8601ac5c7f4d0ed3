//! Integration tests for the gated login flow.

mod helpers;

use axum::http::StatusCode;

use helpers::{TestApp, enforcing};
use ipgate_core::types::GateSettings;

const INVALID_LOGIN: &str = "Invalid login, please try again";

#[tokio::test]
async fn test_login_success_from_permitted_address() {
    let app = TestApp::new(enforcing("10.0.0.0/8", ""));
    let id = app.create_user("alice", "s3cret").await;

    let response = app.login("alice", "s3cret", "10.20.30.40").await;

    assert_eq!(response.status, StatusCode::OK);
    let body = response.json();
    assert_eq!(body["username"], "alice");
    assert_eq!(body["user_id"], id.to_string());
}

#[tokio::test]
async fn test_login_page_form_submission() {
    let app = TestApp::new(enforcing("10.0.0.0/8", ""));
    app.create_user("alice", "s3cret").await;

    let page = app.request("GET", "/login", None, "10.1.2.3", &[]).await;
    assert!(page.body.contains(r#"action="/api/auth/login""#));

    let response = app
        .post_form("/api/auth/login", "username=alice&password=s3cret", "10.1.2.3")
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.json()["username"], "alice");

    let wrong = app
        .post_form("/api/auth/login", "username=alice&password=nope", "10.1.2.3")
        .await;
    assert_eq!(wrong.status, StatusCode::UNAUTHORIZED);
    assert_eq!(wrong.json()["message"], INVALID_LOGIN);

    let blocked = app
        .post_form("/api/auth/login", "username=alice&password=s3cret", "8.8.8.8")
        .await;
    assert_eq!(blocked.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_denials_share_one_message() {
    let app = TestApp::new(GateSettings {
        valid_ips: "192.168.1.1-50".into(),
        ..GateSettings::default()
    });
    app.create_user("alice", "s3cret").await;

    let wrong_password = app.login("alice", "nope", "192.168.1.10").await;
    let unknown_user = app.login("mallory", "s3cret", "192.168.1.10").await;
    let wrong_address = app.login("alice", "s3cret", "192.168.1.51").await;

    for response in [wrong_password, unknown_user, wrong_address] {
        assert_eq!(response.status, StatusCode::UNAUTHORIZED);
        assert_eq!(response.json()["message"], INVALID_LOGIN);
    }
}

#[tokio::test]
async fn test_credential_check_applies_with_gate_disabled() {
    let app = TestApp::new(GateSettings {
        valid_ips: "10.0.0.0/8".into(),
        ..GateSettings::default()
    });
    app.create_user("alice", "s3cret").await;

    let page = app.request("GET", "/login", None, "8.8.8.8", &[]).await;
    assert_eq!(page.status, StatusCode::OK);
    assert!(page.body.contains("<form"));

    let response = app.login("alice", "s3cret", "8.8.8.8").await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_gate_blocks_login_page_with_rendered_template() {
    let app = TestApp::new(enforcing(
        "111.112.0.0/12\n96.0.0.0/6",
        "Your IP [[your_ip]] is not in: [[valid_ips]]",
    ));

    let blocked = app.request("GET", "/login", None, "192.168.0.200", &[]).await;
    assert_eq!(blocked.status, StatusCode::FORBIDDEN);
    assert_eq!(
        blocked.body,
        "Your IP 192.168.0.200 is not in: 111.112.0.0/12\n96.0.0.0/6"
    );

    let allowed = app.request("GET", "/login", None, "99.255.255.254", &[]).await;
    assert_eq!(allowed.status, StatusCode::OK);
}

#[tokio::test]
async fn test_gate_blocks_login_post_before_credentials() {
    let app = TestApp::new(enforcing("10.0.0.0/8", "Go away"));
    app.create_user("alice", "s3cret").await;

    let response = app.login("alice", "s3cret", "8.8.8.8").await;

    assert_eq!(response.status, StatusCode::FORBIDDEN);
    assert_eq!(response.body, "Go away");
}

#[tokio::test]
async fn test_blank_template_uses_configured_default() {
    let app = TestApp::with_config(
        enforcing("10.0.0.0/8", "   "),
        "[gate]\ndefault_error_text = \"Blocked [[your_ip]]\"\n",
    );

    let response = app.request("GET", "/login", None, "8.8.4.4", &[]).await;

    assert_eq!(response.status, StatusCode::FORBIDDEN);
    assert_eq!(response.body, "Blocked 8.8.4.4");
}

#[tokio::test]
async fn test_empty_list_with_gate_enabled_rejects_everyone() {
    let app = TestApp::new(enforcing("", "No"));

    for peer in ["10.0.0.1", "127.0.0.1", "192.168.1.1"] {
        let response = app.request("GET", "/login", None, peer, &[]).await;
        assert_eq!(response.status, StatusCode::FORBIDDEN, "{peer}");
    }
}

#[tokio::test]
async fn test_health_is_never_gated() {
    let app = TestApp::new(enforcing("", "No"));

    let response = app.request("GET", "/health", None, "8.8.8.8", &[]).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.json()["status"], "ok");
}

#[tokio::test]
async fn test_forwarded_for_only_when_trusted() {
    let settings = enforcing("10.0.0.0/8", "No");
    let forwarded = [("x-forwarded-for", "172.16.0.1, 10.1.1.1")];

    let untrusted = TestApp::new(settings.clone());
    let response = untrusted
        .request("GET", "/login", None, "203.0.113.5", &forwarded)
        .await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);

    let trusted = TestApp::with_config(settings, "[gate]\ntrust_forwarded_for = true\n");
    let response = trusted
        .request("GET", "/login", None, "203.0.113.5", &forwarded)
        .await;
    assert_eq!(response.status, StatusCode::OK);
}

#[tokio::test]
async fn test_client_cannot_prepend_allowed_forwarded_address() {
    let app = TestApp::with_config(
        enforcing("10.0.0.0/8", "No"),
        "[gate]\ntrust_forwarded_for = true\n",
    );
    // The client claims 10.0.0.5; the proxy appends the real source.
    let spoofed = [("x-forwarded-for", "10.0.0.5, 8.8.8.8")];

    let response = app
        .request("GET", "/login", None, "172.16.0.1", &spoofed)
        .await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);

    app.create_user("alice", "s3cret").await;
    let response = app
        .request(
            "POST",
            "/api/auth/login",
            Some(serde_json::json!({ "username": "alice", "password": "s3cret" })),
            "172.16.0.1",
            &spoofed,
        )
        .await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_ipv4_mapped_ipv6_peer() {
    let app = TestApp::new(enforcing("10.0.0.0/8", "No"));

    let mapped = app.request("GET", "/login", None, "::ffff:10.0.0.5", &[]).await;
    let native = app.request("GET", "/login", None, "2001:db8::1", &[]).await;

    assert_eq!(mapped.status, StatusCode::OK);
    assert_eq!(native.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_settings_changes_apply_to_next_request() {
    let app = TestApp::new(enforcing("10.0.0.0/8", "No"));

    let before = app.request("GET", "/login", None, "172.16.5.5", &[]).await;
    assert_eq!(before.status, StatusCode::FORBIDDEN);

    app.settings
        .update_valid_ips("10.0.0.0/8, 172.16.5.1-9")
        .await
        .expect("valid list");

    let after = app.request("GET", "/login", None, "172.16.5.5", &[]).await;
    assert_eq!(after.status, StatusCode::OK);

    app.settings
        .set_check_before_login(false)
        .await
        .expect("toggle");
    let open = app.request("GET", "/login", None, "8.8.8.8", &[]).await;
    assert_eq!(open.status, StatusCode::OK);
}

#[tokio::test]
async fn test_malformed_update_keeps_previous_list() {
    let app = TestApp::new(enforcing("10.0.0.0/8", "No"));

    let err = app
        .settings
        .update_valid_ips("10.0.0.0/8\n10.0.0.0/40")
        .await
        .unwrap_err();
    assert!(err.message.contains("10.0.0.0/40"));

    let response = app.request("GET", "/login", None, "10.9.9.9", &[]).await;
    assert_eq!(response.status, StatusCode::OK);
}
