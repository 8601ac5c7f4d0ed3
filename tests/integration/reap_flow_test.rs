//! Integration tests for reaping sessions outside the allow-list.

mod helpers;

use std::sync::Arc;

use axum::http::StatusCode;
use chrono::Utc;
use tokio_util::sync::CancellationToken;

use helpers::{TestApp, enforcing};
use ipgate_auth::SessionReaper;
use ipgate_auth::gate::lockout_warning;

fn reaper(app: &TestApp) -> SessionReaper {
    SessionReaper::new(Arc::new(app.sessions.clone()), &app.config.session)
}

#[tokio::test]
async fn test_reap_keeps_own_and_permitted_sessions() {
    let app = TestApp::new(enforcing("10.0.0.0/8\n192.168.1.1-50", ""));
    let admin = app.create_user("admin", "pw").await;
    let bob = app.create_user("bob", "pw").await;

    let admin_remote = app.create_session(admin, "8.8.8.8", 5).await;
    let bob_office = app.create_session(bob, "10.1.2.3", 4).await;
    let bob_range = app.create_session(bob, "192.168.1.50", 3).await;
    let bob_outside = app.create_session(bob, "192.168.1.51", 2).await;
    let bob_garbage = app.create_session(bob, "unknown", 1).await;
    let bob_stale = app.create_session(bob, "8.8.4.4", 600).await;

    let settings = app.settings.current().await.unwrap();
    let report = reaper(&app)
        .reap(&settings, admin, Utc::now(), &(), &CancellationToken::new())
        .await
        .unwrap();

    assert_eq!(report.scanned, 5);
    assert_eq!(report.removed, 2);
    assert_eq!(report.kept_own, 1);
    assert_eq!(report.kept_permitted, 2);
    assert_eq!(report.failed, 0);
    assert!(!report.cancelled);

    assert!(app.sessions.contains(admin_remote).await);
    assert!(app.sessions.contains(bob_office).await);
    assert!(app.sessions.contains(bob_range).await);
    assert!(!app.sessions.contains(bob_outside).await);
    assert!(!app.sessions.contains(bob_garbage).await);
    // Idle sessions are left to normal expiry.
    assert!(app.sessions.contains(bob_stale).await);
}

#[tokio::test]
async fn test_count_and_plan_match_reap() {
    let app = TestApp::new(enforcing("10.0.0.0/8", ""));
    let admin = app.create_user("admin", "pw").await;
    let carol = app.create_user("carol", "pw").await;
    app.create_session(carol, "10.0.0.7", 10).await;
    app.create_session(carol, "11.0.0.7", 9).await;
    app.create_session(carol, "12.0.0.7", 8).await;

    let reaper = reaper(&app);
    let settings = app.settings.current().await.unwrap();
    let now = Utc::now();

    assert_eq!(reaper.count_active(now).await.unwrap(), 3);
    let planned = reaper.plan(&settings, admin, now).await.unwrap();
    assert_eq!(planned.len(), 2);

    let report = reaper
        .reap(&settings, admin, now, &(), &CancellationToken::new())
        .await
        .unwrap();
    assert_eq!(report.removed as usize, planned.len());
    assert_eq!(reaper.count_active(Utc::now()).await.unwrap(), 1);
}

#[tokio::test]
async fn test_reap_after_tightening_list_then_login_blocked() {
    let app = TestApp::new(enforcing("10.0.0.0/8\n172.16", "Blocked"));
    let admin = app.create_user("admin", "pw").await;
    let dave = app.create_user("dave", "pw").await;
    let session = app.create_session(dave, "172.16.9.9", 1).await;

    app.settings.update_valid_ips("10.0.0.0/8").await.unwrap();
    let settings = app.settings.current().await.unwrap();
    let report = reaper(&app)
        .reap(&settings, admin, Utc::now(), &(), &CancellationToken::new())
        .await
        .unwrap();

    assert_eq!(report.removed, 1);
    assert!(!app.sessions.contains(session).await);

    let response = app.login("dave", "pw", "172.16.9.9").await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);
    assert_eq!(response.body, "Blocked");
}

#[tokio::test]
async fn test_cancelled_before_start_removes_nothing() {
    let app = TestApp::new(enforcing("10.0.0.0/8", ""));
    let admin = app.create_user("admin", "pw").await;
    let eve = app.create_user("eve", "pw").await;
    app.create_session(eve, "8.8.8.8", 1).await;

    let cancel = CancellationToken::new();
    cancel.cancel();
    let settings = app.settings.current().await.unwrap();
    let report = reaper(&app)
        .reap(&settings, admin, Utc::now(), &(), &cancel)
        .await
        .unwrap();

    assert!(report.cancelled);
    assert_eq!(report.removed, 0);
    assert_eq!(app.sessions.len().await, 1);
}

#[tokio::test]
async fn test_lockout_warning_for_operator_address() {
    let app = TestApp::new(enforcing("10.0.0.0/8", ""));
    let settings = app.settings.current().await.unwrap();

    assert_eq!(
        lockout_warning(&settings, "8.8.8.8".parse().unwrap()).as_deref(),
        Some(
            "Your IP 8.8.8.8 is not in the valid IPs list. \
             You will not be able to log in once you are logged out."
        )
    );
    assert!(lockout_warning(&settings, "10.0.0.1".parse().unwrap()).is_none());
}
