//! Route definitions for the IpGate HTTP surface.

use axum::{
    Router, middleware as axum_middleware,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::middleware;
use crate::state::AppState;

/// Build the Axum router with all routes and middleware.
///
/// Serve it with `into_make_service_with_connect_info::<SocketAddr>()` so
/// the gate can see the peer address.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .merge(login_routes(&state))
        .route("/health", get(handlers::health::health))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Login page and endpoint, both behind the pre-login gate.
fn login_routes(state: &AppState) -> Router<AppState> {
    Router::new()
        .route("/login", get(handlers::auth::login_form))
        .route("/api/auth/login", post(handlers::auth::login))
        .route_layer(axum_middleware::from_fn_with_state(
            state.clone(),
            middleware::ip_gate::pre_login_gate,
        ))
}
