//! Pre-login gate middleware.

use axum::extract::{Request, State};
use axum::http::StatusCode;
use axum::middleware::Next;
use axum::response::{Html, IntoResponse, Response};

use ipgate_auth::GateDecision;

use crate::error::ApiError;
use crate::extractors::ClientIp;
use crate::state::AppState;

/// Stops the request with a 403 page when the pre-login check rejects the
/// client address.
///
/// On success the settings snapshot is attached to the request so the
/// handler evaluates the same allow-list.
pub async fn pre_login_gate(
    State(state): State<AppState>,
    ClientIp(address): ClientIp,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let settings = state.settings.current().await?;

    match state.login_gate.pre_auth_check(&settings, address) {
        GateDecision::Proceed => {
            request.extensions_mut().insert(settings);
            Ok(next.run(request).await)
        }
        GateDecision::Reject { message } => {
            Ok((StatusCode::FORBIDDEN, Html(message)).into_response())
        }
    }
}
