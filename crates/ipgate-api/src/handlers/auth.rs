//! Login page and login endpoint.

use axum::Json;
use axum::extract::{Extension, State};
use axum::response::Html;
use tracing::debug;

use ipgate_auth::CredentialOutcome;
use ipgate_core::error::AppError;
use ipgate_core::types::GateSettings;

use crate::dto::LoginResponse;
use crate::error::ApiError;
use crate::extractors::{ClientIp, Credentials};
use crate::state::AppState;

/// Shown for every denied login, whatever the reason.
pub const INVALID_LOGIN_MESSAGE: &str = "Invalid login, please try again";

const LOGIN_PAGE: &str = r#"<!DOCTYPE html>
<html>
<head><title>Log in</title></head>
<body>
<form method="post" action="/api/auth/login">
<label>Username <input name="username" autocomplete="username"></label>
<label>Password <input name="password" type="password" autocomplete="current-password"></label>
<button type="submit">Log in</button>
</form>
</body>
</html>
"#;

/// GET /login
pub async fn login_form() -> Html<&'static str> {
    Html(LOGIN_PAGE)
}

/// POST /api/auth/login
pub async fn login(
    State(state): State<AppState>,
    ClientIp(address): ClientIp,
    snapshot: Option<Extension<GateSettings>>,
    Credentials(req): Credentials,
) -> Result<Json<LoginResponse>, ApiError> {
    let settings = match snapshot {
        Some(Extension(settings)) => settings,
        None => state.settings.current().await?,
    };

    let outcome = state
        .login_gate
        .credential_check(&settings, &req.username, &req.password, address)
        .await?;

    match outcome {
        CredentialOutcome::Authenticated(user) => Ok(Json(LoginResponse {
            user_id: user.id.into_uuid(),
            username: user.username,
        })),
        CredentialOutcome::Denied(reason) => {
            debug!(?reason, "Login rejected");
            Err(AppError::authentication(INVALID_LOGIN_MESSAGE).into())
        }
    }
}
