//! Login gate: the pre-login address check and the credential check.

use std::net::IpAddr;
use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, info, warn};

use ipgate_core::config::GateConfig;
use ipgate_core::error::AppError;
use ipgate_core::traits::{PasswordVerifier, UserDirectory};
use ipgate_core::types::{GateSettings, UserRecord};

use crate::allowlist::is_ip_permitted;

use super::message::denial_message;

/// Outcome of the pre-login address check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateDecision {
    /// Let the login flow continue.
    Proceed,
    /// Stop the login flow and show `message` with a 403.
    Reject {
        /// Rendered error template.
        message: String,
    },
}

impl GateDecision {
    /// True for [`GateDecision::Proceed`].
    pub fn is_proceed(&self) -> bool {
        matches!(self, Self::Proceed)
    }
}

/// Why a credential check was denied.
///
/// Only for logs and tests; callers must show the same message for every
/// reason so that usernames cannot be enumerated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DenyReason {
    /// No account with that username.
    UnknownUser,
    /// The source address is outside the allow-list.
    AddressNotPermitted,
    /// The password verifier rejected the password.
    InvalidPassword,
}

/// Outcome of the credential check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CredentialOutcome {
    /// Address permitted and password verified.
    Authenticated(UserRecord),
    /// Login denied.
    Denied(DenyReason),
}

/// Combined outcome of both checks, for callers that run them together.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginAttempt {
    /// Stopped by the pre-login check.
    Blocked {
        /// Rendered error template.
        message: String,
    },
    /// Reached the credential check.
    Checked(CredentialOutcome),
}

/// Wraps a user directory and password verifier with the address policy.
#[derive(Clone)]
pub struct LoginGate {
    /// User lookup.
    users: Arc<dyn UserDirectory>,
    /// Password verification, only reached for permitted addresses.
    verifier: Arc<dyn PasswordVerifier>,
    /// Fallback denial message.
    default_error_text: String,
}

impl std::fmt::Debug for LoginGate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginGate")
            .field("default_error_text", &self.default_error_text)
            .finish()
    }
}

impl LoginGate {
    /// Creates a login gate.
    pub fn new(
        users: Arc<dyn UserDirectory>,
        verifier: Arc<dyn PasswordVerifier>,
        config: &GateConfig,
    ) -> Self {
        Self {
            users,
            verifier,
            default_error_text: config.default_error_text.clone(),
        }
    }

    /// Runs before the login form or any credential handling.
    ///
    /// Always proceeds while `check_before_login` is off.
    pub fn pre_auth_check(&self, settings: &GateSettings, address: IpAddr) -> GateDecision {
        if !settings.check_before_login {
            return GateDecision::Proceed;
        }

        if is_ip_permitted(&settings.valid_ips, address) {
            debug!(%address, "Pre-login check passed");
            return GateDecision::Proceed;
        }

        warn!(%address, "Pre-login check rejected address");
        GateDecision::Reject {
            message: denial_message(settings, &self.default_error_text, address),
        }
    }

    /// Runs as part of every login, regardless of `check_before_login`.
    ///
    /// The password verifier is only called once the user exists and the
    /// address is permitted.
    pub async fn credential_check(
        &self,
        settings: &GateSettings,
        username: &str,
        password: &str,
        address: IpAddr,
    ) -> Result<CredentialOutcome, AppError> {
        let Some(user) = self.users.find_user(username).await? else {
            info!(%address, "Login denied: unknown user");
            return Ok(CredentialOutcome::Denied(DenyReason::UnknownUser));
        };

        if !is_ip_permitted(&settings.valid_ips, address) {
            info!(user_id = %user.id, %address, "Login denied: address not permitted");
            return Ok(CredentialOutcome::Denied(DenyReason::AddressNotPermitted));
        }

        if !self.verifier.verify(&user, password)? {
            info!(user_id = %user.id, %address, "Login denied: invalid password");
            return Ok(CredentialOutcome::Denied(DenyReason::InvalidPassword));
        }

        info!(user_id = %user.id, %address, "Login permitted");
        Ok(CredentialOutcome::Authenticated(user))
    }

    /// Runs the pre-login check and, if it proceeds, the credential check.
    pub async fn attempt(
        &self,
        settings: &GateSettings,
        username: &str,
        password: &str,
        address: IpAddr,
    ) -> Result<LoginAttempt, AppError> {
        if let GateDecision::Reject { message } = self.pre_auth_check(settings, address) {
            return Ok(LoginAttempt::Blocked { message });
        }

        self.credential_check(settings, username, password, address)
            .await
            .map(LoginAttempt::Checked)
    }
}
