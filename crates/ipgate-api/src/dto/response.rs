//! Response DTOs.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Successful login.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    /// Authenticated user's id.
    pub user_id: Uuid,
    /// Authenticated user's name.
    pub username: String,
}

/// Liveness probe body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Always `"ok"`.
    pub status: String,
}
