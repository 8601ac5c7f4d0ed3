//! `ClientIp` extractor: the address the gate evaluates.

use std::net::{IpAddr, SocketAddr};

use axum::extract::{ConnectInfo, FromRequestParts};
use axum::http::HeaderMap;
use axum::http::request::Parts;

use ipgate_core::error::AppError;

use crate::error::ApiError;
use crate::state::AppState;

/// Source address of the current request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClientIp(pub IpAddr);

/// Pick the client address from the forwarding header or the peer.
///
/// `X-Forwarded-For` is only consulted when `trust_forwarded_for` is set,
/// and only its last element is used: that is the hop appended by the
/// trusted proxy, while earlier elements are whatever the client sent.
/// An unparseable header falls back to the peer address.
pub fn resolve_client_ip(
    headers: &HeaderMap,
    peer: Option<IpAddr>,
    trust_forwarded_for: bool,
) -> Option<IpAddr> {
    if trust_forwarded_for {
        let forwarded = headers
            .get("x-forwarded-for")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.rsplit(',').next())
            .and_then(|v| v.trim().parse::<IpAddr>().ok());
        if forwarded.is_some() {
            return forwarded;
        }
    }
    peer
}

impl FromRequestParts<AppState> for ClientIp {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let peer = parts
            .extensions
            .get::<ConnectInfo<SocketAddr>>()
            .map(|ConnectInfo(addr)| addr.ip());

        resolve_client_ip(&parts.headers, peer, state.config.gate.trust_forwarded_for)
            .map(ClientIp)
            .ok_or_else(|| ApiError(AppError::internal("Client address unavailable")))
    }
}
