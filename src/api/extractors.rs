//! Custom request extractors.

use axum::extract::{ConnectInfo, FromRequestParts};
use axum::http::{header, request::Parts};
use std::convert::Infallible;
use std::net::SocketAddr;

use crate::domain::entities::VisitorInfo;
use crate::state::AppState;
use crate::utils::client_ip::client_ip;

/// Client metadata of the current request, for visit accounting.
///
/// Never rejects: the peer address is read from [`ConnectInfo`] when the
/// server provides it, and every missing value becomes an empty string.
#[derive(Debug, Clone)]
pub struct Visitor(pub VisitorInfo);

impl FromRequestParts<AppState> for Visitor {
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let peer = parts
            .extensions
            .get::<ConnectInfo<SocketAddr>>()
            .map(|ConnectInfo(addr)| *addr);

        let header_str = |name: header::HeaderName| parts.headers.get(name).and_then(|v| v.to_str().ok());

        Ok(Visitor(VisitorInfo::new(
            client_ip(&parts.headers, peer, state.behind_proxy),
            header_str(header::USER_AGENT),
            header_str(header::REFERER),
        )))
    }
}
