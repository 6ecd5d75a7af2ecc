//! Client IP extraction from HTTP request metadata.

use axum::http::HeaderMap;
use std::net::{IpAddr, SocketAddr};

const X_FORWARDED_FOR: &str = "x-forwarded-for";
const X_REAL_IP: &str = "x-real-ip";

/// Determines the client IP address of a request.
///
/// When `behind_proxy` is set, the first valid address in `X-Forwarded-For`
/// wins, then `X-Real-IP`. Otherwise (or when neither header yields an
/// address) the socket peer address is used. Header values that do not
/// parse as an IP address are ignored.
///
/// Returns `None` when no source is available.
///
/// # Examples
///
/// ```
/// use axum::http::HeaderMap;
/// use short_url::utils::client_ip::client_ip;
///
/// let mut headers = HeaderMap::new();
/// headers.insert("x-forwarded-for", "203.0.113.7, 10.0.0.1".parse().unwrap());
///
/// let ip = client_ip(&headers, None, true);
/// assert_eq!(ip.as_deref(), Some("203.0.113.7"));
///
/// let peer = "192.0.2.10:4000".parse().ok();
/// assert_eq!(client_ip(&headers, peer, false).as_deref(), Some("192.0.2.10"));
/// ```
pub fn client_ip(headers: &HeaderMap, peer: Option<SocketAddr>, behind_proxy: bool) -> Option<String> {
    if behind_proxy && let Some(ip) = forwarded_ip(headers) {
        return Some(ip.to_string());
    }

    peer.map(|addr| addr.ip().to_string())
}

fn forwarded_ip(headers: &HeaderMap) -> Option<IpAddr> {
    let from_forwarded_for = headers
        .get(X_FORWARDED_FOR)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .and_then(|first| first.trim().parse::<IpAddr>().ok());

    from_forwarded_for.or_else(|| {
        headers
            .get(X_REAL_IP)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.trim().parse::<IpAddr>().ok())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn peer() -> Option<SocketAddr> {
        Some("127.0.0.1:12345".parse().unwrap())
    }

    #[test]
    fn test_peer_address_without_proxy() {
        let headers = HeaderMap::new();
        assert_eq!(client_ip(&headers, peer(), false).as_deref(), Some("127.0.0.1"));
    }

    #[test]
    fn test_forwarded_headers_ignored_without_proxy() {
        let mut headers = HeaderMap::new();
        headers.insert(X_FORWARDED_FOR, HeaderValue::from_static("203.0.113.7"));

        assert_eq!(client_ip(&headers, peer(), false).as_deref(), Some("127.0.0.1"));
    }

    #[test]
    fn test_forwarded_for_first_entry_behind_proxy() {
        let mut headers = HeaderMap::new();
        headers.insert(
            X_FORWARDED_FOR,
            HeaderValue::from_static("203.0.113.7, 10.0.0.1, 10.0.0.2"),
        );

        assert_eq!(client_ip(&headers, peer(), true).as_deref(), Some("203.0.113.7"));
    }

    #[test]
    fn test_real_ip_fallback_behind_proxy() {
        let mut headers = HeaderMap::new();
        headers.insert(X_REAL_IP, HeaderValue::from_static("2001:db8::1"));

        assert_eq!(client_ip(&headers, peer(), true).as_deref(), Some("2001:db8::1"));
    }

    #[test]
    fn test_garbage_forwarded_header_falls_back_to_peer() {
        let mut headers = HeaderMap::new();
        headers.insert(X_FORWARDED_FOR, HeaderValue::from_static("not-an-ip"));

        assert_eq!(client_ip(&headers, peer(), true).as_deref(), Some("127.0.0.1"));
    }

    #[test]
    fn test_no_source_available() {
        let headers = HeaderMap::new();
        assert!(client_ip(&headers, None, false).is_none());
    }
}
