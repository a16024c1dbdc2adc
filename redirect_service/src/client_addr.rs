use axum::http::HeaderMap;
use std::net::SocketAddr;

const FORWARDED_FOR: &str = "x-forwarded-for";
const REAL_IP: &str = "x-real-ip";

/// Client address recorded with a click: `X-Forwarded-For`, then `X-Real-IP`,
/// then the socket peer. The first non-empty value wins and header values are
/// kept verbatim.
pub fn client_addr(headers: &HeaderMap, peer: SocketAddr) -> String {
    [FORWARDED_FOR, REAL_IP]
        .into_iter()
        .find_map(|name| {
            headers
                .get(name)
                .and_then(|v| v.to_str().ok())
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .map(str::to_string)
        })
        .unwrap_or_else(|| peer.to_string())
}
