//! Client address extraction and hashing.
//!
//! The client address is the rate limiting key and, hashed, the click
//! identity. Raw addresses are never persisted.

use axum::http::HeaderMap;
use hmac::{Hmac, Mac};
use sha2::{Digest, Sha256};
use std::net::{IpAddr, SocketAddr};

type HmacSha256 = Hmac<Sha256>;

/// Resolves the originating client address of a request.
///
/// With `behind_proxy` set, the first `X-Forwarded-For` entry is used, then
/// `X-Real-IP`, falling back to the peer address. Without it, forwarding
/// headers are ignored since any client can forge them.
pub fn client_ip(
    headers: &HeaderMap,
    peer: Option<SocketAddr>,
    behind_proxy: bool,
) -> Option<IpAddr> {
    if behind_proxy {
        let forwarded = headers
            .get("x-forwarded-for")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.split(',').next())
            .and_then(|v| v.trim().parse::<IpAddr>().ok());

        if forwarded.is_some() {
            return forwarded;
        }

        let real_ip = headers
            .get("x-real-ip")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.trim().parse::<IpAddr>().ok());

        if real_ip.is_some() {
            return real_ip;
        }
    }

    peer.map(|addr| addr.ip())
}

/// Rate limiting key for a client. Unknown clients share one bucket.
pub fn client_key(ip: Option<IpAddr>) -> String {
    ip.map(|ip| ip.to_string())
        .unwrap_or_else(|| "unknown".to_string())
}

/// One-way hash of a client address, as 64 lowercase hex characters.
///
/// Without a secret this is plain SHA-256 of the textual address (the empty
/// string when unknown). With a secret, HMAC-SHA256 keyed by it is used so
/// the IPv4 space cannot be enumerated to reverse stored hashes.
pub fn hash_ip(ip: Option<IpAddr>, secret: Option<&str>) -> String {
    let text = ip.map(|ip| ip.to_string()).unwrap_or_default();

    match secret {
        Some(secret) if !secret.is_empty() => {
            let mut mac = HmacSha256::new_from_slice(secret.as_bytes())
                .expect("HMAC accepts any key length");
            mac.update(text.as_bytes());
            hex::encode(mac.finalize().into_bytes())
        }
        _ => hex::encode(Sha256::digest(text.as_bytes())),
    }
}
