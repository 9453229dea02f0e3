//! Rate limiting middleware using token bucket algorithm.

use governor::clock::QuantaInstant;
use governor::middleware::NoOpMiddleware;
use std::sync::Arc;
use tower_governor::{
    GovernorLayer,
    governor::GovernorConfigBuilder,
    key_extractor::{KeyExtractor, PeerIpKeyExtractor, SmartIpKeyExtractor},
};

/// Rate limiter keyed by client IP address.
///
/// # Limits
///
/// - **Rate**: 2 requests per second
/// - **Burst**: 30 requests
///
/// Requests exceeding the limit receive `429 Too Many Requests`.
///
/// # Key Extraction
///
/// Pass [`PeerIpKeyExtractor`] to use the socket peer address (requires
/// `into_make_service_with_connect_info`), or [`SmartIpKeyExtractor`] to read
/// `X-Forwarded-For` / `X-Real-IP` behind a trusted proxy.
///
/// # Panics
///
/// Never in practice: the quota constants are non-zero.
pub fn layer<K>(key_extractor: K) -> GovernorLayer<K, NoOpMiddleware<QuantaInstant>, axum::body::Body>
where
    K: KeyExtractor,
{
    let governor_conf = Arc::new(
        GovernorConfigBuilder::default()
            .key_extractor(key_extractor)
            .per_second(2)
            .burst_size(30)
            .finish()
            .expect("rate limit quota is non-zero"),
    );

    GovernorLayer::new(governor_conf)
}

/// Limiter keyed by the socket peer address.
pub fn peer_ip_layer()
-> GovernorLayer<PeerIpKeyExtractor, NoOpMiddleware<QuantaInstant>, axum::body::Body> {
    layer(PeerIpKeyExtractor)
}

/// Limiter keyed by proxy headers, falling back to the peer address.
pub fn proxied_ip_layer()
-> GovernorLayer<SmartIpKeyExtractor, NoOpMiddleware<QuantaInstant>, axum::body::Body> {
    layer(SmartIpKeyExtractor)
}
