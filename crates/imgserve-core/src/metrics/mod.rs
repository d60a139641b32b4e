//! Metrics collection abstraction for servers.
//!
//! Backends (prometheus, statsd, etc) implement [`MetricsBackend`] and are handed to
//! decorators such as [`crate::LimitServer::with_metrics`].
mod backend;
pub use backend::{MetricsBackend, MetricsHandle, RequestOutcome};

mod noop;
pub use noop::NoOpMetrics;

use std::sync::Arc;

/// Create a no-op metrics handle.
#[inline]
pub fn noop_metrics() -> MetricsHandle {
    Arc::new(NoOpMetrics)
}
