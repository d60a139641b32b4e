use std::sync::Arc;

use crate::error::ServerResult;

/// How a server call ended, for metrics classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestOutcome {
    /// Call returned an image.
    Success,
    /// Call returned an error.
    Failure,
    /// Call never returned: the caller dropped the future or the wrapped server panicked.
    Canceled,
}

impl RequestOutcome {
    /// Return label value for metrics.
    #[inline]
    pub fn as_label(&self) -> &'static str {
        match self {
            RequestOutcome::Success => "success",
            RequestOutcome::Failure => "failure",
            RequestOutcome::Canceled => "canceled",
        }
    }

    /// Classify a finished call.
    pub fn of<T>(res: &ServerResult<T>) -> Self {
        match res {
            Ok(_) => RequestOutcome::Success,
            Err(_) => RequestOutcome::Failure,
        }
    }
}

/// Backend metrics collection interface.
///
/// `server` is the name of the recording decorator (see [`crate::LimitServer::with_name`]);
/// keep it low-cardinality.
pub trait MetricsBackend: Send + Sync + 'static {
    /// Record how long a call waited for an admission slot.
    fn record_admission_wait(&self, server: &str, wait_ms: u64);
    /// Record a call that was admitted and handed to the wrapped server.
    fn record_request_started(&self, server: &str);
    /// Record the end of an admitted call with its outcome and execution time.
    ///
    /// Emitted exactly once for every `record_request_started`.
    fn record_request_completed(&self, server: &str, outcome: RequestOutcome, duration_ms: u64);
}

/// Shared handle to metrics backend.
pub type MetricsHandle = Arc<dyn MetricsBackend>;
