use std::{
    fmt,
    num::NonZeroUsize,
    time::{Duration, Instant},
};

use async_trait::async_trait;
use imgserve_model::{Image, Params};
use tokio::sync::{Semaphore, SemaphorePermit};
use tracing::{instrument, trace};

use crate::{
    error::{CoreError, ServerError, ServerResult},
    metrics::{MetricsHandle, RequestOutcome, noop_metrics},
    server::Server,
};

/// Name used in logs and metrics when none is set with [`LimitServer::with_name`].
pub const DEFAULT_LIMIT_SERVER_NAME: &str = "limit";

/// Bounds the number of concurrent calls to the wrapped server.
///
/// Each call takes one of `limit` admission slots before delegating and gives
/// it back when the wrapped call ends, whether it returned, failed, panicked or
/// was dropped by the caller. Callers beyond `limit` wait; nothing is rejected
/// and there is no timeout.
///
/// Waiters are admitted in arrival order (the gate is a fair [`Semaphore`]).
pub struct LimitServer<S> {
    inner: S,
    gate: Semaphore,
    limit: NonZeroUsize,
    name: String,
    metrics: MetricsHandle,
}

impl<S> LimitServer<S> {
    /// Wrap `inner`, allowing at most `limit` concurrent calls.
    ///
    /// # Panics
    /// If `limit` exceeds [`Semaphore::MAX_PERMITS`].
    pub fn new(inner: S, limit: NonZeroUsize) -> Self {
        Self {
            inner,
            gate: Semaphore::new(limit.get()),
            limit,
            name: DEFAULT_LIMIT_SERVER_NAME.to_string(),
            metrics: noop_metrics(),
        }
    }

    /// Like [`LimitServer::new`], rejecting out-of-range limits instead of panicking.
    pub fn try_new(inner: S, limit: usize) -> Result<Self, CoreError> {
        let limit = NonZeroUsize::new(limit)
            .ok_or_else(|| CoreError::InvalidConfig("limit must be greater than zero".into()))?;
        if limit.get() > Semaphore::MAX_PERMITS {
            return Err(CoreError::InvalidConfig(format!(
                "limit must not exceed {}",
                Semaphore::MAX_PERMITS
            )));
        }
        Ok(Self::new(inner, limit))
    }

    /// Set the name reported in logs and metrics.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Replace the metrics backend.
    pub fn with_metrics(mut self, metrics: MetricsHandle) -> Self {
        self.metrics = metrics;
        self
    }

    /// Maximum number of concurrent calls.
    pub fn limit(&self) -> NonZeroUsize {
        self.limit
    }

    /// Number of free admission slots right now.
    pub fn available(&self) -> usize {
        self.gate.available_permits()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get a reference to the wrapped server.
    pub fn inner(&self) -> &S {
        &self.inner
    }
}

#[async_trait]
impl<S: Server> Server for LimitServer<S> {
    #[instrument(level = "debug", skip(self, params), fields(server = %self.name, limit = self.limit.get()))]
    async fn get(&self, params: Params) -> ServerResult<Image> {
        let queued = Instant::now();
        let permit = self
            .gate
            .acquire()
            .await
            .map_err(|_| ServerError::Internal("admission gate closed".into()))?;

        let wait_ms = as_millis(queued.elapsed());
        trace!(wait_ms, available = self.gate.available_permits(), "admitted");
        self.metrics.record_admission_wait(&self.name, wait_ms);

        let mut admission = Admission::start(permit, &self.name, &self.metrics);
        let res = self.inner.get(params).await;
        admission.finish(RequestOutcome::of(&res));
        res
    }
}

/// Whole milliseconds, saturating at `u64::MAX`.
fn as_millis(d: Duration) -> u64 {
    u64::try_from(d.as_millis()).unwrap_or(u64::MAX)
}

/// An admitted call. Holds the slot and reports completion when dropped,
/// so panics and dropped futures release the slot too.
struct Admission<'a> {
    _permit: SemaphorePermit<'a>,
    server: &'a str,
    metrics: &'a MetricsHandle,
    started: Instant,
    outcome: RequestOutcome,
}

impl<'a> Admission<'a> {
    fn start(permit: SemaphorePermit<'a>, server: &'a str, metrics: &'a MetricsHandle) -> Self {
        metrics.record_request_started(server);
        Self {
            _permit: permit,
            server,
            metrics,
            started: Instant::now(),
            outcome: RequestOutcome::Canceled,
        }
    }

    fn finish(&mut self, outcome: RequestOutcome) {
        self.outcome = outcome;
    }
}

impl Drop for Admission<'_> {
    fn drop(&mut self) {
        let duration_ms = as_millis(self.started.elapsed());
        self.metrics
            .record_request_completed(self.server, self.outcome, duration_ms);
        trace!(outcome = self.outcome.as_label(), duration_ms, "released");
    }
}

impl<S> fmt::Debug for LimitServer<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LimitServer")
            .field("name", &self.name)
            .field("limit", &self.limit)
            .field("available", &self.gate.available_permits())
            .field("metrics", &"<handle>")
            .finish_non_exhaustive()
    }
}
