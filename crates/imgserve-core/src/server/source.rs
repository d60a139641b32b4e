use async_trait::async_trait;
use imgserve_model::{Image, Params, SOURCE_PARAM};
use tracing::{debug, trace};

use crate::{error::ServerResult, server::Server};

/// Forwards only the [`SOURCE_PARAM`] param to the wrapped server.
///
/// Requests without a source are rejected with a missing-param error before
/// reaching the wrapped server. Every other param supplied by the caller is
/// dropped, so the wrapped server always sees exactly `{source: <value>}`.
///
/// Presence is what counts: an empty string or `false` is forwarded as is.
#[derive(Debug, Clone)]
pub struct SourceServer<S> {
    inner: S,
}

impl<S> SourceServer<S> {
    pub fn new(inner: S) -> Self {
        Self { inner }
    }

    /// Get a reference to the wrapped server.
    pub fn inner(&self) -> &S {
        &self.inner
    }

    pub fn into_inner(self) -> S {
        self.inner
    }
}

#[async_trait]
impl<S: Server> Server for SourceServer<S> {
    async fn get(&self, params: Params) -> ServerResult<Image> {
        let source = params
            .get(SOURCE_PARAM)
            .inspect_err(|e| debug!(error = %e, "rejecting request without source"))?;

        trace!(source = %source, dropped = params.len() - 1, "forwarding source param");
        let narrowed = Params::single(SOURCE_PARAM, source.clone());
        self.inner.get(narrowed).await
    }
}
