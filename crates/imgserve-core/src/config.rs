//! Declarative assembly of a server chain.
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{
    error::CoreError,
    metrics::MetricsHandle,
    server::{LimitServer, ServerRef, SourceServer},
};

/// Which decorators to put in front of a leaf server.
///
/// The resulting chain is `SourceServer -> LimitServer -> leaf`, with either
/// decorator left out when disabled. Narrowing sits outermost so requests
/// without a source are rejected before taking an admission slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChainConfig {
    /// Reject requests without `source` and forward only that param.
    pub require_source: bool,
    /// Maximum number of concurrent calls reaching the leaf; `None` means unbounded.
    pub limit: Option<usize>,
}

impl Default for ChainConfig {
    fn default() -> Self {
        Self {
            require_source: true,
            limit: None,
        }
    }
}

impl ChainConfig {
    /// Wrap `leaf` according to this config.
    ///
    /// Fails if `limit` is `Some(0)`.
    pub fn build(&self, leaf: ServerRef, metrics: MetricsHandle) -> Result<ServerRef, CoreError> {
        let mut server = leaf;

        if let Some(limit) = self.limit {
            server = Arc::new(LimitServer::try_new(server, limit)?.with_metrics(metrics));
        }
        if self.require_source {
            server = Arc::new(SourceServer::new(server));
        }

        debug!(
            require_source = self.require_source,
            limit = ?self.limit,
            "server chain assembled"
        );
        Ok(server)
    }
}
