//! Server abstraction and the building blocks composed around it.
//!
//! A request travels through a chain of decorators ([`SourceServer`], [`LimitServer`])
//! and ends at a leaf ([`StaticServer`], [`ServerFn`] or any external implementation).
mod func;
pub use func::ServerFn;

mod fixed;
pub use fixed::StaticServer;

mod source;
pub use source::SourceServer;

mod limit;
pub use limit::{DEFAULT_LIMIT_SERVER_NAME, LimitServer};

use std::sync::Arc;

use async_trait::async_trait;
use imgserve_model::{Image, Params};

use crate::error::ServerResult;

/// Serves an [`Image`] for a set of [`Params`].
///
/// Implementations must tolerate concurrent calls from many tasks.
/// Callers that need to bound that concurrency wrap the server in a [`LimitServer`].
#[async_trait]
pub trait Server: Send + Sync {
    /// Retrieve the image described by `params`.
    async fn get(&self, params: Params) -> ServerResult<Image>;
}

/// Shared, type-erased server.
pub type ServerRef = Arc<dyn Server>;

#[async_trait]
impl<S: Server + ?Sized> Server for Arc<S> {
    async fn get(&self, params: Params) -> ServerResult<Image> {
        (**self).get(params).await
    }
}

#[async_trait]
impl<S: Server + ?Sized> Server for Box<S> {
    async fn get(&self, params: Params) -> ServerResult<Image> {
        (**self).get(params).await
    }
}
