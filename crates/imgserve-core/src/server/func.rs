use std::{fmt, future::Future, sync::Arc};

use async_trait::async_trait;
use imgserve_model::{Image, Params};

use crate::{error::ServerResult, server::Server};

/// Adapts an async function into a [`Server`].
///
/// `get` calls the function with the params and returns whatever it yields.
///
/// ```rust
/// use imgserve_core::prelude::*;
///
/// let server = ServerFn::new(|params: Params| async move {
///     let source = params.get_string(SOURCE_PARAM)?;
///     Ok::<_, ServerError>(Image::new("raw", source.as_bytes()))
/// });
/// # let _ = server;
/// ```
pub struct ServerFn<F> {
    f: F,
}

impl<F, Fut> ServerFn<F>
where
    F: Fn(Params) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = ServerResult<Image>> + Send + 'static,
{
    pub fn new(f: F) -> Self {
        Self { f }
    }

    /// Same as [`ServerFn::new`], already wrapped in an [`Arc`].
    pub fn arc(f: F) -> Arc<Self> {
        Arc::new(Self::new(f))
    }
}

#[async_trait]
impl<F, Fut> Server for ServerFn<F>
where
    F: Fn(Params) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = ServerResult<Image>> + Send + 'static,
{
    async fn get(&self, params: Params) -> ServerResult<Image> {
        (self.f)(params).await
    }
}

impl<F> fmt::Debug for ServerFn<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServerFn").finish_non_exhaustive()
    }
}
