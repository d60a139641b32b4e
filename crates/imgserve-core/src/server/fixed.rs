use async_trait::async_trait;
use imgserve_model::{Image, Params};

use crate::{
    error::{ServerError, ServerResult},
    server::Server,
};

/// Server that always returns the same result, whatever the params.
///
/// Useful as a stub in tests or as a fallback at the end of a chain.
#[derive(Debug, Clone)]
pub struct StaticServer {
    result: ServerResult<Image>,
}

impl StaticServer {
    pub fn new(result: ServerResult<Image>) -> Self {
        Self { result }
    }

    /// Always serve `image`.
    pub fn image(image: Image) -> Self {
        Self::new(Ok(image))
    }

    /// Always fail with `err`.
    pub fn error(err: impl Into<ServerError>) -> Self {
        Self::new(Err(err.into()))
    }

    /// The result handed out on every call.
    pub fn result(&self) -> &ServerResult<Image> {
        &self.result
    }
}

#[async_trait]
impl Server for StaticServer {
    async fn get(&self, _params: Params) -> ServerResult<Image> {
        self.result.clone()
    }
}
