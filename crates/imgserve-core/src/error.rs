use std::{error::Error as StdError, sync::Arc};

use imgserve_model::ParamError;
use thiserror::Error;

/// Error returned by [`crate::Server::get`].
///
/// Cheap to clone so a fixed error can be handed out on every call.
/// Decorators pass errors from the server they wrap through untouched.
#[derive(Debug, Clone, Error)]
pub enum ServerError {
    /// A required param is absent or has the wrong type.
    #[error(transparent)]
    Param(#[from] ParamError),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("internal error: {0}")]
    Internal(String),

    /// Any other error raised by a leaf server.
    #[error(transparent)]
    Other(Arc<dyn StdError + Send + Sync>),
}

impl ServerError {
    /// Wrap an arbitrary error raised by a leaf server.
    pub fn other<E>(err: E) -> Self
    where
        E: StdError + Send + Sync + 'static,
    {
        ServerError::Other(Arc::new(err))
    }

    /// Returns `true` if the request lacked a required param.
    pub fn is_missing_param(&self) -> bool {
        matches!(self, ServerError::Param(e) if e.is_missing())
    }
}

pub type ServerResult<T> = Result<T, ServerError>;

/// Error raised while assembling servers from configuration.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}
