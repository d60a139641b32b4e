pub mod config;
pub mod error;
pub mod metrics;
pub mod server;

pub use config::ChainConfig;
pub use error::{CoreError, ServerError, ServerResult};
pub use metrics::{MetricsBackend, MetricsHandle, NoOpMetrics, RequestOutcome, noop_metrics};
pub use server::{LimitServer, Server, ServerFn, ServerRef, SourceServer, StaticServer};

pub mod prelude {
    pub use crate::error::{CoreError, ServerError, ServerResult};
    pub use crate::server::{LimitServer, Server, ServerFn, ServerRef, SourceServer, StaticServer};
    pub use imgserve_model::{Image, ParamError, ParamValue, Params, SOURCE_PARAM};
}
