//! Prometheus metrics backend for imgserve.
//!
//! [`PrometheusMetrics`] implements [`imgserve_core::MetricsBackend`]; hand it to the
//! decorators that record metrics and expose [`PrometheusMetrics::gather`] from your
//! HTTP layer.
//!
//! ```rust
//! use std::sync::Arc;
//! use imgserve_core::{LimitServer, StaticServer};
//! use imgserve_model::Image;
//! use imgserve_prometheus::PrometheusMetrics;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let metrics = PrometheusMetrics::new()?;
//! let server = LimitServer::try_new(StaticServer::image(Image::default()), 8)?
//!     .with_metrics(Arc::new(metrics.clone()));
//! # let _ = server;
//! # Ok(())
//! # }
//! ```
//!
//! ## Metrics
//! - `imgserve_admission_wait_seconds{server}` - Histogram
//! - `imgserve_requests_started_total{server}` - Counter
//! - `imgserve_requests_completed_total{server, outcome}` - Counter
//! - `imgserve_requests_in_flight{server}` - Gauge
//! - `imgserve_request_duration_seconds{server}` - Histogram
mod backend;
pub use backend::PrometheusMetrics;

pub use prometheus::{Encoder, Registry, TextEncoder};
