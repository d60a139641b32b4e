mod config;
mod error;
mod format;
mod install;
mod level;
mod timer;

pub use config::LoggerConfig;
pub use error::{LoggerError, LoggerResult};
pub use format::LoggerFormat;
pub use level::LoggerLevel;
pub use timer::{LoggerTimeZone, LoggerTimer};

use tracing::warn;

/// Install the global tracing subscriber described by `cfg`.
///
/// Call once, early in `main`. A second call fails with [`LoggerError::AlreadyInitialized`].
/// With [`LoggerTimeZone::Local`] the offset is detected here; if detection is
/// not possible (typically because threads are already running) timestamps fall back to UTC
/// and a warning is logged.
///
/// ```rust
/// use imgserve_observe::{LoggerConfig, init_logger};
///
/// init_logger(&LoggerConfig::default()).expect("logger");
/// tracing::info!("ready");
/// ```
pub fn init_logger(cfg: &LoggerConfig) -> LoggerResult<()> {
    let timer = LoggerTimer::for_zone(cfg.tz);

    match cfg.format {
        LoggerFormat::Text => install::text(cfg, timer)?,
        LoggerFormat::Json => install::json(cfg, timer)?,
        LoggerFormat::Journald => install::journald(cfg)?,
    }

    if cfg.tz == LoggerTimeZone::Local && timer.is_utc_fallback() {
        warn!("local timezone could not be detected, logging timestamps in UTC");
    }
    Ok(())
}
