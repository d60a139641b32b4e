use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing_subscriber::EnvFilter;

use crate::logger::error::LoggerError;

const DEFAULT_LEVEL: &str = "info";

/// Validated `EnvFilter` directive string, e.g. `"info"` or `"imgserve_core=trace,warn"`.
///
/// Validation happens on construction, so a config holding a `LoggerLevel`
/// always yields a usable filter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct LoggerLevel(String);

impl LoggerLevel {
    pub fn new(directives: impl Into<String>) -> Result<Self, LoggerError> {
        let directives = directives.into();
        EnvFilter::try_new(&directives)
            .map_err(|e| LoggerError::InvalidLevel(format!("{directives}: {e}")))?;
        Ok(Self(directives))
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Build the filter for a subscriber.
    pub fn to_env_filter(&self) -> EnvFilter {
        EnvFilter::try_new(&self.0).unwrap_or_else(|_| EnvFilter::new(DEFAULT_LEVEL))
    }
}

impl Default for LoggerLevel {
    fn default() -> Self {
        Self(DEFAULT_LEVEL.to_string())
    }
}

impl FromStr for LoggerLevel {
    type Err = LoggerError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for LoggerLevel {
    type Error = LoggerError;
    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl From<LoggerLevel> for String {
    fn from(l: LoggerLevel) -> Self {
        l.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_levels_and_directives() {
        for lvl in ["info", "warn", "trace", "imgserve_core=trace,imgserve_model=debug,info"] {
            let parsed = lvl.parse::<LoggerLevel>();
            assert!(parsed.is_ok(), "expected {lvl} to parse, got {parsed:?}");
        }
    }

    #[test]
    fn rejects_unknown_level_names() {
        for lvl in ["imgserve_core=loud", "a=trace,b=wat"] {
            assert!(
                matches!(lvl.parse::<LoggerLevel>(), Err(LoggerError::InvalidLevel(_))),
                "expected {lvl} to be rejected"
            );
        }
    }

    #[test]
    fn default_is_info() {
        assert_eq!(LoggerLevel::default().as_str(), "info");
    }

    #[test]
    fn serde_validates_on_deserialize() {
        let lvl: LoggerLevel = serde_json::from_str(r#""debug""#).unwrap();
        assert_eq!(lvl.as_str(), "debug");
        assert_eq!(serde_json::to_string(&lvl).unwrap(), r#""debug""#);

        assert!(serde_json::from_str::<LoggerLevel>(r#""x=nope""#).is_err());
    }
}
