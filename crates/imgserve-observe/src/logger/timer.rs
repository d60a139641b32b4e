use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use time::{OffsetDateTime, UtcOffset, format_description::well_known::Rfc3339};
use tracing_subscriber::fmt::{format::Writer, time::FormatTime};

use crate::logger::error::LoggerError;

/// Timezone used for log timestamps.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum LoggerTimeZone {
    #[default]
    Utc,
    /// Offset of the host, detected once when the logger is installed.
    Local,
}

impl FromStr for LoggerTimeZone {
    type Err = LoggerError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "utc" => Ok(Self::Utc),
            "local" => Ok(Self::Local),
            _ => Err(LoggerError::InvalidTimeZone(s.to_string())),
        }
    }
}

impl TryFrom<String> for LoggerTimeZone {
    type Error = LoggerError;
    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<LoggerTimeZone> for String {
    fn from(tz: LoggerTimeZone) -> Self {
        tz.to_string()
    }
}

impl fmt::Display for LoggerTimeZone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            LoggerTimeZone::Utc => "utc",
            LoggerTimeZone::Local => "local",
        })
    }
}

/// RFC 3339 timestamp formatter with a fixed UTC offset.
///
/// The offset is resolved once, when the timer is built: detecting the local
/// offset is unreliable once other threads are running.
#[derive(Debug, Clone, Copy)]
pub struct LoggerTimer {
    offset: UtcOffset,
    utc_fallback: bool,
}

impl LoggerTimer {
    pub fn utc() -> Self {
        Self {
            offset: UtcOffset::UTC,
            utc_fallback: false,
        }
    }

    /// Build a timer for `tz`, falling back to UTC if the local offset is unavailable.
    pub fn for_zone(tz: LoggerTimeZone) -> Self {
        match tz {
            LoggerTimeZone::Utc => Self::utc(),
            LoggerTimeZone::Local => match UtcOffset::current_local_offset() {
                Ok(offset) => Self {
                    offset,
                    utc_fallback: false,
                },
                Err(_) => Self {
                    offset: UtcOffset::UTC,
                    utc_fallback: true,
                },
            },
        }
    }

    pub fn offset(&self) -> UtcOffset {
        self.offset
    }

    /// `true` if a local offset was requested but UTC is used instead.
    pub fn is_utc_fallback(&self) -> bool {
        self.utc_fallback
    }

    fn timestamp(&self, at: OffsetDateTime) -> String {
        at.to_offset(self.offset)
            .format(&Rfc3339)
            .unwrap_or_else(|_| "<invalid-time>".to_string())
    }
}

impl FormatTime for LoggerTimer {
    fn format_time(&self, w: &mut Writer<'_>) -> fmt::Result {
        write!(w, "{}", self.timestamp(OffsetDateTime::now_utc()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zone_parses_case_insensitive() {
        assert_eq!("UTC".parse::<LoggerTimeZone>().unwrap(), LoggerTimeZone::Utc);
        assert_eq!(" local ".parse::<LoggerTimeZone>().unwrap(), LoggerTimeZone::Local);
        assert!("pst".parse::<LoggerTimeZone>().is_err());
        assert!("".parse::<LoggerTimeZone>().is_err());
    }

    #[test]
    fn zone_serde_uses_canonical_names() {
        let json = serde_json::to_string(&LoggerTimeZone::Local).unwrap();
        assert_eq!(json, r#""local""#);

        let tz: LoggerTimeZone = serde_json::from_str(r#""Utc""#).unwrap();
        assert_eq!(tz, LoggerTimeZone::Utc);
    }

    #[test]
    fn utc_timer_formats_rfc3339() {
        let timer = LoggerTimer::for_zone(LoggerTimeZone::Utc);
        assert!(!timer.is_utc_fallback());

        let at = OffsetDateTime::from_unix_timestamp(0).unwrap();
        assert_eq!(timer.timestamp(at), "1970-01-01T00:00:00Z");
    }

    #[test]
    fn format_time_writes_bare_timestamp() {
        let mut buf = String::new();
        LoggerTimer::for_zone(LoggerTimeZone::Utc)
            .format_time(&mut Writer::new(&mut buf))
            .unwrap();

        assert_eq!(buf.trim(), buf);
        assert!(buf.ends_with('Z'), "{buf}");
        assert_eq!(buf.as_bytes()[10], b'T', "{buf}");
    }

    #[test]
    fn fixed_offset_is_applied() {
        let timer = LoggerTimer {
            offset: UtcOffset::from_hms(3, 30, 0).unwrap(),
            utc_fallback: false,
        };
        let at = OffsetDateTime::from_unix_timestamp(0).unwrap();
        assert_eq!(timer.timestamp(at), "1970-01-01T03:30:00+03:30");
    }

    #[test]
    fn local_timer_offset_is_sane() {
        let timer = LoggerTimer::for_zone(LoggerTimeZone::Local);
        assert!(timer.offset().whole_hours().abs() <= 14);
    }
}
