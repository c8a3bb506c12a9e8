//! Timestamp Formatting
//!
//! Alert timestamps are shown in the operator's timezone using a fixed
//! `YYYY-MM-DD HH:mm:ss` layout. When the configured zone cannot be
//! resolved the formatter degrades to RFC 3339 instead of failing.

use chrono::{DateTime, FixedOffset, SecondsFormat};
use chrono_tz::Tz;
use std::fmt;
use tracing::{info, warn};

/// Zone used when none is configured (UTC+8, no DST)
pub const DEFAULT_TIMEZONE: &str = "Asia/Shanghai";

/// strftime layout of the primary path
pub const TIME_LAYOUT: &str = "%Y-%m-%d %H:%M:%S";

/// Result of formatting one instant
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormattedTime {
    /// Converted into the configured zone
    Local(String),
    /// Zone unavailable; RFC 3339 in the instant's own offset
    Fallback(String),
}

impl FormattedTime {
    /// Formatted text regardless of path
    pub fn as_str(&self) -> &str {
        match self {
            FormattedTime::Local(text) | FormattedTime::Fallback(text) => text,
        }
    }
}

impl fmt::Display for FormattedTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Formats instants in a named timezone
#[derive(Debug, Clone)]
pub struct TimeFormatter {
    zone_name: String,
    zone: Option<Tz>,
}

impl TimeFormatter {
    /// Create a formatter for an IANA zone name
    ///
    /// An unknown name is logged once here; every later `format` call then
    /// takes the fallback path.
    pub fn new(zone_name: &str) -> Self {
        let zone = match zone_name.parse::<Tz>() {
            Ok(zone) => {
                info!("Formatting alert timestamps in {}", zone_name);
                Some(zone)
            }
            Err(e) => {
                warn!(
                    timezone = %zone_name,
                    error = %e,
                    "Error loading timezone, timestamps fall back to RFC 3339"
                );
                None
            }
        };

        Self {
            zone_name: zone_name.to_string(),
            zone,
        }
    }

    /// Configured zone name
    pub fn zone_name(&self) -> &str {
        &self.zone_name
    }

    /// Whether the configured zone failed to resolve
    pub fn is_degraded(&self) -> bool {
        self.zone.is_none()
    }

    /// Format an instant, dropping sub-second precision
    pub fn format(&self, instant: &DateTime<FixedOffset>) -> FormattedTime {
        match &self.zone {
            Some(zone) => FormattedTime::Local(
                instant.with_timezone(zone).format(TIME_LAYOUT).to_string(),
            ),
            None => FormattedTime::Fallback(instant.to_rfc3339_opts(SecondsFormat::Secs, true)),
        }
    }
}

impl Default for TimeFormatter {
    fn default() -> Self {
        Self::new(DEFAULT_TIMEZONE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn instant(raw: &str) -> DateTime<FixedOffset> {
        DateTime::parse_from_rfc3339(raw).unwrap()
    }

    #[test]
    fn test_shanghai_is_utc_plus_eight() {
        let formatter = TimeFormatter::default();
        let formatted = formatter.format(&instant("2024-01-15T10:30:00Z"));

        assert_eq!(formatted, FormattedTime::Local("2024-01-15 18:30:00".into()));
    }

    #[test]
    fn test_crosses_midnight() {
        let formatter = TimeFormatter::default();
        let formatted = formatter.format(&instant("2024-12-31T20:05:09Z"));

        assert_eq!(formatted.as_str(), "2025-01-01 04:05:09");
    }

    #[test]
    fn test_sub_seconds_truncated() {
        let formatter = TimeFormatter::default();
        let formatted = formatter.format(&instant("2024-01-15T10:30:00.999Z"));

        assert_eq!(formatted.as_str(), "2024-01-15 18:30:00");
    }

    #[test]
    fn test_source_offset_ignored() {
        let formatter = TimeFormatter::default();
        let formatted = formatter.format(&instant("2024-01-15T12:30:00+02:00"));

        assert_eq!(formatted.as_str(), "2024-01-15 18:30:00");
    }

    #[test]
    fn test_no_daylight_saving_shift() {
        let formatter = TimeFormatter::default();
        let formatted = formatter.format(&instant("2024-07-15T10:30:00Z"));

        assert_eq!(formatted.as_str(), "2024-07-15 18:30:00");
    }

    #[test]
    fn test_other_zone() {
        let formatter = TimeFormatter::new("UTC");
        let formatted = formatter.format(&instant("2024-01-15T10:30:00Z"));

        assert_eq!(formatted.as_str(), "2024-01-15 10:30:00");
        assert!(!formatter.is_degraded());
    }

    #[test]
    fn test_unknown_zone_falls_back_to_rfc3339() {
        let formatter = TimeFormatter::new("Mars/Olympus_Mons");
        assert!(formatter.is_degraded());

        let utc = formatter.format(&instant("2024-01-15T10:30:00.250Z"));
        assert_eq!(utc, FormattedTime::Fallback("2024-01-15T10:30:00Z".into()));

        let offset = formatter.format(&instant("2024-01-15T18:30:00+08:00"));
        assert_eq!(
            offset,
            FormattedTime::Fallback("2024-01-15T18:30:00+08:00".into())
        );
    }
}
