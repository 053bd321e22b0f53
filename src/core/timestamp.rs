//! Timestamp formatting for console output
//!
//! The default reproduces the classic `2025-01-08 10:30:45 123` layout in
//! local time. ISO 8601, RFC 3339, Unix millis and custom strftime formats
//! are also available.

use chrono::{DateTime, Local, TimeZone};
use serde::{Deserialize, Serialize};

const CLASSIC_FORMAT: &str = "%Y-%m-%d %H:%M:%S %3f";

/// Timestamp format options
///
/// # Examples
///
/// ```
/// use rust_log_facade::core::TimestampFormat;
///
/// let format = TimestampFormat::Custom("%Y-%m-%d".to_string());
/// assert_eq!(format.now().len(), 10);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimestampFormat {
    /// `2025-01-08 10:30:45 123`
    #[default]
    Classic,

    /// ISO 8601 with milliseconds: `2025-01-08T10:30:45.123+00:00`
    Iso8601,

    /// RFC 3339: `2025-01-08T10:30:45.123456+00:00`
    Rfc3339,

    /// Unix timestamp in milliseconds: `1736332245123`
    UnixMillis,

    /// Custom strftime format
    Custom(String),
}

impl TimestampFormat {
    /// Format a timestamp in any timezone according to this format
    #[must_use]
    pub fn format<Tz>(&self, datetime: &DateTime<Tz>) -> String
    where
        Tz: TimeZone,
        Tz::Offset: std::fmt::Display,
    {
        match self {
            TimestampFormat::Classic => datetime.format(CLASSIC_FORMAT).to_string(),
            TimestampFormat::Iso8601 => datetime.format("%Y-%m-%dT%H:%M:%S%.3f%:z").to_string(),
            TimestampFormat::Rfc3339 => datetime.to_rfc3339(),
            TimestampFormat::UnixMillis => datetime.timestamp_millis().to_string(),
            TimestampFormat::Custom(format_str) => datetime.format(format_str).to_string(),
        }
    }

    /// Format the current local time
    #[must_use]
    pub fn now(&self) -> String {
        self.format(&Local::now())
    }
}
