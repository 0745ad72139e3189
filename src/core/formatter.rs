//! Record-to-bytes formatting
//!
//! A [`Formatter`] turns one [`LogRecord`] into the newline-terminated
//! payload that is shipped to the collector. Formatters hold no connection
//! state and may be shared freely between threads.

use super::error::Result;
use super::fields::{FieldValue, Fields};
use super::log_record::LogRecord;
use chrono::SecondsFormat;

/// Key carrying the RFC 3339 timestamp
pub const DATE_KEY: &str = "date";
/// Key carrying the record message
pub const MESSAGE_KEY: &str = "message";
/// Key carrying the textual level
pub const LEVEL_KEY: &str = "level";

pub trait Formatter: Send + Sync {
    fn format(&self, record: &LogRecord) -> Result<Vec<u8>>;
}

/// Single-line JSON formatter used on the wire
///
/// Every record field is kept, error values are written as their
/// description, and `date`, `message` and `level` are added last. Those three
/// keys overwrite caller fields with the same name.
///
/// # Example
///
/// ```
/// use rust_log_shipper::prelude::*;
///
/// let record = LogRecord::new(LogLevel::Info, "user logged in").with_field("user_id", 42);
/// let payload = JsonFormatter::new().format(&record).unwrap();
///
/// assert_eq!(payload.last(), Some(&b'\n'));
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonFormatter;

impl JsonFormatter {
    pub fn new() -> Self {
        Self
    }

    fn to_fields(record: &LogRecord) -> Fields {
        let mut data = record.fields.clone();
        data.insert(
            DATE_KEY.to_string(),
            FieldValue::String(
                record
                    .timestamp
                    .to_rfc3339_opts(SecondsFormat::Secs, true),
            ),
        );
        data.insert(
            MESSAGE_KEY.to_string(),
            FieldValue::String(record.message.clone()),
        );
        data.insert(
            LEVEL_KEY.to_string(),
            FieldValue::String(record.level.as_str().to_string()),
        );
        data
    }
}

impl Formatter for JsonFormatter {
    fn format(&self, record: &LogRecord) -> Result<Vec<u8>> {
        let mut serialized = serde_json::to_vec(&Self::to_fields(record))?;
        serialized.push(b'\n');
        Ok(serialized)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{LogLevel, ShipperError};
    use chrono::{FixedOffset, TimeZone, Utc};
    use std::io;

    fn parse(payload: &[u8]) -> serde_json::Value {
        serde_json::from_slice(payload).expect("payload is valid JSON")
    }

    #[test]
    fn test_single_trailing_newline() {
        let record = LogRecord::new(LogLevel::Info, "line one\nline two");
        let payload = JsonFormatter::new().format(&record).unwrap();

        assert_eq!(payload.last(), Some(&b'\n'));
        assert_eq!(payload.iter().filter(|b| **b == b'\n').count(), 1);
    }

    #[test]
    fn test_injected_keys() {
        let ts = Utc.with_ymd_and_hms(2024, 3, 1, 12, 30, 45).unwrap();
        let record = LogRecord::new(LogLevel::Warn, "disk almost full")
            .with_timestamp(ts)
            .with_field("free_mb", 120i64);

        let json = parse(&JsonFormatter::new().format(&record).unwrap());
        assert_eq!(json["date"], "2024-03-01T12:30:45Z");
        assert_eq!(json["message"], "disk almost full");
        assert_eq!(json["level"], "warning");
        assert_eq!(json["free_mb"], 120);
    }

    #[test]
    fn test_date_keeps_offset() {
        let offset = FixedOffset::east_opt(7 * 3600).unwrap();
        let ts = offset.with_ymd_and_hms(2006, 1, 2, 15, 4, 5).unwrap();
        let record = LogRecord::new(LogLevel::Debug, "x").with_timestamp(ts);

        let json = parse(&JsonFormatter::new().format(&record).unwrap());
        assert_eq!(json["date"], "2006-01-02T15:04:05+07:00");
    }

    #[test]
    fn test_injected_keys_overwrite_caller_fields() {
        let record = LogRecord::new(LogLevel::Error, "real message")
            .with_field("message", "spoofed")
            .with_field("level", "info")
            .with_field("date", "yesterday");

        let json = parse(&JsonFormatter::new().format(&record).unwrap());
        assert_eq!(json["message"], "real message");
        assert_eq!(json["level"], "error");
        assert_ne!(json["date"], "yesterday");
    }

    #[test]
    fn test_error_field_uses_description() {
        let record = LogRecord::new(LogLevel::Error, "write failed")
            .with_error("error", io::Error::new(io::ErrorKind::Other, "connection reset"));

        let json = parse(&JsonFormatter::new().format(&record).unwrap());
        assert_eq!(json["error"], "connection reset");
    }

    #[test]
    fn test_unsupported_value_is_serialization_error() {
        let record = LogRecord::new(LogLevel::Info, "ratio").with_field("ratio", f64::NAN);

        let err = JsonFormatter::new().format(&record).unwrap_err();
        assert!(matches!(err, ShipperError::Serialization(_)));
        assert!(!err.is_retryable());
    }
}
