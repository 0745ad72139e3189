//! Appender trait invoked by the logging framework once per record

use super::{error::Result, log_level::LogLevel, log_record::LogRecord};

pub trait Appender: Send + Sync {
    /// Handle one record. Called concurrently from any producer thread.
    fn append(&self, record: &LogRecord) -> Result<()>;

    /// Levels this appender wants to receive
    fn levels(&self) -> &'static [LogLevel] {
        LogLevel::ALL
    }

    fn name(&self) -> &str;
}
