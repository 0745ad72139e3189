//! Core shipper types and traits

pub mod appender;
pub mod error;
pub mod fields;
pub mod formatter;
pub mod log_level;
pub mod log_record;
pub mod metrics;

pub use appender::Appender;
pub use error::{Result, ShipperError};
pub use fields::{FieldValue, Fields};
pub use formatter::{Formatter, JsonFormatter};
pub use log_level::LogLevel;
pub use log_record::LogRecord;
pub use metrics::DeliveryMetrics;
