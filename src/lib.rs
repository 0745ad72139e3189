//! # Rust Log Shipper
//!
//! A resilient log-shipping client. Records are formatted as single-line
//! JSON, prefixed with an API key and delivered to a remote collector over
//! one long-lived TLS connection shared by every producer thread.
//!
//! ## Features
//!
//! - **Resilient**: lost connections are detected on write and replaced
//! - **Bounded**: each delivery makes a fixed number of attempts with a fixed pause
//! - **Thread Safe**: one client serves any number of concurrent callers
//! - **Swappable**: formatter and transport are traits

pub mod appenders;
pub mod core;
pub mod delivery;

pub mod prelude {
    pub use crate::appenders::ShippingAppender;
    pub use crate::core::{
        Appender, DeliveryMetrics, FieldValue, Fields, Formatter, JsonFormatter, LogLevel,
        LogRecord, Result, ShipperError,
    };
    pub use crate::delivery::{Connector, DeliveryClient, DeliveryConfig, TlsOptions};
}

pub use crate::appenders::ShippingAppender;
pub use crate::core::{
    Appender, DeliveryMetrics, FieldValue, Fields, Formatter, JsonFormatter, LogLevel, LogRecord,
    Result, ShipperError,
};
pub use crate::delivery::{
    Connection, Connector, DeliveryClient, DeliveryConfig, NetworkConnector, TlsOptions,
};
