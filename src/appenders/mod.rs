//! Appender implementations

pub mod shipping;

pub use shipping::ShippingAppender;

// Re-export trait for convenience
pub use crate::core::Appender;
