//! Shipping appender for remote logging
//!
//! Formats each record and hands it to a [`DeliveryClient`], prefixed with
//! the API key: `<api key> <formatted record>\n`.

use crate::core::{Appender, Formatter, JsonFormatter, LogRecord, Result};
use crate::delivery::{Connector, DeliveryClient, DeliveryConfig, NetworkConnector};

/// Appender that ships every record to the collector
///
/// # Example
///
/// ```no_run
/// use rust_log_shipper::prelude::*;
///
/// let appender = ShippingAppender::new(DeliveryConfig::new("<YOUR_API_KEY>"))
///     .expect("valid configuration");
///
/// let record = LogRecord::new(LogLevel::Info, "service started").with_field("port", 8080);
/// if let Err(e) = appender.append(&record) {
///     eprintln!("log line dropped: {}", e);
/// }
/// ```
pub struct ShippingAppender<F: Formatter = JsonFormatter, C: Connector = NetworkConnector> {
    formatter: F,
    client: DeliveryClient<C>,
}

impl ShippingAppender<JsonFormatter, NetworkConnector> {
    /// Create an appender shipping JSON lines over the network
    ///
    /// # Errors
    ///
    /// Returns error if the configuration is invalid
    pub fn new(config: DeliveryConfig) -> Result<Self> {
        Ok(Self::with_parts(JsonFormatter::new(), DeliveryClient::new(config)?))
    }
}

impl<F: Formatter, C: Connector> ShippingAppender<F, C> {
    pub fn with_parts(formatter: F, client: DeliveryClient<C>) -> Self {
        Self { formatter, client }
    }

    pub fn client(&self) -> &DeliveryClient<C> {
        &self.client
    }

    /// Build the wire line for `record`
    fn payload(&self, record: &LogRecord) -> Result<Vec<u8>> {
        let body = self.formatter.format(record)?;
        let api_key = self.client.config().api_key.as_bytes();

        let mut payload = Vec::with_capacity(api_key.len() + 1 + body.len());
        payload.extend_from_slice(api_key);
        payload.push(b' ');
        payload.extend_from_slice(&body);
        Ok(payload)
    }
}

impl<F: Formatter, C: Connector> Appender for ShippingAppender<F, C> {
    fn append(&self, record: &LogRecord) -> Result<()> {
        let payload = self.payload(record)?;
        self.client.deliver(&payload)?;
        Ok(())
    }

    fn name(&self) -> &str {
        "shipping"
    }
}
