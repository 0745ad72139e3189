//! Configuration consumed by the delivery client.
//!
//! Everything is fixed at construction; there is no reconfiguration of a
//! running client.

use std::time::Duration;

use crate::core::{Result, ShipperError};

/// Collector endpoint used when no address override is given.
pub const DEFAULT_ENDPOINT: &str = "api.logmatic.io:10515";
/// Default number of attempts per delivery.
pub const DEFAULT_MAX_RETRIES: u32 = 5;
/// Default fixed pause between two attempts of one delivery.
pub const DEFAULT_RETRY_DELAY: Duration = Duration::from_secs(2);
/// Default timeout for establishing a TCP connection.
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);
/// Default timeout applied to socket writes.
pub const DEFAULT_WRITE_TIMEOUT: Duration = Duration::from_secs(5);

/// TLS settings for the collector connection.
#[derive(Clone, Debug, Default)]
pub struct TlsOptions {
    /// Name presented during the handshake. Defaults to the address host.
    pub domain: Option<String>,
    /// Skip certificate validation when true (intended for tests).
    pub insecure_skip_verify: bool,
}

/// Settings of a [`DeliveryClient`](super::DeliveryClient).
///
/// # Example
///
/// ```
/// use rust_log_shipper::DeliveryConfig;
/// use std::time::Duration;
///
/// let config = DeliveryConfig::new("<YOUR_API_KEY>")
///     .with_address("logs.example.com:1337")
///     .with_max_retries(10)
///     .with_retry_delay(Duration::from_millis(500));
///
/// assert!(config.validate().is_ok());
/// ```
#[derive(Clone, Debug)]
pub struct DeliveryConfig {
    /// Collector address as `host:port`
    pub address: String,
    /// Credential prefixed to every shipped line
    pub api_key: String,
    /// Attempts per delivery, connect and write combined
    pub max_retries: u32,
    /// Pause before every attempt except the first
    pub retry_delay: Duration,
    pub connect_timeout: Duration,
    pub write_timeout: Duration,
    /// `None` ships in plaintext
    pub tls: Option<TlsOptions>,
}

impl DeliveryConfig {
    /// Create a configuration for `api_key` with the default endpoint and
    /// retry policy.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            address: DEFAULT_ENDPOINT.to_string(),
            api_key: api_key.into(),
            max_retries: DEFAULT_MAX_RETRIES,
            retry_delay: DEFAULT_RETRY_DELAY,
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
            write_timeout: DEFAULT_WRITE_TIMEOUT,
            tls: Some(TlsOptions::default()),
        }
    }

    #[must_use]
    pub fn with_address(mut self, address: impl Into<String>) -> Self {
        self.address = address.into();
        self
    }

    #[must_use]
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    #[must_use]
    pub fn with_retry_delay(mut self, delay: Duration) -> Self {
        self.retry_delay = delay;
        self
    }

    #[must_use]
    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    #[must_use]
    pub fn with_write_timeout(mut self, timeout: Duration) -> Self {
        self.write_timeout = timeout;
        self
    }

    #[must_use]
    pub fn with_tls(mut self, tls: TlsOptions) -> Self {
        self.tls = Some(tls);
        self
    }

    /// Ship without TLS, e.g. to a collector on the local host
    #[must_use]
    pub fn with_plaintext(mut self) -> Self {
        self.tls = None;
        self
    }

    /// Check the settings before a client is built from them
    pub fn validate(&self) -> Result<()> {
        if self.api_key.trim().is_empty() {
            return Err(ShipperError::config("DeliveryConfig", "api key is empty"));
        }
        if self.max_retries == 0 {
            return Err(ShipperError::config(
                "DeliveryConfig",
                "max_retries must be at least 1",
            ));
        }
        if self.connect_timeout.is_zero() || self.write_timeout.is_zero() {
            return Err(ShipperError::config(
                "DeliveryConfig",
                "timeouts must be non-zero",
            ));
        }
        split_address(&self.address)?;
        Ok(())
    }
}

/// Split `host:port` into its parts. IPv6 hosts may be bracketed.
pub fn split_address(address: &str) -> Result<(&str, u16)> {
    let invalid = || {
        ShipperError::config(
            "DeliveryConfig",
            format!("address '{}' is not of the form host:port", address),
        )
    };

    let (host, port) = address.rsplit_once(':').ok_or_else(invalid)?;
    let host = host
        .strip_prefix('[')
        .and_then(|h| h.strip_suffix(']'))
        .unwrap_or(host);
    let port = port.parse::<u16>().map_err(|_| invalid())?;

    if host.is_empty() || port == 0 {
        return Err(invalid());
    }
    Ok((host, port))
}
