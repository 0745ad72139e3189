//! Error types for the log shipper

pub type Result<T> = std::result::Result<T, ShipperError>;

#[derive(Debug, thiserror::Error)]
pub enum ShipperError {
    /// Establishing the stream failed (DNS, TCP or TLS handshake)
    #[error("Unable to connect to {address}: {source}")]
    Connect {
        address: String,
        #[source]
        source: std::io::Error,
    },

    /// An established stream failed a write
    #[error("Unable to send log line to {address}: {source}")]
    Write {
        address: String,
        #[source]
        source: std::io::Error,
    },

    /// Record fields could not be encoded
    #[error("Failed to marshal fields to JSON: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Every attempt of a delivery failed
    #[error("Failed to deliver log line to {address} after {attempts} attempts")]
    RetryExhausted {
        attempts: u32,
        address: String,
        #[source]
        source: Box<ShipperError>,
    },

    /// Invalid configuration with details
    #[error("Invalid configuration for {component}: {message}")]
    InvalidConfiguration { component: String, message: String },

    /// TLS connector could not be built
    #[error("TLS error: {0}")]
    Tls(#[from] native_tls::Error),
}

impl ShipperError {
    /// Create a connect error for the given address
    pub fn connect(address: impl Into<String>, source: std::io::Error) -> Self {
        ShipperError::Connect {
            address: address.into(),
            source,
        }
    }

    /// Create a write error for the given address
    pub fn write(address: impl Into<String>, source: std::io::Error) -> Self {
        ShipperError::Write {
            address: address.into(),
            source,
        }
    }

    /// Create a retry exhaustion error wrapping the last attempt's failure
    pub fn retry_exhausted(attempts: u32, address: impl Into<String>, last: ShipperError) -> Self {
        ShipperError::RetryExhausted {
            attempts,
            address: address.into(),
            source: Box::new(last),
        }
    }

    /// Create an invalid configuration error
    pub fn config(component: impl Into<String>, message: impl Into<String>) -> Self {
        ShipperError::InvalidConfiguration {
            component: component.into(),
            message: message.into(),
        }
    }

    /// Whether a later attempt may succeed where this one failed
    pub fn is_retryable(&self) -> bool {
        matches!(self, ShipperError::Connect { .. } | ShipperError::Write { .. })
    }

    /// Whether this is the terminal failure of a delivery
    pub fn is_exhausted(&self) -> bool {
        matches!(self, ShipperError::RetryExhausted { .. })
    }
}
