//! Delivery client owning the shared collector connection
//!
//! One connection is shared by every caller of [`DeliveryClient::deliver`].
//! The handle is either absent or assumed writable; a stale handle is only
//! discovered when a write on it fails, at which point it is discarded and
//! a later attempt reconnects.
//!
//! Locking is narrow:
//! - `connect_lock` serializes establishing and installing a new handle.
//! - `connection` guards the slot itself and is only held long enough to
//!   clone, install or clear the `Arc`, never across network I/O.
//! - Each handle carries its own stream mutex so concurrent writers never
//!   interleave bytes of two lines.

use std::io::Write;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::thread;

use log::{debug, error, warn};
use parking_lot::{Mutex, RwLock};

use super::config::DeliveryConfig;
use super::transport::{Connection, Connector, NetworkConnector};
use crate::core::{DeliveryMetrics, Result, ShipperError};

struct Handle {
    id: u64,
    stream: Mutex<Box<dyn Connection>>,
}

impl Handle {
    fn write(&self, payload: &[u8]) -> std::io::Result<()> {
        let mut stream = self.stream.lock();
        stream.write_all(payload)?;
        stream.flush()
    }
}

/// Ships payloads to the collector, reconnecting and retrying on failure.
///
/// # Example
///
/// ```no_run
/// use rust_log_shipper::{DeliveryClient, DeliveryConfig};
///
/// let client = DeliveryClient::new(DeliveryConfig::new("<YOUR_API_KEY>"))
///     .expect("valid configuration");
///
/// client.deliver(b"<YOUR_API_KEY> {\"message\":\"hello\"}\n")?;
/// # Ok::<(), rust_log_shipper::ShipperError>(())
/// ```
pub struct DeliveryClient<C: Connector = NetworkConnector> {
    config: DeliveryConfig,
    connector: C,
    connection: RwLock<Option<Arc<Handle>>>,
    connect_lock: Mutex<()>,
    next_handle_id: AtomicU64,
    metrics: DeliveryMetrics,
}

impl DeliveryClient<NetworkConnector> {
    /// Create a client that connects over TCP (and TLS unless disabled).
    ///
    /// An initial connection is attempted; failing it is not an error, the
    /// first delivery will retry.
    ///
    /// # Errors
    ///
    /// Returns error if the configuration is invalid or the TLS connector
    /// cannot be built.
    pub fn new(config: DeliveryConfig) -> Result<Self> {
        let connector = NetworkConnector::from_config(&config)?;
        Self::with_connector(config, connector)
    }
}

impl<C: Connector> DeliveryClient<C> {
    /// Create a client on top of a custom connector.
    pub fn with_connector(config: DeliveryConfig, connector: C) -> Result<Self> {
        config.validate()?;

        let client = Self {
            config,
            connector,
            connection: RwLock::new(None),
            connect_lock: Mutex::new(()),
            next_handle_id: AtomicU64::new(1),
            metrics: DeliveryMetrics::new(),
        };

        if let Err(e) = client.reconnect() {
            warn!("[LOG SHIPPER] Initial connection failed, will retry on first delivery: {}", e);
        }

        Ok(client)
    }

    /// Write `payload` to the collector.
    ///
    /// Makes up to `max_retries` attempts. Every attempt but the first waits
    /// `retry_delay`, reconnects if no connection is held, and writes the
    /// whole payload. A failed write drops the connection so the next
    /// attempt starts from a fresh one; the payload is re-sent in full.
    ///
    /// # Errors
    ///
    /// Returns [`ShipperError::RetryExhausted`] once every attempt failed.
    pub fn deliver(&self, payload: &[u8]) -> Result<usize> {
        let attempts = self.config.max_retries;
        let mut last_error = None;

        for attempt in 0..attempts {
            if attempt > 0 && !self.config.retry_delay.is_zero() {
                thread::sleep(self.config.retry_delay);
            }

            let handle = match self.current() {
                Some(handle) => handle,
                None => match self.reconnect() {
                    Ok(handle) => handle,
                    Err(e) => {
                        warn!(
                            "[LOG SHIPPER] Attempt {}/{}: {}",
                            attempt + 1,
                            attempts,
                            e
                        );
                        last_error = Some(e);
                        continue;
                    }
                },
            };

            match handle.write(payload) {
                Ok(()) => {
                    self.metrics.record_delivered(payload.len());
                    return Ok(payload.len());
                }
                Err(source) => {
                    self.metrics.record_write_failure();
                    self.discard(&handle);
                    let e = ShipperError::write(&self.config.address, source);
                    warn!(
                        "[LOG SHIPPER] Attempt {}/{}: {}; making a new attempt",
                        attempt + 1,
                        attempts,
                        e
                    );
                    last_error = Some(e);
                }
            }
        }

        self.metrics.record_failed();
        let last = last_error.unwrap_or_else(|| {
            ShipperError::config("DeliveryConfig", "max_retries must be at least 1")
        });
        error!(
            "[LOG SHIPPER] Dropping log line after {} failed attempts to {}",
            attempts, self.config.address
        );
        Err(ShipperError::retry_exhausted(
            attempts,
            &self.config.address,
            last,
        ))
    }

    /// Whether a connection handle is currently held.
    ///
    /// A held handle may still be stale; that is only found out by writing.
    pub fn is_connected(&self) -> bool {
        self.connection.read().is_some()
    }

    /// Drop the current connection; the next delivery reconnects.
    pub fn disconnect(&self) {
        if let Some(handle) = self.connection.write().take() {
            debug!("[LOG SHIPPER] Connection #{} closed", handle.id);
        }
    }

    pub fn config(&self) -> &DeliveryConfig {
        &self.config
    }

    pub fn metrics(&self) -> &DeliveryMetrics {
        &self.metrics
    }

    fn current(&self) -> Option<Arc<Handle>> {
        self.connection.read().clone()
    }

    /// Establish and install a new handle.
    fn reconnect(&self) -> Result<Arc<Handle>> {
        let _guard = self.connect_lock.lock();

        // Another caller may have reconnected while we waited for the lock
        if let Some(handle) = self.current() {
            return Ok(handle);
        }

        self.metrics.record_connect_attempt();
        match self.connector.connect(&self.config.address) {
            Ok(stream) => {
                let handle = Arc::new(Handle {
                    id: self.next_handle_id.fetch_add(1, Ordering::Relaxed),
                    stream: Mutex::new(stream),
                });
                *self.connection.write() = Some(Arc::clone(&handle));
                debug!(
                    "[LOG SHIPPER] Connection #{} established to {}",
                    handle.id, self.config.address
                );
                Ok(handle)
            }
            Err(source) => {
                self.metrics.record_connect_failure();
                Err(ShipperError::connect(&self.config.address, source))
            }
        }
    }

    /// Clear the slot only if it still holds `stale`.
    fn discard(&self, stale: &Arc<Handle>) {
        let mut slot = self.connection.write();
        if slot.as_ref().is_some_and(|current| Arc::ptr_eq(current, stale)) {
            *slot = None;
            debug!("[LOG SHIPPER] Connection #{} discarded", stale.id);
        }
    }
}
