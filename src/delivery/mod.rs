//! Delivery of formatted payloads to the remote collector

pub mod client;
pub mod config;
pub mod transport;

#[cfg(test)]
pub(crate) mod mock;

pub use client::DeliveryClient;
pub use config::{
    DeliveryConfig, TlsOptions, DEFAULT_CONNECT_TIMEOUT, DEFAULT_ENDPOINT, DEFAULT_MAX_RETRIES,
    DEFAULT_RETRY_DELAY, DEFAULT_WRITE_TIMEOUT,
};
pub use transport::{Connection, Connector, NetworkConnector};
