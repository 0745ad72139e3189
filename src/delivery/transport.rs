//! Transport primitives for the delivery client.

use std::{
    io::{self, Write},
    net::{TcpStream, ToSocketAddrs},
    time::Duration,
};

use native_tls::TlsConnector;

use super::config::{split_address, DeliveryConfig};
use crate::core::Result;

/// Writable stream to the collector.
pub trait Connection: Write + Send {}

impl<T: Write + Send> Connection for T {}

/// Opens connections to the collector.
///
/// The client is generic over this so the network can be replaced by an
/// in-memory stream.
pub trait Connector: Send + Sync {
    fn connect(&self, address: &str) -> io::Result<Box<dyn Connection>>;
}

/// TCP connector with optional TLS.
pub struct NetworkConnector {
    tls: Option<TlsSettings>,
    connect_timeout: Duration,
    write_timeout: Duration,
}

struct TlsSettings {
    connector: TlsConnector,
    domain: Option<String>,
}

impl NetworkConnector {
    /// Build a connector from the client configuration.
    pub fn from_config(config: &DeliveryConfig) -> Result<Self> {
        let tls = match &config.tls {
            Some(options) => {
                let mut builder = TlsConnector::builder();
                if options.insecure_skip_verify {
                    builder.danger_accept_invalid_certs(true);
                    builder.danger_accept_invalid_hostnames(true);
                }
                Some(TlsSettings {
                    connector: builder.build()?,
                    domain: options.domain.clone(),
                })
            }
            None => None,
        };

        Ok(Self {
            tls,
            connect_timeout: config.connect_timeout,
            write_timeout: config.write_timeout,
        })
    }

    fn connect_tcp(&self, address: &str) -> io::Result<TcpStream> {
        let mut last_err = None;
        for addr in address.to_socket_addrs()? {
            match TcpStream::connect_timeout(&addr, self.connect_timeout) {
                Ok(stream) => {
                    stream.set_nodelay(true)?;
                    stream.set_write_timeout(Some(self.write_timeout))?;
                    return Ok(stream);
                }
                Err(err) => last_err = Some(err),
            }
        }
        Err(last_err.unwrap_or_else(|| {
            io::Error::new(
                io::ErrorKind::NotFound,
                format!("no socket addresses resolved for {}", address),
            )
        }))
    }
}

impl Connector for NetworkConnector {
    fn connect(&self, address: &str) -> io::Result<Box<dyn Connection>> {
        let stream = self.connect_tcp(address)?;

        let Some(tls) = &self.tls else {
            return Ok(Box::new(stream));
        };

        let domain = match &tls.domain {
            Some(domain) => domain.as_str(),
            None => split_address(address)
                .map_err(|err| io::Error::new(io::ErrorKind::InvalidInput, err.to_string()))?
                .0,
        };

        // Bound the handshake, then leave reads unbounded again
        stream.set_read_timeout(Some(self.connect_timeout))?;
        let stream = tls
            .connector
            .connect(domain, stream)
            .map_err(io::Error::other)?;
        stream.get_ref().set_read_timeout(None)?;

        Ok(Box::new(stream))
    }
}
