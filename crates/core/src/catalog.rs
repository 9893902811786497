//! Remote configuration catalog client
//!
//! The catalog server speaks a two-command text protocol: `list` returns
//! the available configuration names, `get <name>` returns the contents of
//! one configuration. The client sends the command, half-closes its write
//! side, and reads the reply to end of stream.

use std::io::{Read, Write};
use std::net::{Shutdown, TcpStream};
use std::time::Duration;

use tracing::debug;

use crate::error::SimError;

/// How long a read may stall before the request fails
const READ_TIMEOUT: Duration = Duration::from_secs(10);

/// Client for a configuration catalog server
#[derive(Debug, Clone)]
pub struct CatalogClient {
    addr: String,
}

impl CatalogClient {
    /// Client for the server at `addr` (`host:port`)
    #[must_use]
    pub fn new(addr: impl Into<String>) -> Self {
        Self { addr: addr.into() }
    }

    /// Names of the configurations the server offers
    ///
    /// # Errors
    ///
    /// `Catalog` on connection or transfer failure.
    pub fn list(&self) -> Result<String, SimError> {
        self.exchange("list")
    }

    /// Contents of the named configuration
    ///
    /// # Errors
    ///
    /// `Catalog` on connection or transfer failure.
    pub fn fetch(&self, name: &str) -> Result<String, SimError> {
        self.exchange(&format!("get {name}"))
    }

    fn exchange(&self, command: &str) -> Result<String, SimError> {
        debug!("catalog request to {}: {command}", self.addr);
        let mut stream = TcpStream::connect(self.addr.as_str())
            .map_err(|e| SimError::Catalog(format!("connect to {}: {e}", self.addr)))?;
        stream
            .set_read_timeout(Some(READ_TIMEOUT))
            .map_err(|e| SimError::Catalog(format!("set read timeout: {e}")))?;

        stream
            .write_all(command.as_bytes())
            .map_err(|e| SimError::Catalog(format!("send {command:?}: {e}")))?;
        stream
            .shutdown(Shutdown::Write)
            .map_err(|e| SimError::Catalog(format!("close write side: {e}")))?;

        let mut response = String::new();
        stream
            .read_to_string(&mut response)
            .map_err(|e| SimError::Catalog(format!("read response: {e}")))?;
        Ok(response)
    }
}
