//! Server configuration sourced from the environment.

use std::env;
use std::net::SocketAddr;

use thiserror::Error;

/// Bind address used when `BIND_ADDR` is not set.
const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";

/// Environment variable naming the socket address to bind.
pub const BIND_ADDR_VAR: &str = "BIND_ADDR";

/// Runtime configuration for the HTTP server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    bind_addr: SocketAddr,
}

impl ServerConfig {
    /// Configuration with an explicit bind address.
    #[must_use]
    pub fn new(bind_addr: SocketAddr) -> Self {
        Self { bind_addr }
    }

    /// Read configuration from the environment, falling back to the
    /// default bind address when `BIND_ADDR` is absent.
    pub fn from_env() -> Result<Self, ConfigError> {
        let raw = env::var(BIND_ADDR_VAR).unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_owned());
        let bind_addr = raw
            .parse()
            .map_err(|_| ConfigError::InvalidBindAddr { raw })?;
        Ok(Self::new(bind_addr))
    }

    /// Socket address the server will bind to.
    #[must_use]
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
    }
}

/// Errors raised while assembling the configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("BIND_ADDR {raw:?} is not a valid socket address")]
    InvalidBindAddr { raw: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_address_round_trips() {
        let addr: SocketAddr = "127.0.0.1:8080".parse().expect("valid address");
        assert_eq!(ServerConfig::new(addr).bind_addr(), addr);
    }

    #[test]
    fn default_address_parses() {
        let addr: SocketAddr = DEFAULT_BIND_ADDR.parse().expect("default is valid");
        assert_eq!(addr.port(), 3000);
    }
}
