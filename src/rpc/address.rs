//! Validated control endpoint address.

use std::fmt;
use std::net::Ipv4Addr;

use url::Url;

use crate::config::Endpoint;
use crate::error::ValidationError;

/// Path of the command handler on the control endpoint.
pub const COMMAND_PATH: &str = "/daemon_command";

/// A control endpoint address that passed local validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TargetAddress {
    ip: Ipv4Addr,
    port: u16,
}

impl TargetAddress {
    /// Validates a host and port pair.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidHost`] unless `host` is a dotted
    /// IPv4 literal, and [`ValidationError::InvalidPort`] unless `port` is an
    /// integer in `1..=65535`.
    pub fn parse(host: &str, port: &str) -> Result<Self, ValidationError> {
        let ip = host
            .trim()
            .parse::<Ipv4Addr>()
            .map_err(|_| ValidationError::InvalidHost {
                value: host.to_string(),
            })?;

        let port = port
            .trim()
            .parse::<u16>()
            .ok()
            .filter(|p| *p != 0)
            .ok_or_else(|| ValidationError::InvalidPort {
                value: port.to_string(),
            })?;

        Ok(Self { ip, port })
    }

    /// Validates a configured endpoint.
    ///
    /// # Errors
    ///
    /// See [`TargetAddress::parse`].
    pub fn from_endpoint(endpoint: &Endpoint) -> Result<Self, ValidationError> {
        Self::parse(&endpoint.ip, &endpoint.port)
    }

    /// URL of the command handler on this endpoint.
    ///
    /// # Errors
    ///
    /// Returns the URL parser's error; not expected for a validated address.
    pub fn command_url(&self) -> Result<Url, url::ParseError> {
        Url::parse(&format!("http://{self}{COMMAND_PATH}"))
    }
}

impl fmt::Display for TargetAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.ip, self.port)
    }
}
