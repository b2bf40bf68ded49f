//! Client configuration and API URL construction.

use anyhow::{Result, anyhow};

/// Scheme used to reach the API host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Protocol {
    Http,
    Https,
}

impl Protocol {
    /// Picks the scheme for a host when none is given explicitly:
    /// plain http only for local development, TLS for everything else.
    pub fn for_host(host: &str) -> Self {
        if host == "localhost" {
            Protocol::Http
        } else {
            Protocol::Https
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Protocol::Http => "http",
            Protocol::Https => "https",
        }
    }

    pub fn is_secure(self) -> bool {
        self == Protocol::Https
    }
}

impl std::fmt::Display for Protocol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Connection settings for a VolunteerSavvy deployment.
///
/// Immutable once handed to a client; every request built from it targets
/// the same `{protocol}://{host}{port}` origin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub host: String,
    /// Port suffix appended verbatim to the host, e.g. `":8080"`.
    /// Empty means the scheme default.
    pub port: String,
    pub protocol: Protocol,
}

impl ClientConfig {
    pub fn new(host: impl Into<String>) -> Self {
        let host = host.into();
        let protocol = Protocol::for_host(&host);
        Self {
            host,
            port: String::new(),
            protocol,
        }
    }

    pub fn with_port(mut self, port: impl Into<String>) -> Self {
        self.port = port.into();
        self
    }

    pub fn with_protocol(mut self, protocol: Protocol) -> Self {
        self.protocol = protocol;
        self
    }

    /// Builds the absolute URL for an API endpoint.
    ///
    /// All endpoints live under the fixed `/vs` path prefix. The endpoint
    /// must begin with `/`; anything else is rejected rather than guessed at.
    pub fn endpoint_url(&self, endpoint: &str) -> Result<String> {
        if !endpoint.starts_with('/') {
            return Err(anyhow!(
                "Endpoint must begin with '/', got {:?}",
                endpoint
            ));
        }
        Ok(format!(
            "{}://{}{}/vs{}",
            self.protocol, self.host, self.port, endpoint
        ))
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new("localhost")
    }
}
