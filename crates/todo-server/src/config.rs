//! Server configuration from environment variables

use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use anyhow::{Context, Result};

pub const DEFAULT_LOG_FILTER: &str =
    "todomatic_server=debug,todomatic_core=debug,tower_http=debug,socketioxide=info";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: IpAddr,
    pub http_port: u16,
    pub socket_port: u16,
    /// Start with the example tasks instead of an empty list
    pub seed_examples: bool,
    /// Refuse blank task names at the input boundary
    pub strict_names: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            http_port: 8081,
            socket_port: 8080,
            seed_examples: true,
            strict_names: true,
        }
    }
}

impl ServerConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let defaults = Self::default();

        let host = match lookup("TODOMATIC_HOST") {
            Some(raw) => raw
                .trim()
                .parse()
                .with_context(|| format!("TODOMATIC_HOST is not an IP address: {raw:?}"))?,
            None => defaults.host,
        };

        Ok(Self {
            host,
            http_port: port(&lookup, "TODOMATIC_PORT", defaults.http_port)?,
            socket_port: port(&lookup, "TODOMATIC_SOCKET_PORT", defaults.socket_port)?,
            seed_examples: flag(&lookup, "TODOMATIC_SEED", defaults.seed_examples),
            strict_names: flag(&lookup, "TODOMATIC_STRICT_NAMES", defaults.strict_names),
        })
    }

    pub fn http_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.http_port)
    }

    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.socket_port)
    }
}

fn port(lookup: &impl Fn(&str) -> Option<String>, name: &str, default: u16) -> Result<u16> {
    match lookup(name) {
        Some(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("{name} is not a valid port: {raw:?}")),
        None => Ok(default),
    }
}

fn flag(lookup: &impl Fn(&str) -> Option<String>, name: &str, default: bool) -> bool {
    match lookup(name) {
        Some(raw) => match raw.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => true,
            "0" | "false" | "no" | "off" => false,
            _ => default,
        },
        None => default,
    }
}
