//! Server configuration from environment variables.

use std::net::SocketAddr;

use anyhow::{Context, Result};

/// Configuration for the HTTP server.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address the server binds to.
    pub addr: SocketAddr,

    /// Number of simulated orders seeded at startup.
    pub seed_orders: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            addr: SocketAddr::from(([0, 0, 0, 0], 8002)),
            seed_orders: 100,
        }
    }
}

impl ServerConfig {
    /// Build the configuration from `DESKRELAY_ADDR` and
    /// `DESKRELAY_SEED_ORDERS`, falling back to defaults.
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();

        let addr = match std::env::var("DESKRELAY_ADDR") {
            Ok(raw) => raw
                .parse()
                .with_context(|| format!("invalid DESKRELAY_ADDR: {raw}"))?,
            Err(_) => defaults.addr,
        };

        let seed_orders = match std::env::var("DESKRELAY_SEED_ORDERS") {
            Ok(raw) => raw
                .parse()
                .with_context(|| format!("invalid DESKRELAY_SEED_ORDERS: {raw}"))?,
            Err(_) => defaults.seed_orders,
        };

        Ok(Self { addr, seed_orders })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn defaults_bind_all_interfaces() {
        let config = ServerConfig::default();
        assert_eq!(config.addr.port(), 8002);
        assert_eq!(config.seed_orders, 100);
    }
}
