//! Command-line arguments for `adextract-server`.
//!
//! | Option | Env | Default |
//! |--------|-----|---------|
//! | `--host` | `ADEXTRACT_HOST` | `0.0.0.0` |
//! | `--port` | `ADEXTRACT_PORT` | `8000` |
//!
//! Values from `.env` count as environment values; the binary seeds them
//! before parsing. Upstream credentials are read from the environment, see
//! [`adextract_core::config`].

use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use clap::Parser;

/// Shopify & Facebook Ads data extraction server
#[derive(Debug, Clone, Parser)]
#[command(name = "adextract-server", version, about)]
pub struct Cli {
    /// Address to bind
    #[arg(long, env = "ADEXTRACT_HOST", default_value_t = IpAddr::V4(Ipv4Addr::UNSPECIFIED))]
    pub host: IpAddr,

    /// Port to listen on
    #[arg(long, env = "ADEXTRACT_PORT", default_value_t = 8000)]
    pub port: u16,
}

impl Cli {
    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}
