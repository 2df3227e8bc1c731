use crate::error::ConfigError;
use serde::Deserialize;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

/// The root configuration structure for the entire application.
///
/// Every section is optional in the file; missing values fall back to the
/// defaults below.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerSettings,
    pub market_data: MarketDataSettings,
    pub archive: ArchiveSettings,
    pub logging: LoggingSettings,
}

/// Where the HTTP adapter listens.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    pub host: IpAddr,
    pub port: u16,
}

/// Parameters for the market data client.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct MarketDataSettings {
    /// Scheme and host of the chart API, without a trailing path.
    pub base_url: String,
    /// Upper bound for a single ticker fetch. A fetch that takes longer fails
    /// that ticker only.
    pub timeout_secs: u64,
    /// Sent with every request; the chart API rejects requests without one.
    pub user_agent: String,
}

/// The optional on-disk dump of raw fetched prices.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ArchiveSettings {
    pub enabled: bool,
    pub output_dir: PathBuf,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// An `EnvFilter` directive, e.g. "info" or "comparison=debug,info".
    /// `RUST_LOG` takes precedence when set.
    pub level: String,
    /// Directory for daily-rolling log files. Empty disables file logging.
    pub directory: String,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: IpAddr::from([127, 0, 0, 1]),
            port: 5000,
        }
    }
}

impl Default for MarketDataSettings {
    fn default() -> Self {
        Self {
            base_url: "https://query1.finance.yahoo.com".to_string(),
            timeout_secs: 10,
            user_agent: "Mozilla/5.0 (compatible; stockpulse/0.1)".to_string(),
        }
    }
}

impl Default for ArchiveSettings {
    fn default() -> Self {
        Self {
            enabled: false,
            output_dir: PathBuf::from("output"),
        }
    }
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            directory: String::new(),
        }
    }
}

impl ServerSettings {
    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

impl Config {
    /// Checks the invariants serde cannot express.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.market_data.base_url.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "market_data.base_url must not be empty".to_string(),
            ));
        }
        if self.market_data.timeout_secs == 0 {
            return Err(ConfigError::ValidationError(
                "market_data.timeout_secs must be greater than zero".to_string(),
            ));
        }
        if self.archive.enabled && self.archive.output_dir.as_os_str().is_empty() {
            return Err(ConfigError::ValidationError(
                "archive.output_dir must be set when the archive is enabled".to_string(),
            ));
        }
        Ok(())
    }
}

/// Command-line overrides for the `[server]` section.
#[cfg(feature = "clap")]
#[derive(Debug, Clone, Default, clap::Args)]
pub struct ServerOverrides {
    /// Address to bind, overriding `server.host`.
    #[arg(long)]
    pub host: Option<IpAddr>,
    /// Port to bind, overriding `server.port`.
    #[arg(long)]
    pub port: Option<u16>,
}

#[cfg(feature = "clap")]
impl ServerOverrides {
    pub fn apply(&self, server: &mut ServerSettings) {
        if let Some(host) = self.host {
            server.host = host;
        }
        if let Some(port) = self.port {
            server.port = port;
        }
    }
}
