use crate::error::ConfigError;
use std::path::Path;

// Declare the modules that make up this crate.
pub mod error;
pub mod logging;
pub mod settings;

// Re-export the core types to provide a clean public API.
pub use logging::init_tracing;
#[cfg(feature = "clap")]
pub use settings::ServerOverrides;
pub use settings::{ArchiveSettings, Config, LoggingSettings, MarketDataSettings, ServerSettings};

/// Prefix of environment variables that override file settings, e.g.
/// `STOCKPULSE__MARKET_DATA__TIMEOUT_SECS=20`.
pub const ENV_PREFIX: &str = "STOCKPULSE";

/// Loads the application configuration.
///
/// Built-in defaults are overlaid by the TOML file at `path` (if it exists) and
/// then by `STOCKPULSE__SECTION__KEY` environment variables. The result is
/// validated before it is returned.
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    load_with_env(path, environment())
}

fn environment() -> config::Environment {
    config::Environment::with_prefix(ENV_PREFIX)
        .prefix_separator("__")
        .separator("__")
        .try_parsing(true)
}

fn load_with_env(path: &Path, env: config::Environment) -> Result<Config, ConfigError> {
    let builder = config::Config::builder()
        .add_source(config::File::from(path).required(false))
        .add_source(env)
        .build()?;

    let config = builder.try_deserialize::<Config>()?;
    config.validate()?;

    Ok(config)
}
