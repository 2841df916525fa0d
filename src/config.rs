//! Layered runtime settings.
//!
//! Values are resolved from built-in defaults, then an optional
//! `tasklist.toml` in the working directory, then `TASKLIST__`-prefixed
//! environment variables (for example `TASKLIST__SERVER__PORT=9000`).

use config::{Config, ConfigBuilder, ConfigError, Environment, File, builder::DefaultState};
use secrecy::SecretString;
use serde::Deserialize;
use std::net::{IpAddr, SocketAddr};

const ENV_PREFIX: &str = "TASKLIST";
const ENV_SEPARATOR: &str = "__";
const CONFIG_FILE: &str = "tasklist";

/// Complete server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// Listener settings.
    pub server: ServerSettings,
    /// PostgreSQL settings; absent selects the in-memory repository.
    #[serde(default)]
    pub database: Option<DatabaseSettings>,
    /// Logging settings.
    pub telemetry: TelemetrySettings,
}

/// HTTP listener settings.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    /// Interface address to bind.
    pub host: IpAddr,
    /// TCP port to bind.
    pub port: u16,
}

/// PostgreSQL connection settings.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseSettings {
    /// Connection URL, kept out of debug output.
    pub url: SecretString,
    /// Maximum number of pooled connections.
    #[serde(default = "default_pool_size")]
    pub pool_size: u32,
}

/// Tracing subscriber settings.
#[derive(Debug, Clone, Deserialize)]
pub struct TelemetrySettings {
    /// Default filter directive when `RUST_LOG` is unset.
    pub log_level: String,
    /// Emit JSON lines instead of human-readable output.
    pub json: bool,
}

const fn default_pool_size() -> u32 {
    10
}

impl Settings {
    /// Loads settings from defaults, `tasklist.toml`, and the environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a source cannot be read or a value has
    /// the wrong type.
    pub fn load() -> Result<Self, ConfigError> {
        with_defaults()?
            .add_source(File::with_name(CONFIG_FILE).required(false))
            .add_source(Environment::with_prefix(ENV_PREFIX).separator(ENV_SEPARATOR))
            .build()?
            .try_deserialize()
    }

    /// Address the HTTP listener binds to.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.server.host, self.server.port)
    }
}

fn with_defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    Config::builder()
        .set_default("server.host", "127.0.0.1")?
        .set_default("server.port", 8080)?
        .set_default("telemetry.log_level", "info")?
        .set_default("telemetry.json", false)
}
