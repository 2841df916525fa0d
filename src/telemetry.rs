//! Tracing subscriber setup.

use crate::config::TelemetrySettings;
use eyre::WrapErr;
use tracing_subscriber::{
    EnvFilter, Layer, Registry, fmt, layer::SubscriberExt, util::SubscriberInitExt,
};

/// Installs the global tracing subscriber.
///
/// `RUST_LOG` takes precedence over the configured log level.
///
/// # Errors
///
/// Returns an error when the configured level is not a valid filter
/// directive or a global subscriber is already installed.
pub fn init(settings: &TelemetrySettings) -> eyre::Result<()> {
    let env_filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(&settings.log_level)
            .wrap_err_with(|| format!("invalid log level `{}`", settings.log_level))?,
    };

    let fmt_layer = if settings.json {
        fmt::layer().json().with_target(true).boxed()
    } else {
        fmt::layer().with_target(true).boxed()
    };

    Registry::default()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()
        .wrap_err("failed to install tracing subscriber")
}
