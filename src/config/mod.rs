//! The `config` module loads [`Settings`] from layered sources.
//!
//! Later sources win: built-in defaults, then a TOML file, then
//! `EVENTPOST_`-prefixed environment variables (`EVENTPOST_BROKER__HOST`).

mod settings;

use std::path::Path;

use config::{Config, ConfigError, Environment, File};
use tracing::debug;

use settings::PartialSettings;

pub use settings::{BrokerSettings, LogSettings, QueueSettings, RetrySettings, Settings};

const DEFAULT_FILE: &str = "config/default";
const ENV_PREFIX: &str = "EVENTPOST";

/// Loads the configuration from the default file and environment variables
/// Merges the configuration with default values
pub fn load_config() -> Result<Settings, ConfigError> {
    build(File::with_name(DEFAULT_FILE).required(false))
}

/// Same as [`load_config`] but reads `path` instead of the default file.
/// The file must exist.
pub fn load_config_from(path: &Path) -> Result<Settings, ConfigError> {
    build(File::from(path).required(true))
}

fn build<S>(file: S) -> Result<Settings, ConfigError>
where
    S: config::Source + Send + Sync + 'static,
{
    let builder = Config::builder().add_source(file).add_source(
        Environment::with_prefix(ENV_PREFIX)
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true),
    );

    let config = builder.build()?;

    // Try to deserialize what is available
    let partial: PartialSettings = config.try_deserialize()?;
    let settings = partial.merge(Settings::default());
    debug!(?settings, "configuration loaded");

    Ok(settings)
}

#[cfg(test)]
mod tests;
