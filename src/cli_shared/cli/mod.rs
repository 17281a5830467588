// Copyright 2019-2026 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

mod config;

use std::path::PathBuf;

use tracing::{info, warn};

pub use config::{Config, EncodeConfig, LogConfig};

use crate::utils::io::{read_file_to_string, read_toml};
use crate::utils::misc::LoggingColor;

/// Environment variable pointing at a configuration file.
pub const CONFIG_PATH_ENV: &str = "FOREST_CAR_CONFIG_PATH";

/// Options shared by every `forest-car` subcommand.
#[derive(Default, Debug, clap::Args)]
pub struct CliOpts {
    /// A TOML file containing relevant configurations
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
    /// Enable or disable colored logging in `stderr`
    #[arg(long, global = true)]
    pub color: Option<LoggingColor>,
}

/// Where the effective configuration was read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    File(PathBuf),
    /// [`CONFIG_PATH_ENV`] points at a file that does not exist.
    MissingEnvFile(PathBuf),
    Default,
}

impl ConfigSource {
    fn path(&self) -> Option<&PathBuf> {
        match self {
            Self::File(path) => Some(path),
            Self::MissingEnvFile(_) | Self::Default => None,
        }
    }
}

impl CliOpts {
    /// Reads the configuration file, if any, and applies command-line
    /// overrides on top of it.
    pub fn to_config(&self) -> anyhow::Result<(ConfigSource, Config)> {
        let source = find_config_path(self.config.as_ref());
        let mut config = match source.path() {
            Some(path) => read_toml(&read_file_to_string(path)?)?,
            None => Config::default(),
        };
        if let Some(color) = &self.color {
            config.log.color = color.clone();
        }
        Ok((source, config))
    }
}

/// `--config` takes precedence over [`CONFIG_PATH_ENV`]. A path given through
/// the environment that does not exist falls back to defaults.
pub fn find_config_path(config: Option<&PathBuf>) -> ConfigSource {
    if let Some(path) = config {
        return ConfigSource::File(path.clone());
    }
    match std::env::var_os(CONFIG_PATH_ENV).map(PathBuf::from) {
        Some(path) if path.exists() => ConfigSource::File(path),
        Some(path) => ConfigSource::MissingEnvFile(path),
        None => ConfigSource::Default,
    }
}

/// Logs where the configuration came from. Called once the logger is set up.
pub fn log_config_source(source: &ConfigSource) {
    match source {
        ConfigSource::File(path) => info!("using configuration at {}", path.display()),
        ConfigSource::MissingEnvFile(path) => warn!(
            "{CONFIG_PATH_ENV} points at {}, which does not exist. Using defaults.",
            path.display()
        ),
        ConfigSource::Default => info!("no configuration file found, using defaults"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write as _;

    #[test]
    fn flag_overrides_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"[log]\ncolor = \"always\"\nfilter = \"debug\"\n")
            .unwrap();
        let opts = CliOpts {
            config: Some(file.path().to_path_buf()),
            color: Some(LoggingColor::Never),
        };
        let (source, config) = opts.to_config().unwrap();
        assert_eq!(source, ConfigSource::File(file.path().to_path_buf()));
        assert_eq!(config.log.color, LoggingColor::Never);
        assert_eq!(config.log.filter.as_deref(), Some("debug"));
    }

    #[test]
    fn missing_config_file_is_an_error() {
        let opts = CliOpts {
            config: Some(PathBuf::from("/definitely/not/here.toml")),
            color: None,
        };
        assert!(opts.to_config().is_err());
    }
}
