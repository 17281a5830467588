// Copyright 2019-2026 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

use tracing_subscriber::{EnvFilter, prelude::*};

use crate::cli_shared::cli::LogConfig;

/// Logs to stderr, keeping stdout for command output.
pub fn setup_logger(config: &LogConfig) -> anyhow::Result<()> {
    let filter = build_filter(config)?;
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::Layer::new()
                .with_ansi(config.color.coloring_enabled())
                .with_writer(std::io::stderr)
                .with_filter(filter),
        )
        .try_init()?;
    Ok(())
}

/// `RUST_LOG` takes precedence over the configured filter, which takes
/// precedence over [`default_tool_filter`].
fn build_filter(config: &LogConfig) -> anyhow::Result<EnvFilter> {
    let filter = match &config.filter {
        Some(directives) => EnvFilter::try_new(directives)?,
        None => default_tool_filter(),
    };
    Ok(get_env_filter(filter))
}

/// Returns an [`EnvFilter`] according to the `RUST_LOG` environment variable,
/// or `def` when it is unset.
fn get_env_filter(def: EnvFilter) -> EnvFilter {
    use std::env::{
        self,
        VarError::{NotPresent, NotUnicode},
    };
    match env::var(tracing_subscriber::EnvFilter::DEFAULT_ENV) {
        Ok(s) => EnvFilter::new(s),
        Err(NotPresent) => def,
        Err(NotUnicode(_)) => EnvFilter::default(),
    }
}

fn default_tool_filter() -> EnvFilter {
    let default_directives = ["warn", "forest_car=info"];
    EnvFilter::new(default_directives.join(","))
}

#[test]
fn test_default_tool_filter() {
    let filter = default_tool_filter().to_string();
    assert!(filter.contains("forest_car=info"), "{filter}");
    assert!(filter.contains("warn"), "{filter}");
}

#[test]
fn test_invalid_filter_is_rejected() {
    let config = LogConfig {
        filter: Some("forest_car=loud".into()),
        ..Default::default()
    };
    assert!(build_filter(&config).is_err());
    assert!(setup_logger(&config).is_err());
}

#[test]
fn test_configured_filter_is_accepted() {
    let config = LogConfig {
        filter: Some("forest_car=debug".into()),
        ..Default::default()
    };
    assert!(build_filter(&config).is_ok());
}
