// Copyright 2019-2026 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::utils::misc::LoggingColor;

#[derive(Serialize, Deserialize, PartialEq, Eq, Default, Debug, Clone)]
#[serde(default)]
pub struct LogConfig {
    /// `tracing` filter directives, e.g. `forest_car=debug`. `RUST_LOG` takes
    /// precedence.
    pub filter: Option<String>,
    pub color: LoggingColor,
}

#[derive(Serialize, Deserialize, PartialEq, Eq, Default, Debug, Clone)]
#[serde(default)]
pub struct EncodeConfig {
    /// Directory archives are written to when no output path is given.
    /// Defaults to the directory of the input file.
    pub output_dir: Option<PathBuf>,
}

#[derive(Serialize, Deserialize, PartialEq, Eq, Default, Debug, Clone)]
#[serde(default)]
pub struct Config {
    pub log: LogConfig,
    pub encode: EncodeConfig,
}
