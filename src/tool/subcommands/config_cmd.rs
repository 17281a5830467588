// Copyright 2019-2026 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

use std::io::Write;

use anyhow::Context as _;
use clap::Subcommand;

use crate::cli_shared::cli::Config;

#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Dump the effective configuration, as TOML
    Dump,
}

impl ConfigCommands {
    pub fn run<W: Write>(&self, config: &Config, sink: &mut W) -> anyhow::Result<()> {
        match self {
            Self::Dump => writeln!(
                sink,
                "{}",
                toml::to_string(config).context("Could not convert configuration to TOML")?
            )
            .context("Failed to write the configuration"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::io::read_toml;
    use std::path::PathBuf;

    #[test]
    fn dump_parses_back() {
        let mut config = Config::default();
        config.encode.output_dir = Some(PathBuf::from("/cars"));
        let mut sink = vec![];
        ConfigCommands::Dump.run(&config, &mut sink).unwrap();
        let dumped = String::from_utf8(sink).unwrap();
        assert_eq!(read_toml::<Config>(&dumped).unwrap(), config);
    }
}
