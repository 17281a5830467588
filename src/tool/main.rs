// Copyright 2019-2026 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

use std::ffi::OsString;

use clap::Parser as _;

use super::subcommands::{Cli, Subcommand};
use crate::cli_shared::cli::log_config_source;
use crate::cli_shared::logger::setup_logger;

pub fn main<ArgT>(args: impl IntoIterator<Item = ArgT>) -> anyhow::Result<()>
where
    ArgT: Into<OsString> + Clone,
{
    // Capture Cli inputs
    let Cli { opts, cmd } = Cli::parse_from(args);
    let (config_source, config) = opts.to_config()?;
    setup_logger(&config.log)?;
    log_config_source(&config_source);

    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?
        .block_on(async {
            // Run command
            match cmd {
                Subcommand::Encode(cmd) => cmd.run(&config).await,
                Subcommand::Root(cmd) => cmd.run().await,
                Subcommand::Config(cmd) => cmd.run(&config, &mut std::io::stdout()),
            }
        })
}
