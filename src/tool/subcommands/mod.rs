// Copyright 2019-2026 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

pub mod config_cmd;
pub mod encode_cmd;

use std::path::Path;

use anyhow::Context as _;
use bytes::Bytes;
use clap::Parser;

use crate::cli_shared::cli::CliOpts;

/// Command-line options for the `forest-car` binary
#[derive(Parser)]
#[command(name = env!("CARGO_PKG_NAME"), author = env!("CARGO_PKG_AUTHORS"), version = env!("CARGO_PKG_VERSION"), about = env!("CARGO_PKG_DESCRIPTION"))]
pub struct Cli {
    #[command(flatten)]
    pub opts: CliOpts,
    #[command(subcommand)]
    pub cmd: Subcommand,
}

/// forest-car sub-commands
#[derive(clap::Subcommand)]
pub enum Subcommand {
    /// Encode a file into an indexed CARv2 archive
    Encode(encode_cmd::EncodeCommand),

    /// Print the root CID a file would be encoded under, without writing anything
    Root(encode_cmd::RootCommand),

    /// Manage configuration
    #[command(subcommand)]
    Config(config_cmd::ConfigCommands),
}

async fn read_input(path: &Path) -> anyhow::Result<Bytes> {
    let data = tokio::fs::read(path)
        .await
        .with_context(|| format!("couldn't read input file {}", path.display()))?;
    Ok(Bytes::from(data))
}
