// Copyright 2019-2026 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use anyhow::Context as _;
use tracing::info;

use super::read_input;
use crate::cli_shared::cli::Config;
use crate::{chunker, dag};

#[derive(Debug, clap::Args)]
pub struct EncodeCommand {
    /// File to encode
    input: PathBuf,
    /// Archive destination. Defaults to `<INPUT>.car`, placed in
    /// `encode.output_dir` when configured
    #[arg(short, long)]
    output: Option<PathBuf>,
}

impl EncodeCommand {
    pub async fn run(self, config: &Config) -> anyhow::Result<()> {
        let data = read_input(&self.input).await?;
        let input_size = data.len();
        let archive = tokio::task::spawn_blocking(move || crate::encode(data)).await??;

        let output = self.output.unwrap_or_else(|| {
            default_output(&self.input, config.encode.output_dir.as_deref())
        });
        let root = archive.root();
        let data_size = archive.header().data_size.get();
        let archive_size = archive.bytes().len();
        tokio::fs::write(&output, archive.into_bytes())
            .await
            .with_context(|| format!("couldn't write archive to {}", output.display()))?;
        info!(
            %root,
            output = %output.display(),
            input_size,
            data_size,
            archive_size,
            "wrote CARv2 archive"
        );
        println!("{root}");
        Ok(())
    }
}

#[derive(Debug, clap::Args)]
pub struct RootCommand {
    /// File to compute the root CID of
    input: PathBuf,
}

impl RootCommand {
    pub async fn run(self) -> anyhow::Result<()> {
        let data = read_input(&self.input).await?;
        let tree =
            tokio::task::spawn_blocking(move || dag::build(chunker::chunk(&data))).await??;
        println!("{}", tree.root_cid());
        Ok(())
    }
}

/// `<INPUT>.car`, next to the input unless `output_dir` is given.
fn default_output(input: &Path, output_dir: Option<&Path>) -> PathBuf {
    let mut file_name = input
        .file_name()
        .map(OsString::from)
        .unwrap_or_else(|| OsString::from("output"));
    file_name.push(".car");
    match output_dir {
        Some(dir) => dir.join(file_name),
        None => input.with_file_name(file_name),
    }
}
