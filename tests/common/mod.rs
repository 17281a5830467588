// Copyright 2019-2026 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

use std::path::PathBuf;

use assert_cmd::{Command, cargo::cargo_bin_cmd};
use tempfile::TempDir;

pub fn tool() -> Command {
    let mut cmd = cargo_bin_cmd!("forest-car");
    // Keep runs independent of the caller's environment
    cmd.env_remove("FOREST_CAR_CONFIG_PATH")
        .env_remove("RUST_LOG");
    cmd
}

/// Writes `data` to a file named `name` in a fresh temporary directory.
pub fn input_file(name: &str, data: &[u8]) -> (TempDir, PathBuf) {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join(name);
    std::fs::write(&path, data).unwrap();
    (dir, path)
}

/// Pseudo-random, but reproducible, bytes spanning several chunks.
pub fn payload(len: usize) -> Vec<u8> {
    (0..len).map(|i| (i * 31 % 253) as u8).collect()
}
