// Copyright 2019-2026 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

use std::path::Path;

use anyhow::Context as _;

/// Reads a file to a string, naming the file on failure.
pub fn read_file_to_string(path: &Path) -> anyhow::Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
}

/// Converts a TOML file represented as a string to `S`
pub fn read_toml<S>(toml_string: &str) -> anyhow::Result<S>
where
    for<'de> S: serde::de::Deserialize<'de>,
{
    let new_struct: S = toml::from_str(toml_string)?;
    Ok(new_struct)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Deserialize)]
    struct Config {
        name: String,
    }

    #[test]
    fn read_toml_struct() {
        let config: Config = read_toml("name = \"forest\"\n").unwrap();
        assert_eq!(config.name, "forest");
    }

    #[test]
    fn read_toml_invalid() {
        assert!(read_toml::<Config>("name = ").is_err());
    }

    #[test]
    fn read_missing_file() {
        let err = read_file_to_string(Path::new("/definitely/not/here.toml")).unwrap_err();
        assert!(err.to_string().contains("/definitely/not/here.toml"));
    }
}
