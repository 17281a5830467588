// Copyright 2019-2026 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

//! Encodes arbitrary bytes as a UnixFS file DAG packed in an indexed CARv2
//! archive.
//!
//! ```
//! let archive = forest_car::encode(b"hello".as_slice()).unwrap();
//! assert_eq!(
//!     archive.root_string(),
//!     "bafkreibm6jg3ux5qumhcn2b3flc3tyu6dmlb4xa7u5bf44yegnrjhc4yeq"
//! );
//! ```

pub mod car;
pub mod chunker;
mod cli_shared;
pub mod dag;
#[cfg(test)]
mod test_utils;
mod tool;
mod utils;

pub use car::v2::encode;
pub use car::{CarV2Archive, Error};
pub use cli_shared::cli::{Config, EncodeConfig, LogConfig};

/// Entry point of the `forest-car` binary.
pub use tool::main::main as forest_car_main;
