// Copyright 2019-2026 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

//! Fixed-size chunking of the archive payload.
//!
//! Every chunk becomes one raw leaf block of the UnixFS DAG. Chunks are slices
//! of the caller's [`Bytes`], so chunking never copies payload data.

use bytes::Bytes;
use cid::Cid;
use rayon::prelude::*;

use crate::utils::cid::CidBlockExt as _;

/// Maximum size of a leaf block.
pub const CHUNK_SIZE: usize = 256 * 1024;

/// A leaf block before tree assembly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chunk {
    pub cid: Cid,
    pub data: Bytes,
}

impl Chunk {
    pub fn new(data: Bytes) -> Self {
        Self {
            cid: Cid::from_raw_sha256(&data),
            data,
        }
    }

    /// Number of payload bytes reachable through this chunk.
    pub fn logical_size(&self) -> u64 {
        self.data.len() as u64
    }
}

/// Splits `data` into consecutive chunks of at most [`CHUNK_SIZE`] bytes.
///
/// Empty input yields a single empty chunk, so the result is never empty.
/// Leaves are hashed in parallel; the output keeps the input order.
pub fn chunk(data: &Bytes) -> Vec<Chunk> {
    if data.is_empty() {
        return vec![Chunk::new(Bytes::new())];
    }
    let count = data.len().div_ceil(CHUNK_SIZE);
    (0..count)
        .into_par_iter()
        .map(|i| {
            let start = i * CHUNK_SIZE;
            let end = (start + CHUNK_SIZE).min(data.len());
            Chunk::new(data.slice(start..end))
        })
        .collect()
}
