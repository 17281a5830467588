// Copyright 2019-2026 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

//! Content addressable archive (CAR) containers.
//!
//! - [`v1`] writes the CARv1 payload: a DAG-CBOR header followed by
//!   varint-framed `cid || data` sections.
//!   See <https://ipld.io/specs/transport/car/carv1/>
//! - [`index`] builds the `car-multihash-index-sorted` index over that payload.
//! - [`v2`] wraps payload and index into a CARv2 archive.
//!   See <https://ipld.io/specs/transport/car/carv2/>

pub mod index;
pub mod v1;
pub mod v2;

use cid::Cid;
use thiserror::Error;

pub use index::{IndexEntry, build_index};
pub use v1::{CarV1Header, CarV1Payload};
pub use v2::{CarV2Archive, CarV2Header};

/// Archive encoding error. Every variant is terminal for the encode call that
/// produced it.
#[derive(Debug, Error)]
pub enum Error {
    /// The tree builder was given no chunks.
    #[error("cannot build a DAG from zero chunks")]
    NoChunks,
    /// The CARv1 encoder was given no blocks.
    #[error("node set is empty")]
    EmptyNodeSet,
    /// The root is not one of the blocks to be written.
    #[error("root {0} is absent from the node set")]
    MissingRoot(Cid),
    /// The index would have no records.
    #[error("cannot build an index without entries")]
    EmptyIndex,
    /// Only 32-byte SHA2-256 digests can be indexed.
    #[error("unsupported digest length {length} for {cid}, expected 32")]
    UnsupportedDigestLength { cid: Cid, length: usize },
    /// Only SHA2-256 multihashes can be indexed.
    #[error("unsupported multihash code {code:#x} for {cid}")]
    UnsupportedHashCode { cid: Cid, code: u64 },
    #[error("failed to encode DAG-PB node: {0}")]
    Protobuf(#[from] quick_protobuf::Error),
    #[error("failed to encode CAR header: {0}")]
    HeaderEncoding(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
