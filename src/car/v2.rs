// Copyright 2019-2026 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

//! CARv2 archive:
//!
//! ```text
//! [pragma][v2 header][CARv1 payload][index]
//! ```
//!
//! No padding is written, so the payload always starts right after the header.

use std::mem::size_of;

use bytes::Bytes;
use cid::Cid;
use tracing::debug;
use zerocopy::little_endian::U64;
use zerocopy::{FromBytes, Immutable, IntoBytes, KnownLayout};

use super::{Error, IndexEntry, build_index, v1};
use crate::{chunker, dag};

pub const CARV2_PRAGMA_SIZE: usize = 11;

// The pragma of a CARv2, containing the version number.
// This is a valid CARv1 header, with version number of 2 and no root CIDs.
pub const CARV2_PRAGMA: [u8; CARV2_PRAGMA_SIZE] = [
    0x0a, // unit(10)
    0xa1, // map(1)
    0x67, // string(7)
    0x76, 0x65, 0x72, 0x73, 0x69, 0x6f, 0x6e, // "version"
    0x02, // uint(2)
];

/// <https://ipld.io/specs/transport/car/carv2/#header>
#[derive(IntoBytes, FromBytes, Immutable, KnownLayout, Clone, Copy, Debug, Eq, PartialEq)]
#[repr(C)]
pub struct CarV2Header {
    // Feature bitfield, no characteristics are set
    pub characteristics: [u8; 16],
    pub data_offset: U64,
    pub data_size: U64,
    pub index_offset: U64,
}

static_assertions::const_assert_eq!(size_of::<CarV2Header>(), 40);

impl CarV2Header {
    pub const SIZE: usize = size_of::<Self>();
    pub const DATA_OFFSET: u64 = (CARV2_PRAGMA_SIZE + Self::SIZE) as u64;

    /// Header of an archive whose index directly follows a `data_size` byte
    /// payload.
    pub fn new(data_size: u64) -> Self {
        Self {
            characteristics: [0; 16],
            data_offset: U64::new(Self::DATA_OFFSET),
            data_size: U64::new(data_size),
            index_offset: U64::new(Self::DATA_OFFSET + data_size),
        }
    }
}

/// A complete CARv2 archive with a single root.
///
/// Only built by [`CarV2Archive::new`], so `header` always describes `bytes`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CarV2Archive {
    root: Cid,
    header: CarV2Header,
    bytes: Vec<u8>,
}

impl CarV2Archive {
    /// Frames a CARv1 payload and its index.
    pub fn new(root: Cid, carv1: &[u8], index: &[u8]) -> Self {
        let header = CarV2Header::new(carv1.len() as u64);
        let mut bytes =
            Vec::with_capacity(CARV2_PRAGMA_SIZE + CarV2Header::SIZE + carv1.len() + index.len());
        bytes.extend_from_slice(&CARV2_PRAGMA);
        bytes.extend_from_slice(header.as_bytes());
        bytes.extend_from_slice(carv1);
        bytes.extend_from_slice(index);
        Self {
            root,
            header,
            bytes,
        }
    }

    pub fn root(&self) -> Cid {
        self.root
    }

    pub fn header(&self) -> &CarV2Header {
        &self.header
    }

    /// The whole archive.
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Multibase (base32) string of the root CID, a.k.a. the payload CID.
    pub fn root_string(&self) -> String {
        self.root.to_string()
    }

    /// CARv1 payload section of the archive.
    pub fn carv1(&self) -> &[u8] {
        let start = self.header.data_offset.get() as usize;
        &self.bytes[start..start + self.header.data_size.get() as usize]
    }

    /// Index section of the archive.
    pub fn index(&self) -> &[u8] {
        &self.bytes[self.header.index_offset.get() as usize..]
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }
}

/// Encodes `data` as a UnixFS file in an indexed CARv2 archive.
///
/// The output only depends on `data`: encoding the same bytes twice yields the
/// same archive.
#[tracing::instrument(skip_all)]
pub fn encode(data: impl Into<Bytes>) -> Result<CarV2Archive, Error> {
    let data = data.into();
    let chunks = chunker::chunk(&data);
    debug!(size = data.len(), chunks = chunks.len(), "chunked input");

    let tree = dag::build(chunks)?;
    let root = tree.root_cid();
    debug!(%root, depth = tree.depth, blocks = tree.nodes.len(), "built DAG");

    let payload = v1::encode(&tree.nodes, root)?;
    let entries = payload
        .offsets
        .iter()
        .map(|(cid, offset)| IndexEntry::new(*cid, *offset))
        .collect::<Vec<_>>();
    let index = build_index(&entries)?;

    let archive = CarV2Archive::new(root, &payload.bytes, &index);
    debug!(
        %root,
        data_size = payload.bytes.len(),
        index_size = index.len(),
        size = archive.bytes.len(),
        "encoded CARv2 archive"
    );
    Ok(archive)
}
