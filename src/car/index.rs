// Copyright 2019-2026 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

//! `car-multihash-index-sorted` index.
//!
//! ```text
//! [codec varint][bucket count: u32]
//!   [multihash code: u64][width count: u32]
//!     [record width: u32][records length: u64][digest || offset]...
//! ```
//!
//! All integers after the codec are little-endian. Archives produced here are
//! addressed with SHA2-256 only, so the index always holds one bucket with one
//! 40-byte record width.
//! See <https://ipld.io/specs/transport/car/carv2/#format-0x0401-multihashindexsorted>

use std::mem::size_of;

use cid::Cid;
use integer_encoding::VarInt as _;
use zerocopy::little_endian::{U32, U64};
use zerocopy::{FromBytes, Immutable, IntoBytes, KnownLayout};

use super::Error;
use crate::utils::multihash::{SHA2_256_CODE, SHA2_256_LEN};

/// Multicodec code of the `car-multihash-index-sorted` format.
pub const MULTIHASH_INDEX_SORTED: u64 = 0x0401;

/// A block to be indexed, located by its section offset in the CARv1 payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexEntry {
    pub cid: Cid,
    pub offset: u64,
}

impl IndexEntry {
    pub fn new(cid: Cid, offset: u64) -> Self {
        Self { cid, offset }
    }
}

/// Layout of this struct is the same in-memory as on the wire.
#[derive(IntoBytes, FromBytes, Immutable, KnownLayout, Clone, Copy, Debug, Eq, PartialEq)]
#[repr(C)]
pub struct IndexHeader {
    // Number of multihash code buckets
    pub buckets: U32,
    pub hash_code: U64,
    // Number of distinct digest widths within the bucket
    pub widths: U32,
    pub record_width: U32,
    // Byte length of all records of this width
    pub records_length: U64,
}

static_assertions::const_assert_eq!(size_of::<IndexHeader>(), 28);

impl IndexHeader {
    pub const SIZE: usize = size_of::<Self>();

    fn sha2_256(records: usize) -> Self {
        Self {
            buckets: U32::new(1),
            hash_code: U64::new(SHA2_256_CODE),
            widths: U32::new(1),
            record_width: U32::new(IndexRecord::SIZE as u32),
            records_length: U64::new((IndexRecord::SIZE * records) as u64),
        }
    }
}

#[derive(IntoBytes, FromBytes, Immutable, KnownLayout, Clone, Copy, Debug, Eq, PartialEq)]
#[repr(C)]
pub struct IndexRecord {
    pub digest: [u8; SHA2_256_LEN],
    pub offset: U64,
}

// There are no padding bytes
static_assertions::const_assert_eq!(size_of::<IndexRecord>(), 40);

impl IndexRecord {
    pub const SIZE: usize = size_of::<Self>();
}

impl TryFrom<&IndexEntry> for IndexRecord {
    type Error = Error;

    fn try_from(IndexEntry { cid, offset }: &IndexEntry) -> Result<Self, Self::Error> {
        let hash = cid.hash();
        let digest = <[u8; SHA2_256_LEN]>::try_from(hash.digest()).map_err(|_| {
            Error::UnsupportedDigestLength {
                cid: *cid,
                length: hash.digest().len(),
            }
        })?;
        if hash.code() != SHA2_256_CODE {
            return Err(Error::UnsupportedHashCode {
                cid: *cid,
                code: hash.code(),
            });
        }
        Ok(Self {
            digest,
            offset: U64::new(*offset),
        })
    }
}

/// Builds a sorted multihash index over `entries`.
///
/// Records are sorted by digest bytes so readers can binary search them. The
/// sort is stable, duplicate digests keep their relative order.
pub fn build_index(entries: &[IndexEntry]) -> Result<Vec<u8>, Error> {
    if entries.is_empty() {
        return Err(Error::EmptyIndex);
    }
    let mut records = entries
        .iter()
        .map(IndexRecord::try_from)
        .collect::<Result<Vec<_>, _>>()?;
    records.sort_by(|a, b| a.digest.cmp(&b.digest));

    let mut bytes = MULTIHASH_INDEX_SORTED.encode_var_vec();
    bytes.reserve(IndexHeader::SIZE + IndexRecord::SIZE * records.len());
    bytes.extend_from_slice(IndexHeader::sha2_256(records.len()).as_bytes());
    bytes.extend_from_slice(records.as_slice().as_bytes());
    Ok(bytes)
}
