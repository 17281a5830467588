// Copyright 2019-2026 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

use crate::utils::multihash::prelude::*;
use cid::Cid;

/// Multicodec code of raw binary leaves.
pub const IPLD_RAW: u64 = 0x55;

/// Multicodec code of DAG-PB nodes.
pub const DAG_PB: u64 = 0x70;

/// Extension methods for constructing content identifiers of archive blocks.
///
/// Both constructors produce a CIDv1 over a SHA2-256 multihash, which is what
/// storage providers expect for payload CIDs.
pub trait CidBlockExt {
    /// CID of a raw leaf block.
    fn from_raw_sha256(data: &[u8]) -> Cid {
        Cid::new_v1(IPLD_RAW, MultihashCode::Sha2_256.digest(data))
    }

    /// CID of a serialized DAG-PB node.
    fn from_dag_pb_sha256(encoded: &[u8]) -> Cid {
        Cid::new_v1(DAG_PB, MultihashCode::Sha2_256.digest(encoded))
    }
}

impl CidBlockExt for Cid {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_raw_leaf() {
        let cid = Cid::from_raw_sha256(&[]);
        assert_eq!(
            cid.to_string(),
            "bafkreihdwdcefgh4dqkjv67uzcmw7ojee6xedzdetojuzjevtenxquvyku"
        );
    }

    #[test]
    fn codecs_differ() {
        let raw = Cid::from_raw_sha256(b"forest");
        let pb = Cid::from_dag_pb_sha256(b"forest");
        assert_eq!(raw.hash(), pb.hash());
        assert_ne!(raw, pb);
        assert_eq!(raw.codec(), IPLD_RAW);
        assert_eq!(pb.codec(), DAG_PB);
    }
}
