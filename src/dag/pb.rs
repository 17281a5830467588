// Copyright 2019-2026 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

//! DAG-PB nodes carrying UnixFS file metadata.
//!
//! Schemas:
//! - <https://ipld.io/specs/codecs/dag-pb/spec/#protobuf-schema>
//! - <https://github.com/ipfs/specs/blob/main/UNIXFS.md#data-format>
//!
//! `PBNode`/`PBLink` are written by [`ipld_dagpb`], whose encoder is canonical:
//! every `Links` entry precedes `Data`, and links without names keep the order
//! in which they were given. The UnixFS `Data` message is written with
//! [`quick_protobuf`].

use bytes::Bytes;
use cid::Cid;
use ipld_dagpb::{PbLink, PbNode};
use quick_protobuf::sizeofs::sizeof_varint;
use quick_protobuf::{MessageWrite, Writer, WriterBackend};

/// UnixFS `DataType.File`
const UNIXFS_FILE: u64 = 2;

/// UnixFS `Data` message of an intermediate file node. The `Data` bytes field
/// is never set since file contents live in raw leaves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnixFsData {
    /// Logical size of each child, in link order.
    pub blocksizes: Vec<u64>,
}

impl UnixFsData {
    pub fn file(blocksizes: Vec<u64>) -> Self {
        Self { blocksizes }
    }

    /// Total logical size of the file fragment described by this node.
    pub fn filesize(&self) -> u64 {
        self.blocksizes.iter().sum()
    }

    pub fn encode(&self) -> quick_protobuf::Result<Bytes> {
        let mut buf = Vec::with_capacity(self.get_size());
        // `serialize_into_vec` would add a length prefix
        self.write_message(&mut Writer::new(&mut buf))?;
        Ok(Bytes::from(buf))
    }
}

impl MessageWrite for UnixFsData {
    fn get_size(&self) -> usize {
        1 + sizeof_varint(UNIXFS_FILE)
            + 1
            + sizeof_varint(self.filesize())
            + self
                .blocksizes
                .iter()
                .map(|size| 1 + sizeof_varint(*size))
                .sum::<usize>()
    }

    fn write_message<W: WriterBackend>(&self, w: &mut Writer<W>) -> quick_protobuf::Result<()> {
        // Type
        w.write_with_tag(8, |w| w.write_uint64(UNIXFS_FILE))?;
        // filesize
        w.write_with_tag(24, |w| w.write_uint64(self.filesize()))?;
        // blocksizes, repeated and unpacked
        for size in &self.blocksizes {
            w.write_with_tag(32, |w| w.write_uint64(*size))?;
        }
        Ok(())
    }
}

/// A link with an empty name, as go-unixfs writes them.
pub fn link(hash: Cid, tsize: u64) -> PbLink {
    PbLink {
        cid: hash,
        name: Some(String::new()),
        size: Some(tsize),
    }
}

/// Serializes a DAG-PB node.
pub fn encode_node(links: Vec<PbLink>, data: Bytes) -> Bytes {
    Bytes::from(
        PbNode {
            links,
            data: Some(data),
        }
        .into_bytes(),
    )
}
