// Copyright 2019-2026 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

use std::io;

use cid::Cid;
use indexmap::IndexMap;
use integer_encoding::VarInt as _;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::Error;
use crate::dag::NodeSet;

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct CarV1Header {
    // The roots array must contain one or more CIDs,
    // each of which should be present somewhere in the remainder of the CAR.
    // See <https://ipld.io/specs/transport/car/carv1/#constraints>
    pub roots: Vec<Cid>,
    pub version: u64,
}

impl CarV1Header {
    pub fn new(root: Cid) -> Self {
        Self {
            roots: vec![root],
            version: 1,
        }
    }

    /// DAG-CBOR encoding of the header. Field order matches the canonical
    /// (length-first) key order, `roots` before `version`.
    pub fn to_bytes(&self) -> Result<Vec<u8>, Error> {
        serde_ipld_dagcbor::to_vec(self).map_err(|e| Error::HeaderEncoding(e.to_string()))
    }
}

/// A finished CARv1 payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CarV1Payload {
    pub bytes: Vec<u8>,
    /// Position of each block's section (its varint length prefix) within
    /// `bytes`, in write order.
    pub offsets: IndexMap<Cid, u64>,
}

/// Writes a varint frame.
fn write_frame(writer: &mut impl io::Write, frame: &[u8]) -> io::Result<()> {
    writer.write_all(&frame.len().encode_var_vec())?;
    writer.write_all(frame)
}

/// Writes a varint frame containing the cid and the data.
fn write_section(writer: &mut impl io::Write, cid: &Cid, data: &[u8]) -> io::Result<()> {
    let cid = cid.to_bytes();
    let frame_length = cid.len() + data.len();
    writer.write_all(&frame_length.encode_var_vec())?;
    writer.write_all(&cid)?;
    writer.write_all(data)
}

/// Serializes `nodes`, in insertion order, into a CARv1 payload with a single
/// `root`, recording each section offset as it is written.
pub fn encode(nodes: &NodeSet, root: Cid) -> Result<CarV1Payload, Error> {
    if nodes.is_empty() {
        return Err(Error::EmptyNodeSet);
    }
    if !nodes.contains_key(&root) {
        return Err(Error::MissingRoot(root));
    }

    let header = CarV1Header::new(root).to_bytes()?;
    // Worst case section overhead: 10 byte varint and a 64 byte CID
    let capacity = header.len()
        + 10
        + nodes
            .values()
            .map(|node| node.block().len() + 74)
            .sum::<usize>();
    let mut bytes = Vec::with_capacity(capacity);
    write_frame(&mut bytes, &header)?;

    let mut offsets = IndexMap::with_capacity(nodes.len());
    for (cid, node) in nodes {
        offsets.insert(*cid, bytes.len() as u64);
        write_section(&mut bytes, cid, node.block())?;
    }
    debug!(%root, blocks = nodes.len(), size = bytes.len(), "encoded CARv1 payload");

    Ok(CarV1Payload { bytes, offsets })
}
