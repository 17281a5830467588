// Copyright 2019-2026 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

//! Balanced UnixFS file DAG.
//!
//! Leaves are folded into DAG-PB stems of at most [`MAX_LINKS`] children, level
//! by level, until a single link remains:
//!
//! ```text
//!                 [root]
//!         [s0              ][s1]
//!  [l0][l1] ... [l173]      [l174]
//! ```
//!
//! The order in which blocks are added to the [`NodeSet`] is the order in which
//! they are written to the archive, so it must not depend on anything but the
//! input bytes.

pub mod pb;

use bytes::Bytes;
use cid::Cid;
use indexmap::IndexMap;
use tracing::debug;

use crate::car::Error;
use crate::chunker::Chunk;
use crate::utils::cid::CidBlockExt as _;
use pb::UnixFsData;

/// Maximum number of children of a stem node.
pub const MAX_LINKS: usize = 174;

/// Every block of a DAG keyed by CID, in archive write order.
pub type NodeSet = IndexMap<Cid, DagNode>;

/// Reference to a child block from its parent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Link {
    pub cid: Cid,
    /// Payload bytes reachable through this link.
    pub logical_size: u64,
    /// Serialized size of the whole sub-DAG behind this link.
    pub encoded_size: u64,
}

impl From<&Chunk> for Link {
    fn from(chunk: &Chunk) -> Self {
        Self {
            cid: chunk.cid,
            logical_size: chunk.logical_size(),
            encoded_size: chunk.logical_size(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DagNode {
    Leaf(Bytes),
    Stem(Stem),
}

impl DagNode {
    /// Serialized block bytes, as written into the archive.
    pub fn block(&self) -> &Bytes {
        match self {
            DagNode::Leaf(data) => data,
            DagNode::Stem(stem) => &stem.block,
        }
    }
}

/// Intermediate DAG-PB node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stem {
    pub cid: Cid,
    pub links: Vec<Link>,
    pub block: Bytes,
}

impl Stem {
    pub fn new(children: &[Link]) -> Result<Self, Error> {
        let data = UnixFsData::file(children.iter().map(|it| it.logical_size).collect()).encode()?;
        let links = children
            .iter()
            .map(|it| pb::link(it.cid, it.encoded_size))
            .collect();
        let block = pb::encode_node(links, data);
        Ok(Self {
            cid: Cid::from_dag_pb_sha256(&block),
            links: children.to_vec(),
            block,
        })
    }

    /// Link from the parent level to this stem.
    pub fn link(&self) -> Link {
        Link {
            cid: self.cid,
            logical_size: self.links.iter().map(|it| it.logical_size).sum(),
            encoded_size: self.block.len() as u64
                + self.links.iter().map(|it| it.encoded_size).sum::<u64>(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct DagTree {
    pub nodes: NodeSet,
    pub root: Link,
    /// Number of stem levels above the leaves.
    pub depth: usize,
}

impl DagTree {
    pub fn root_cid(&self) -> Cid {
        self.root.cid
    }
}

/// Arranges `chunks` into a balanced DAG.
///
/// A single chunk is its own root and no stem is created.
pub fn build(chunks: Vec<Chunk>) -> Result<DagTree, Error> {
    if chunks.is_empty() {
        return Err(Error::NoChunks);
    }

    let mut nodes = NodeSet::with_capacity(chunks.len() + chunks.len() / MAX_LINKS + 1);
    let mut level = Vec::with_capacity(chunks.len());
    for chunk in chunks {
        level.push(Link::from(&chunk));
        // Identical chunks are stored once, at their first position
        nodes.entry(chunk.cid).or_insert(DagNode::Leaf(chunk.data));
    }

    let mut depth = 0;
    while level.len() > 1 {
        let mut parents = Vec::with_capacity(level.len().div_ceil(MAX_LINKS));
        for bucket in level.chunks(MAX_LINKS) {
            let stem = Stem::new(bucket)?;
            parents.push(stem.link());
            nodes.entry(stem.cid).or_insert(DagNode::Stem(stem));
        }
        level = parents;
        depth += 1;
        debug!(depth, links = level.len(), "folded DAG level");
    }

    match level.as_slice() {
        [root] => Ok(DagTree {
            nodes,
            root: *root,
            depth,
        }),
        _ => Err(Error::NoChunks),
    }
}
