// Copyright 2019-2026 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

//! Minimal reader for archives produced by this crate. It only understands the
//! subset of CARv2/DAG-PB that the encoder writes.

use ahash::HashMap;
use anyhow::{Context as _, bail, ensure};
use bytes::Bytes;
use cid::Cid;
use integer_encoding::VarInt as _;
use ipld_dagpb::PbNode;
use rand::{RngCore as _, SeedableRng as _};
use zerocopy::FromBytes as _;

use crate::car::index::{IndexHeader, IndexRecord, MULTIHASH_INDEX_SORTED};
use crate::car::v1::CarV1Header;
use crate::car::v2::{CARV2_PRAGMA, CARV2_PRAGMA_SIZE, CarV2Header};
use crate::utils::cid::{DAG_PB, IPLD_RAW};

/// Seeded pseudo-random payload.
pub fn random_bytes(len: usize, seed: u64) -> Vec<u8> {
    let mut rng = rand_chacha::ChaCha8Rng::seed_from_u64(seed);
    let mut data = vec![0; len];
    rng.fill_bytes(&mut data);
    data
}

#[derive(Debug)]
pub struct Section {
    /// Offset of the section within the CARv1 payload.
    pub offset: u64,
    pub cid: Cid,
    pub data: Vec<u8>,
}

#[derive(Debug)]
pub struct ParsedCar {
    pub header: CarV2Header,
    pub roots: Vec<Cid>,
    pub sections: Vec<Section>,
    pub index: Vec<IndexRecord>,
}

fn read_varint(bytes: &[u8]) -> anyhow::Result<(u64, usize)> {
    u64::decode_var(bytes).context("invalid varint")
}

/// Reads one `varint || cid || data` section, returning the CID and the
/// section length including its prefix.
pub fn read_section(bytes: &[u8]) -> anyhow::Result<(Cid, usize)> {
    let (len, prefix) = read_varint(bytes)?;
    let end = prefix + len as usize;
    ensure!(end <= bytes.len(), "truncated section");
    let mut frame = &bytes[prefix..end];
    let cid = Cid::read_bytes(&mut frame)?;
    Ok((cid, end))
}

impl ParsedCar {
    pub fn parse(bytes: &[u8]) -> anyhow::Result<Self> {
        ensure!(bytes.len() >= CARV2_PRAGMA_SIZE + CarV2Header::SIZE, "too short");
        ensure!(bytes[..CARV2_PRAGMA_SIZE] == CARV2_PRAGMA, "invalid pragma");
        let header = CarV2Header::read_from_bytes(
            &bytes[CARV2_PRAGMA_SIZE..CARV2_PRAGMA_SIZE + CarV2Header::SIZE],
        )
        .map_err(|_| anyhow::anyhow!("invalid header"))?;
        let start = header.data_offset.get() as usize;
        let end = start + header.data_size.get() as usize;
        let carv1 = bytes.get(start..end).context("truncated payload")?;

        let (header_len, prefix) = read_varint(carv1)?;
        let mut cursor = prefix + header_len as usize;
        let v1_header: CarV1Header = serde_ipld_dagcbor::from_slice(&carv1[prefix..cursor])?;
        ensure!(v1_header.version == 1, "unexpected CARv1 version");

        let mut sections = vec![];
        while cursor < carv1.len() {
            let (len, prefix) = read_varint(&carv1[cursor..])?;
            let frame_end = cursor + prefix + len as usize;
            let mut frame = carv1
                .get(cursor + prefix..frame_end)
                .context("truncated section")?;
            let cid = Cid::read_bytes(&mut frame)?;
            sections.push(Section {
                offset: cursor as u64,
                cid,
                data: frame.to_vec(),
            });
            cursor = frame_end;
        }

        let index = Self::parse_index(&bytes[header.index_offset.get() as usize..])?;
        Ok(Self {
            header,
            roots: v1_header.roots,
            sections,
            index,
        })
    }

    fn parse_index(bytes: &[u8]) -> anyhow::Result<Vec<IndexRecord>> {
        let (codec, prefix) = read_varint(bytes)?;
        ensure!(codec == MULTIHASH_INDEX_SORTED, "unexpected index codec");
        let header = IndexHeader::read_from_bytes(
            bytes
                .get(prefix..prefix + IndexHeader::SIZE)
                .context("truncated index header")?,
        )
        .map_err(|_| anyhow::anyhow!("invalid index header"))?;
        let body = &bytes[prefix + IndexHeader::SIZE..];
        ensure!(
            body.len() as u64 == header.records_length.get(),
            "index length mismatch"
        );
        body.chunks_exact(IndexRecord::SIZE)
            .map(|it| IndexRecord::read_from_bytes(it).map_err(|_| anyhow::anyhow!("bad record")))
            .collect()
    }

    /// Reassembles the file rooted at `root` by walking the DAG.
    pub fn read_file(&self, root: &Cid) -> anyhow::Result<Vec<u8>> {
        let blocks: HashMap<Cid, &[u8]> = self
            .sections
            .iter()
            .map(|it| (it.cid, it.data.as_slice()))
            .collect();
        let mut out = vec![];
        read_into(&blocks, root, &mut out)?;
        Ok(out)
    }
}

fn read_into(blocks: &HashMap<Cid, &[u8]>, cid: &Cid, out: &mut Vec<u8>) -> anyhow::Result<()> {
    let block = blocks.get(cid).with_context(|| format!("missing block {cid}"))?;
    match cid.codec() {
        IPLD_RAW => out.extend_from_slice(block),
        DAG_PB => {
            for (link, _) in pb_links(block)? {
                read_into(blocks, &link, out)?;
            }
        }
        codec => bail!("unexpected codec {codec:#x}"),
    }
    Ok(())
}

/// Child CIDs and their `Tsize` of a DAG-PB node, in link order.
pub fn pb_links(block: &[u8]) -> anyhow::Result<Vec<(Cid, u64)>> {
    PbNode::from_bytes(Bytes::copy_from_slice(block))?
        .links
        .into_iter()
        .map(|link| Ok((link.cid, link.size.context("link without Tsize")?)))
        .collect()
}
