// Copyright 2019-2026 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

//! Multihash code table used for block addressing. Archives are always
//! addressed with SHA2-256.

pub mod prelude {
    pub use super::MultihashCode;
    pub use multihash_codetable::MultihashDigest as _;
}

use multihash_derive::MultihashDigest;

/// Multihash code of SHA2-256, as written into the archive index header.
pub const SHA2_256_CODE: u64 = 0x12;

/// Digest length of SHA2-256.
pub const SHA2_256_LEN: usize = 32;

#[derive(Clone, Copy, Debug, Eq, MultihashDigest, PartialEq)]
#[mh(alloc_size = 64)]
pub enum MultihashCode {
    /// SHA-256 (32-byte hash size)
    #[mh(code = 0x12, hasher = multihash_codetable::Sha2_256)]
    Sha2_256,
}
