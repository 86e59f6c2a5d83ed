//! Pluggable hash functions for leaf and internal node digests.
//!
//! A tree and its verifier must agree on the hasher; nothing in a digest
//! records which one produced it.

use std::fmt::Debug;

/// Domain tag prepended to leaf hash inputs by
/// [`DomainSeparatedBlake3Hasher`].
pub const LEAF_DOMAIN_TAG: u8 = 0x00;
/// Domain tag prepended to internal merge inputs by
/// [`DomainSeparatedBlake3Hasher`].
pub const INTERNAL_DOMAIN_TAG: u8 = 0x01;

/// Hash abstraction used by the commitment tree.
///
/// All functions are static so that a verifier holding only a root and a
/// path needs nothing but the type.
pub trait MerkleHasher {
    /// Fixed-width digest produced by this hasher.
    type Digest: Copy + Eq + AsRef<[u8]> + Debug + Send + Sync;

    /// Width of [`Self::Digest`] in bytes.
    const DIGEST_LEN: usize;

    /// The all-zero placeholder held by phantom leaf slots.
    const ZERO: Self::Digest;

    /// Hash the canonical encoding of one leaf.
    fn hash_leaf(bytes: &[u8]) -> Self::Digest;

    /// Hash two children into their parent, left child first.
    fn merge(left: &Self::Digest, right: &Self::Digest) -> Self::Digest;

    /// Interpret `bytes` as a digest. Returns `None` unless
    /// `bytes.len() == DIGEST_LEN`.
    fn digest_from_slice(bytes: &[u8]) -> Option<Self::Digest>;
}

/// Plain Blake3: `blake3(bytes)` for leaves, `blake3(left || right)` for
/// internal nodes.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Blake3Hasher;

impl MerkleHasher for Blake3Hasher {
    type Digest = [u8; 32];

    const DIGEST_LEN: usize = 32;
    const ZERO: [u8; 32] = [0u8; 32];

    fn hash_leaf(bytes: &[u8]) -> [u8; 32] {
        *blake3::hash(bytes).as_bytes()
    }

    fn merge(left: &[u8; 32], right: &[u8; 32]) -> [u8; 32] {
        let mut hasher = blake3::Hasher::new();
        hasher.update(left);
        hasher.update(right);
        *hasher.finalize().as_bytes()
    }

    fn digest_from_slice(bytes: &[u8]) -> Option<[u8; 32]> {
        bytes.try_into().ok()
    }
}

/// Blake3 with domain separation:
/// - Leaf nodes:     `blake3(0x00 || bytes)`
/// - Internal nodes: `blake3(0x01 || left || right)`
///
/// The tags keep an internal node's preimage from ever being accepted as
/// a leaf encoding.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct DomainSeparatedBlake3Hasher;

impl MerkleHasher for DomainSeparatedBlake3Hasher {
    type Digest = [u8; 32];

    const DIGEST_LEN: usize = 32;
    const ZERO: [u8; 32] = [0u8; 32];

    fn hash_leaf(bytes: &[u8]) -> [u8; 32] {
        let mut hasher = blake3::Hasher::new();
        hasher.update(&[LEAF_DOMAIN_TAG]);
        hasher.update(bytes);
        *hasher.finalize().as_bytes()
    }

    fn merge(left: &[u8; 32], right: &[u8; 32]) -> [u8; 32] {
        let mut input = [0u8; 65];
        input[0] = INTERNAL_DOMAIN_TAG;
        input[1..33].copy_from_slice(left);
        input[33..65].copy_from_slice(right);
        *blake3::hash(&input).as_bytes()
    }

    fn digest_from_slice(bytes: &[u8]) -> Option<[u8; 32]> {
        bytes.try_into().ok()
    }
}

/// BLAKE2b-512 with a 64-byte digest, untagged.
#[cfg(feature = "blake2b")]
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Blake2bHasher;

#[cfg(feature = "blake2b")]
impl MerkleHasher for Blake2bHasher {
    type Digest = [u8; 64];

    const DIGEST_LEN: usize = 64;
    const ZERO: [u8; 64] = [0u8; 64];

    fn hash_leaf(bytes: &[u8]) -> [u8; 64] {
        use blake2::{Blake2b512, Digest};

        let mut out = [0u8; 64];
        out.copy_from_slice(&Blake2b512::digest(bytes));
        out
    }

    fn merge(left: &[u8; 64], right: &[u8; 64]) -> [u8; 64] {
        use blake2::{Blake2b512, Digest};

        let mut hasher = Blake2b512::new();
        hasher.update(left);
        hasher.update(right);
        let mut out = [0u8; 64];
        out.copy_from_slice(&hasher.finalize());
        out
    }

    fn digest_from_slice(bytes: &[u8]) -> Option<[u8; 64]> {
        bytes.try_into().ok()
    }
}
