//! Binary Merkle commitment tree.
//!
//! Commits to an ordered, non-empty sequence of leaves with a single root
//! digest, and opens any leaf with an authentication path of `depth`
//! sibling digests:
//!
//! - leaf slot:     `H(encode(leaf))`
//! - internal slot: `H(left || right)`
//!
//! When the leaf count is not a power of two the last level is padded with
//! phantom slots holding the all-zero digest. Phantom slots are part of the
//! root but can never be opened.
//!
//! Verification is a free function, [`verify()`], that needs only the root,
//! the index, the path and the leaf. Verifiers that know the tree depth
//! should use [`verify_with_depth`] (or [`Opening::verify_with_depth`]) so
//! that a shortened path is rejected instead of being checked against an
//! internal node.
//!
//! ```
//! use merkle_commit::{Blake3Hasher, MerkleTree, RawBytes};
//!
//! let leaves = ["a", "b", "c", "d"];
//! let tree = MerkleTree::<Blake3Hasher>::build(&leaves, &RawBytes)
//!     .unwrap()
//!     .expect("non-empty leaves");
//! let opening = tree.open(2).expect("index in range");
//! let depth = tree.depth() as usize;
//! assert!(
//!     opening
//!         .verify_with_depth(depth, &tree.root(), "c", &RawBytes)
//!         .unwrap()
//!         .expect("well formed")
//! );
//! ```

#![warn(missing_docs)]

mod encoding;
mod error;
mod hash;
mod proof;
mod tree;
mod verify;


pub use encoding::{BincodeEncoding, FnEncoding, LeafEncoding, RawBytes};
pub use error::MerkleError;
#[cfg(feature = "blake2b")]
pub use hash::Blake2bHasher;
pub use hash::{
    Blake3Hasher, DomainSeparatedBlake3Hasher, INTERNAL_DOMAIN_TAG, LEAF_DOMAIN_TAG,
    MerkleHasher,
};
pub use merkle_commit_costs::{CostResult, CostsExt, OperationCost};
pub use proof::Opening;
pub use tree::{MerkleTree, PaddingPolicy, TreeOptions};
pub use verify::{MAX_DEPTH, verify, verify_leaf_digest, verify_with_depth};
