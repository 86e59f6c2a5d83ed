use merkle_commit_costs::{CostResult, CostsExt, OperationCost, cost_return_on_error_no_add};
use tracing::{debug, trace, warn};

use crate::{Blake3Hasher, LeafEncoding, MAX_DEPTH, MerkleError, MerkleHasher, Opening};

/// How a leaf count that is not a power of two is handled.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum PaddingPolicy {
    /// Pad up to the next power of two with phantom slots holding the
    /// all-zero digest. Phantom slots can never be opened.
    #[default]
    ZeroPadded,
    /// Reject any leaf count that is not a power of two.
    RequirePowerOfTwo,
}

/// Construction options for [`MerkleTree`].
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct TreeOptions {
    /// Padding behaviour for non-power-of-two leaf counts.
    pub padding: PaddingPolicy,
}

impl TreeOptions {
    /// Options with the given padding policy.
    pub fn with_padding(padding: PaddingPolicy) -> Self {
        TreeOptions { padding }
    }

    /// Validate `leaf_count` and return the padded capacity.
    fn capacity_for(&self, leaf_count: usize) -> Result<usize, MerkleError> {
        if leaf_count == 0 {
            return Err(MerkleError::InvalidInput(
                "leaf sequence must not be empty".into(),
            ));
        }
        if self.padding == PaddingPolicy::RequirePowerOfTwo && !leaf_count.is_power_of_two() {
            return Err(MerkleError::InvalidInput(format!(
                "leaf count {} is not a power of two",
                leaf_count
            )));
        }
        leaf_count
            .checked_next_power_of_two()
            .filter(|capacity| capacity.trailing_zeros() as usize <= MAX_DEPTH)
            .filter(|capacity| capacity.checked_mul(2).is_some())
            .ok_or_else(|| {
                MerkleError::InvalidInput(format!("leaf count {} is too large", leaf_count))
            })
    }
}

/// A binary Merkle commitment over an ordered leaf sequence.
///
/// Nodes live in a 1-indexed arena of `2 * capacity` digests: slot 1 is the
/// root, slot `k` has children `2k` and `2k + 1`, and leaf `i` sits at
/// `capacity + i`. Slot 0 is unused. The arena is never mutated after
/// construction, so a tree can be shared freely across threads.
#[derive(Debug, Clone)]
pub struct MerkleTree<H: MerkleHasher = Blake3Hasher> {
    leaf_count: usize,
    capacity: usize,
    depth: u32,
    nodes: Vec<H::Digest>,
}

impl<H: MerkleHasher> MerkleTree<H> {
    /// Commit to `leaves`, hashing each leaf's canonical encoding.
    ///
    /// Fails with [`MerkleError::InvalidInput`] if `leaves` is empty.
    pub fn build<T, E>(leaves: &[T], encoding: &E) -> CostResult<Self, MerkleError>
    where
        E: LeafEncoding<T> + ?Sized,
    {
        Self::build_with_options(leaves, encoding, TreeOptions::default())
    }

    /// Commit to `leaves` under explicit [`TreeOptions`].
    pub fn build_with_options<T, E>(
        leaves: &[T],
        encoding: &E,
        options: TreeOptions,
    ) -> CostResult<Self, MerkleError>
    where
        E: LeafEncoding<T> + ?Sized,
    {
        let mut cost = OperationCost::default();

        // Reject bad shapes before paying for any leaf hashing.
        cost_return_on_error_no_add!(&cost, options.capacity_for(leaves.len()));

        let mut leaf_digests = Vec::with_capacity(leaves.len());
        for leaf in leaves {
            let bytes = cost_return_on_error_no_add!(&cost, encoding.encode_leaf(leaf));
            cost.add_byte_hash(bytes.len());
            leaf_digests.push(H::hash_leaf(&bytes));
        }

        Self::from_leaf_digests(leaf_digests, options).add_cost(cost)
    }

    /// Build a tree from leaf digests that were already hashed.
    ///
    /// Only the internal-node pass runs; the digests are stored as given.
    pub fn from_leaf_digests(
        leaf_digests: Vec<H::Digest>,
        options: TreeOptions,
    ) -> CostResult<Self, MerkleError> {
        let mut cost = OperationCost::default();
        let leaf_count = leaf_digests.len();
        let capacity = cost_return_on_error_no_add!(&cost, options.capacity_for(leaf_count));
        let depth = capacity.trailing_zeros();

        let mut nodes = vec![H::ZERO; 2 * capacity];
        nodes[capacity..capacity + leaf_count].copy_from_slice(&leaf_digests);
        for k in (1..capacity).rev() {
            nodes[k] = H::merge(&nodes[2 * k], &nodes[2 * k + 1]);
        }
        cost.hash_node_calls += u32::try_from(capacity - 1).unwrap_or(u32::MAX);

        if capacity != leaf_count {
            warn!(
                leaf_count,
                capacity, "merkle tree padded with phantom zero-digest leaves"
            );
        }
        debug!(
            leaf_count,
            capacity,
            depth,
            root = %hex::encode(nodes[1]),
            "built merkle tree"
        );

        Ok(MerkleTree {
            leaf_count,
            capacity,
            depth,
            nodes,
        })
        .wrap_with_cost(cost)
    }

    /// The root digest committing to the whole leaf sequence.
    pub fn root(&self) -> H::Digest {
        self.nodes[1]
    }

    /// Number of real (non-phantom) leaves.
    pub fn leaf_count(&self) -> usize {
        self.leaf_count
    }

    /// Smallest power of two not below the leaf count.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of levels below the root; also the length of every path.
    pub fn depth(&self) -> u32 {
        self.depth
    }

    /// Digest of the leaf at `index`, or `None` if `index >= leaf_count`.
    pub fn leaf_digest(&self, index: usize) -> Option<H::Digest> {
        self.leaf_digests().get(index).copied()
    }

    /// Digests of the real leaves, in order.
    pub fn leaf_digests(&self) -> &[H::Digest] {
        &self.nodes[self.capacity..self.capacity + self.leaf_count]
    }

    /// Produce the authentication path for the leaf at `index`.
    ///
    /// Phantom padding slots (`leaf_count <= index < capacity`) are refused
    /// with [`MerkleError::IndexOutOfRange`] like any other index past the
    /// end: a path to a phantom slot only proves the zero placeholder.
    pub fn open(&self, index: usize) -> Result<Opening<H>, MerkleError> {
        if index >= self.leaf_count {
            return Err(MerkleError::IndexOutOfRange {
                index: index as u64,
                bound: self.leaf_count as u64,
            });
        }
        let path = self.sibling_path(index);
        trace!(index, depth = self.depth, "opened authentication path");
        Ok(Opening::new(index as u64, path))
    }

    /// Sibling digests from the slot of `index` up to the root's children.
    ///
    /// `index` must be below `capacity`; phantom slots are not filtered.
    pub(crate) fn sibling_path(&self, index: usize) -> Vec<H::Digest> {
        let mut cursor = self.capacity + index;
        let mut path = Vec::with_capacity(self.depth as usize);
        while cursor > 1 {
            path.push(self.nodes[cursor ^ 1]);
            cursor >>= 1;
        }
        path
    }
}
