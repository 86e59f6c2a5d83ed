//! Authentication path verification.
//!
//! Pure functions: no tree and no shared state. A verifier needs only the
//! claimed root, the leaf index, the sibling path and the leaf itself.

use merkle_commit_costs::{CostResult, CostsExt, OperationCost, cost_return_on_error_no_add};
use tracing::debug;

use crate::{LeafEncoding, MerkleError, MerkleHasher};

/// Longest authentication path accepted; keeps `1 << depth` inside a `u64`.
pub const MAX_DEPTH: usize = 63;

/// Check that `leaf` sits at `index` under `root`.
///
/// The leaf is encoded with `encoding`, hashed, and combined with each
/// sibling in `path`, on the left or right as the corresponding bit of
/// `index` dictates. Returns `Ok(false)` on a digest mismatch.
///
/// Fails with [`MerkleError::MalformedProof`] if the path is longer than
/// [`MAX_DEPTH`] and with [`MerkleError::IndexOutOfRange`] if `index` does
/// not fit in a tree of `path.len()` levels.
pub fn verify<H, T, E>(
    root: &H::Digest,
    index: u64,
    path: &[H::Digest],
    leaf: &T,
    encoding: &E,
) -> CostResult<bool, MerkleError>
where
    H: MerkleHasher,
    T: ?Sized,
    E: LeafEncoding<T> + ?Sized,
{
    let mut cost = OperationCost::default();

    cost_return_on_error_no_add!(&cost, check_index(index, path.len()));
    let bytes = cost_return_on_error_no_add!(&cost, encoding.encode_leaf(leaf));
    cost.add_byte_hash(bytes.len());
    let leaf_digest = H::hash_leaf(&bytes);

    verify_leaf_digest::<H>(root, index, path, leaf_digest).add_cost(cost)
}

/// Like [`verify`], but first requires `path.len() == expected_depth`.
///
/// Use this whenever the tree depth is known from context so that a
/// truncated or padded path is reported as [`MerkleError::MalformedProof`]
/// instead of a plain mismatch.
pub fn verify_with_depth<H, T, E>(
    expected_depth: usize,
    root: &H::Digest,
    index: u64,
    path: &[H::Digest],
    leaf: &T,
    encoding: &E,
) -> CostResult<bool, MerkleError>
where
    H: MerkleHasher,
    T: ?Sized,
    E: LeafEncoding<T> + ?Sized,
{
    if path.len() != expected_depth {
        return Err(MerkleError::MalformedProof(format!(
            "path has {} siblings, expected {}",
            path.len(),
            expected_depth
        )))
        .wrap_with_cost(OperationCost::default());
    }
    verify::<H, T, E>(root, index, path, leaf, encoding)
}

/// Verify a leaf that the caller has already hashed.
pub fn verify_leaf_digest<H: MerkleHasher>(
    root: &H::Digest,
    index: u64,
    path: &[H::Digest],
    leaf_digest: H::Digest,
) -> CostResult<bool, MerkleError> {
    let mut cost = OperationCost::default();
    cost_return_on_error_no_add!(&cost, check_index(index, path.len()));

    let computed = fold_path::<H>(leaf_digest, index, path);
    cost.hash_node_calls += path.len() as u32;

    let matches = &computed == root;
    if !matches {
        debug!(
            index,
            depth = path.len(),
            expected = %hex::encode(root),
            computed = %hex::encode(computed),
            "authentication path does not reproduce root"
        );
    }
    Ok(matches).wrap_with_cost(cost)
}

/// Ensure `index` addresses a leaf of a tree with `depth` levels.
pub(crate) fn check_index(index: u64, depth: usize) -> Result<(), MerkleError> {
    if depth > MAX_DEPTH {
        return Err(MerkleError::MalformedProof(format!(
            "path depth {} exceeds maximum {}",
            depth, MAX_DEPTH
        )));
    }
    let bound = 1u64 << depth;
    if index >= bound {
        return Err(MerkleError::IndexOutOfRange { index, bound });
    }
    Ok(())
}

/// Recompute the root reached from `leaf_digest` at `index` along `path`.
pub(crate) fn fold_path<H: MerkleHasher>(
    leaf_digest: H::Digest,
    mut index: u64,
    path: &[H::Digest],
) -> H::Digest {
    let mut running = leaf_digest;
    for sibling in path {
        running = if index & 1 == 0 {
            H::merge(&running, sibling)
        } else {
            H::merge(sibling, &running)
        };
        index >>= 1;
    }
    running
}
