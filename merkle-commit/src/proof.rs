//! Openings: a leaf index together with its authentication path.
//!
//! An `Opening` is what a prover hands to a verifier alongside the leaf
//! value. The root is committed separately and is not part of it.

use merkle_commit_costs::CostResult;

use crate::{
    LeafEncoding, MAX_DEPTH, MerkleError, MerkleHasher,
    verify::{check_index, verify, verify_with_depth},
};

/// Size of the fixed header: `index (u64 BE) || depth (u8)`.
const HEADER_LEN: usize = 9;

/// An authentication path for one leaf.
///
/// `path` is ordered from the leaf's immediate sibling up to the sibling of
/// the root's child on the leaf's side.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Opening<H: MerkleHasher> {
    index: u64,
    path: Vec<H::Digest>,
}

impl<H: MerkleHasher> Opening<H> {
    /// Assemble an opening from its parts. Nothing is checked until
    /// [`verify`](Self::verify) or [`encode_to_vec`](Self::encode_to_vec).
    pub fn new(index: u64, path: Vec<H::Digest>) -> Self {
        Opening { index, path }
    }

    /// Index of the opened leaf.
    pub fn index(&self) -> u64 {
        self.index
    }

    /// Sibling digests, leaf level first.
    pub fn path(&self) -> &[H::Digest] {
        &self.path
    }

    /// Number of siblings, equal to the depth of the tree it came from.
    pub fn depth(&self) -> usize {
        self.path.len()
    }

    /// Consume the opening and return the sibling digests.
    pub fn into_path(self) -> Vec<H::Digest> {
        self.path
    }

    /// Check that `leaf` is committed at this opening's index under `root`.
    pub fn verify<T, E>(
        &self,
        root: &H::Digest,
        leaf: &T,
        encoding: &E,
    ) -> CostResult<bool, MerkleError>
    where
        T: ?Sized,
        E: LeafEncoding<T> + ?Sized,
    {
        verify::<H, T, E>(root, self.index, &self.path, leaf, encoding)
    }

    /// Like [`verify`](Self::verify), but rejects the opening with
    /// [`MerkleError::MalformedProof`] unless its depth is `expected_depth`.
    ///
    /// The depth travels inside the opening, so a verifier that learns the
    /// tree depth elsewhere should always pin it here. Without it a path cut
    /// short by one level still verifies when the caller is handed the two
    /// child digests of the dropped node as the "leaf".
    pub fn verify_with_depth<T, E>(
        &self,
        expected_depth: usize,
        root: &H::Digest,
        leaf: &T,
        encoding: &E,
    ) -> CostResult<bool, MerkleError>
    where
        T: ?Sized,
        E: LeafEncoding<T> + ?Sized,
    {
        verify_with_depth::<H, T, E>(expected_depth, root, self.index, &self.path, leaf, encoding)
    }

    /// Encode as `index (u64 BE) || depth (u8) || depth * DIGEST_LEN bytes`.
    pub fn encode_to_vec(&self) -> Result<Vec<u8>, MerkleError> {
        check_index(self.index, self.path.len())?;
        let mut buf = Vec::with_capacity(HEADER_LEN + self.path.len() * H::DIGEST_LEN);
        buf.extend_from_slice(&self.index.to_be_bytes());
        // check_index bounds the depth by MAX_DEPTH, so it fits in a u8
        buf.push(self.path.len() as u8);
        for sibling in &self.path {
            buf.extend_from_slice(sibling.as_ref());
        }
        Ok(buf)
    }

    /// Decode an opening produced by [`encode_to_vec`](Self::encode_to_vec).
    ///
    /// Rejects truncated input, trailing bytes, depths above [`MAX_DEPTH`]
    /// and indices that do not fit the encoded depth.
    pub fn decode_from_slice(bytes: &[u8]) -> Result<Self, MerkleError> {
        if bytes.len() < HEADER_LEN {
            return Err(MerkleError::MalformedProof(format!(
                "opening needs at least {} header bytes, got {}",
                HEADER_LEN,
                bytes.len()
            )));
        }
        let index = u64::from_be_bytes(
            bytes[..8]
                .try_into()
                .map_err(|_| MerkleError::MalformedProof("bad index bytes".into()))?,
        );
        let depth = bytes[8] as usize;
        if depth > MAX_DEPTH {
            return Err(MerkleError::MalformedProof(format!(
                "opening depth {} exceeds maximum {}",
                depth, MAX_DEPTH
            )));
        }
        let expected_len = HEADER_LEN + depth * H::DIGEST_LEN;
        if bytes.len() != expected_len {
            return Err(MerkleError::MalformedProof(format!(
                "opening expected {} bytes, got {}",
                expected_len,
                bytes.len()
            )));
        }
        check_index(index, depth)?;

        let path = bytes[HEADER_LEN..]
            .chunks_exact(H::DIGEST_LEN)
            .map(|chunk| {
                H::digest_from_slice(chunk)
                    .ok_or_else(|| MerkleError::MalformedProof("bad digest bytes".into()))
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Opening { index, path })
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;
    use crate::{Blake3Hasher, MerkleTree, RawBytes};

    fn sample_tree() -> MerkleTree {
        let leaves: Vec<String> = (0..8).map(|i| format!("codeword-{}", i)).collect();
        MerkleTree::<Blake3Hasher>::build(&leaves, &RawBytes)
            .unwrap()
            .expect("build tree")
    }

    #[test]
    fn test_encoded_opening_verifies_after_decode() {
        let tree = sample_tree();
        let opening = tree.open(5).expect("open 5");
        let bytes = opening.encode_to_vec().expect("encode");
        assert_eq!(bytes.len(), HEADER_LEN + 3 * 32);
        assert_eq!(&bytes[..8], &5u64.to_be_bytes());
        assert_eq!(bytes[8], 3);

        let decoded = Opening::<Blake3Hasher>::decode_from_slice(&bytes).expect("decode");
        assert_eq!(decoded, opening);
        assert!(
            decoded
                .verify(&tree.root(), "codeword-5", &RawBytes)
                .unwrap()
                .expect("verify")
        );
    }

    #[test]
    fn test_decode_rejects_truncated_input() {
        let bytes = sample_tree().open(1).expect("open").encode_to_vec().expect("encode");
        assert_matches!(
            Opening::<Blake3Hasher>::decode_from_slice(&bytes[..4]),
            Err(MerkleError::MalformedProof(_))
        );
        assert_matches!(
            Opening::<Blake3Hasher>::decode_from_slice(&bytes[..bytes.len() - 1]),
            Err(MerkleError::MalformedProof(_))
        );
    }

    #[test]
    fn test_decode_rejects_trailing_bytes() {
        let mut bytes = sample_tree().open(1).expect("open").encode_to_vec().expect("encode");
        bytes.push(0);
        assert_matches!(
            Opening::<Blake3Hasher>::decode_from_slice(&bytes),
            Err(MerkleError::MalformedProof(_))
        );
    }

    #[test]
    fn test_decode_rejects_excessive_depth() {
        let mut bytes = vec![0u8; HEADER_LEN];
        bytes[8] = 64;
        assert_matches!(
            Opening::<Blake3Hasher>::decode_from_slice(&bytes),
            Err(MerkleError::MalformedProof(_))
        );
    }

    #[test]
    fn test_decode_rejects_index_beyond_depth() {
        let mut bytes = sample_tree().open(1).expect("open").encode_to_vec().expect("encode");
        bytes[..8].copy_from_slice(&8u64.to_be_bytes());
        assert_matches!(
            Opening::<Blake3Hasher>::decode_from_slice(&bytes),
            Err(MerkleError::IndexOutOfRange { index: 8, bound: 8 })
        );
    }

    #[test]
    fn test_encode_rejects_inconsistent_opening() {
        let opening = Opening::<Blake3Hasher>::new(4, vec![[0u8; 32]; 2]);
        assert_matches!(
            opening.encode_to_vec(),
            Err(MerkleError::IndexOutOfRange { index: 4, bound: 4 })
        );
    }

    #[test]
    fn test_empty_opening_round_trips() {
        let opening = Opening::<Blake3Hasher>::new(0, Vec::new());
        let bytes = opening.encode_to_vec().expect("encode");
        assert_eq!(bytes, vec![0u8; HEADER_LEN]);
        let decoded = Opening::<Blake3Hasher>::decode_from_slice(&bytes).expect("decode");
        assert_eq!(decoded.depth(), 0);
    }
}
