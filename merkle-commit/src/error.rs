use thiserror::Error;

/// Errors from Merkle commitment operations.
///
/// A verification mismatch is not an error: [`verify`](fn@crate::verify)
/// reports it as `Ok(false)`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MerkleError {
    /// The leaf sequence or tree options cannot produce a tree.
    #[error("invalid input: {0}")]
    InvalidInput(String),
    /// An index outside the openable range was requested or claimed.
    #[error("index {index} out of range (must be < {bound})")]
    IndexOutOfRange {
        /// The offending index.
        index: u64,
        /// Exclusive upper bound the index was checked against.
        bound: u64,
    },
    /// An authentication path or opening payload has the wrong shape.
    #[error("malformed proof: {0}")]
    MalformedProof(String),
    /// A leaf could not be canonically encoded.
    #[error("leaf encoding failed: {0}")]
    Encoding(String),
}
