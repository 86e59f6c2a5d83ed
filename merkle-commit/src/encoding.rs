//! Canonical leaf encodings.
//!
//! Builder and verifier take the encoding as an argument. Two equal
//! logical values must encode to the same bytes, or the root does not bind
//! the leaf sequence.

use std::borrow::Cow;

use bincode::Encode;

use crate::MerkleError;

/// Turns a leaf value into the bytes that get hashed.
pub trait LeafEncoding<T: ?Sized> {
    /// Canonical bytes for `leaf`.
    fn encode_leaf<'a>(&self, leaf: &'a T) -> Result<Cow<'a, [u8]>, MerkleError>;
}

/// Hashes the leaf's own bytes as-is (strings hash their UTF-8 bytes).
#[derive(Debug, Default, Clone, Copy)]
pub struct RawBytes;

impl<T: AsRef<[u8]> + ?Sized> LeafEncoding<T> for RawBytes {
    fn encode_leaf<'a>(&self, leaf: &'a T) -> Result<Cow<'a, [u8]>, MerkleError> {
        Ok(Cow::Borrowed(leaf.as_ref()))
    }
}

/// Encodes leaves with bincode using big-endian, fixed-width integers.
#[derive(Debug, Default, Clone, Copy)]
pub struct BincodeEncoding;

impl<T: Encode> LeafEncoding<T> for BincodeEncoding {
    fn encode_leaf<'a>(&self, leaf: &'a T) -> Result<Cow<'a, [u8]>, MerkleError> {
        let config = bincode::config::standard()
            .with_big_endian()
            .with_fixed_int_encoding();
        bincode::encode_to_vec(leaf, config)
            .map(Cow::Owned)
            .map_err(|e| MerkleError::Encoding(format!("bincode encode error: {}", e)))
    }
}

/// Wraps a caller-supplied serialization function.
#[derive(Clone, Copy)]
pub struct FnEncoding<F>(pub F);

impl<T: ?Sized, F: Fn(&T) -> Vec<u8>> LeafEncoding<T> for FnEncoding<F> {
    fn encode_leaf<'a>(&self, leaf: &'a T) -> Result<Cow<'a, [u8]>, MerkleError> {
        Ok(Cow::Owned((self.0)(leaf)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raw_bytes_borrows() {
        let leaf = "abc";
        let bytes = RawBytes.encode_leaf(leaf).expect("encode str");
        assert!(matches!(bytes, Cow::Borrowed(_)));
        assert_eq!(bytes.as_ref(), b"abc");
    }

    #[test]
    fn test_bincode_is_fixed_width_big_endian() {
        let bytes = BincodeEncoding.encode_leaf(&1u32).expect("encode u32");
        assert_eq!(bytes.as_ref(), &[0, 0, 0, 1]);

        let row = (7u16, String::from("hi"));
        let bytes = BincodeEncoding.encode_leaf(&row).expect("encode tuple");
        // u16 + u64 length prefix + utf-8 bytes
        assert_eq!(bytes.as_ref(), &[0, 7, 0, 0, 0, 0, 0, 0, 0, 2, b'h', b'i']);
    }

    #[test]
    fn test_bincode_is_deterministic() {
        let a = BincodeEncoding
            .encode_leaf(&vec![1u64, 2, 3])
            .expect("encode")
            .into_owned();
        let b = BincodeEncoding
            .encode_leaf(&vec![1u64, 2, 3])
            .expect("encode")
            .into_owned();
        assert_eq!(a, b);
    }

    #[test]
    fn test_fn_encoding_calls_closure() {
        let encoding = FnEncoding(|x: &u64| x.to_le_bytes().to_vec());
        let bytes = encoding.encode_leaf(&258u64).expect("encode");
        assert_eq!(bytes.as_ref(), &[2, 1, 0, 0, 0, 0, 0, 0]);
    }
}
