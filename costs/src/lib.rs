#![deny(missing_docs)]
//! Interface crate to unify how operations' hashing costs are passed and
//! retrieved.

mod context;

use std::ops::{Add, AddAssign};

pub use context::{CostContext, CostResult, CostsExt};

/// Piece of data representing the hashing work an operation performed.
#[derive(Debug, Default, Clone, Copy, Eq, PartialEq)]
pub struct OperationCost {
    /// How many times hash was called for raw bytes (encoded leaves).
    pub hash_byte_calls: u32,
    /// How many times two child digests were merged into a parent.
    pub hash_node_calls: u32,
    /// Total number of leaf bytes fed to the hash function.
    pub hashed_bytes: u64,
}

impl OperationCost {
    /// Helper function to build default `OperationCost` with different
    /// `hash_byte_calls`.
    pub fn with_hash_byte_calls(hash_byte_calls: u32) -> Self {
        OperationCost {
            hash_byte_calls,
            ..Default::default()
        }
    }

    /// Helper function to build default `OperationCost` with different
    /// `hash_node_calls`.
    pub fn with_hash_node_calls(hash_node_calls: u32) -> Self {
        OperationCost {
            hash_node_calls,
            ..Default::default()
        }
    }

    /// Total number of hash invocations of either kind.
    pub fn total_hash_calls(&self) -> u64 {
        self.hash_byte_calls as u64 + self.hash_node_calls as u64
    }

    /// Record one hash over `len` raw bytes.
    pub fn add_byte_hash(&mut self, len: usize) {
        self.hash_byte_calls += 1;
        self.hashed_bytes += len as u64;
    }
}

impl Add for OperationCost {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        OperationCost {
            hash_byte_calls: self.hash_byte_calls + rhs.hash_byte_calls,
            hash_node_calls: self.hash_node_calls + rhs.hash_node_calls,
            hashed_bytes: self.hashed_bytes + rhs.hashed_bytes,
        }
    }
}

impl AddAssign for OperationCost {
    fn add_assign(&mut self, rhs: Self) {
        self.hash_byte_calls += rhs.hash_byte_calls;
        self.hash_node_calls += rhs.hash_node_calls;
        self.hashed_bytes += rhs.hashed_bytes;
    }
}

/// `?` for costed results: unwraps a `CostResult`, folding its cost into the
/// accumulator `$cost`. On `Err` the enclosing function returns early with
/// everything accumulated so far, so no hashing work goes unreported.
#[macro_export]
macro_rules! cost_return_on_error {
    ( &mut $cost:ident, $($body:tt)+ ) => {
        {
            use $crate::CostsExt;
            let result_with_cost = { $($body)+ };
            let result = result_with_cost.unwrap_add_cost(&mut $cost);
            match result {
                Ok(x) => x,
                Err(e) => return Err(e).wrap_with_cost($cost),
            }
        }
    };
}

/// `?` for a plain `Result` inside a costed function. Nothing is added to
/// `$cost`; an `Err` returns early carrying the cost accumulated so far.
#[macro_export]
macro_rules! cost_return_on_error_no_add {
    ( &$cost:ident, $($body:tt)+ ) => {
        {
            use $crate::CostsExt;
            let result = { $($body)+ };
            match result {
                Ok(x) => x,
                Err(e) => return Err(e).wrap_with_cost($cost),
            }
        }
    };
}
