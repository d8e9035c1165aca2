//! The filled-amount ledger: a sparse Merkle tree mapping an order's ledger
//! address to its cumulative filled amount.
//!
//! The circuit never stores the tree; it only proves one authenticated
//! root-to-root transition per order touched. The native tree here exists
//! for witness assembly and tests.

pub mod gadgets;
pub mod path;
pub mod tree;

pub use gadgets::{LedgerUpdateVar, MerklePathVar};
pub use path::MerklePath;
pub use tree::FilledLedger;
