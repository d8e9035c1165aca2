//! ZK circuits proving correctness of batched ring settlements.
//!
//! A ring is a pair of mutually matched counter-orders. For each ring the
//! circuit proves:
//! - both orders are signed, range-checked and token-compatible
//! - the fill amounts preserve each order's declared exchange rate
//!   (principal and fee legs) and never overfill an order
//! - the filled-amount ledger transitions root-to-root through an
//!   authenticated Merkle update per order
//!
//! `SettlementBatchCircuit` chains any number of rings through one evolving
//! ledger root and commits to all implied transfers with a single SHA-256
//! digest, the circuit's second public input.

pub mod batch;
pub mod compare;
pub mod dual;
pub mod eddsa;
pub mod ledger;
pub mod order;
pub mod poseidon;
pub mod rate;
pub mod settlement;
pub mod transfer;


pub use batch::{PublicData, SettlementBatchCircuit};
pub use ledger::{FilledLedger, MerklePath};
pub use order::Order;
pub use settlement::{Ring, RingSettlement};
pub use transfer::TransferRecord;

use ark_bn254::Fr;

/// Common field type for all circuits.
pub type ConstraintF = Fr;

/// Bit width of an order owner identifier.
pub const NUM_BITS_OWNER: usize = 160;

/// Bit width of a traded token identifier.
pub const NUM_BITS_TOKEN: usize = 160;

/// Bit width of a fee token identifier.
pub const NUM_BITS_TOKEN_FEE: usize = 161;

/// Bit width of order amounts and fill amounts.
pub const NUM_BITS_AMOUNT: usize = 128;

/// Depth of the filled-amount ledger tree.
pub const LEDGER_DEPTH: usize = 16;
