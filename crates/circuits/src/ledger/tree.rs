//! Native sparse Merkle tree over filled amounts.
//!
//! Most addresses are untouched, so only written leaves and their ancestors
//! are stored; everything else falls back to precomputed per-level defaults.
//! A leaf commits to one cumulative filled amount as `H(filled, filled)`.

use ark_bn254::Fr;
use std::collections::HashMap;

use super::path::MerklePath;
use crate::poseidon::poseidon_hash_two;

/// Sparse ledger tree: address -> cumulative filled amount.
#[derive(Clone)]
pub struct FilledLedger {
    /// Number of levels between the leaves and the root.
    depth: usize,

    /// Sparse node storage: (level, index) -> hash. Level 0 = leaves.
    nodes: HashMap<(usize, u64), Fr>,

    /// Raw filled amounts by address.
    leaves: HashMap<u64, u128>,

    /// defaults[l] = hash of an all-empty subtree of height l.
    defaults: Vec<Fr>,
}

impl FilledLedger {
    /// Create an empty ledger with the given depth.
    pub fn new(depth: usize) -> Self {
        let mut defaults = Vec::with_capacity(depth + 1);
        defaults.push(Self::leaf_hash(0));
        for _ in 0..depth {
            let prev = *defaults.last().unwrap();
            defaults.push(poseidon_hash_two(prev, prev));
        }

        Self {
            depth,
            nodes: HashMap::new(),
            leaves: HashMap::new(),
            defaults,
        }
    }

    /// Leaf commitment: the filled amount fed twice into the node hash.
    pub fn leaf_hash(filled: u128) -> Fr {
        let f = Fr::from(filled);
        poseidon_hash_two(f, f)
    }

    /// Filled amount at an address, zero if never written.
    pub fn get(&self, address: u64) -> u128 {
        self.leaves.get(&address).copied().unwrap_or(0)
    }

    /// Set the filled amount at an address and return the new root.
    pub fn update(&mut self, address: u64, filled: u128) -> Fr {
        assert!(
            address < (1u64 << self.depth),
            "ledger address exceeds tree capacity"
        );

        self.leaves.insert(address, filled);
        self.nodes.insert((0, address), Self::leaf_hash(filled));

        let mut index = address;
        let mut current = self.node(0, address);
        for level in 0..self.depth {
            let sibling = self.node(level, index ^ 1);
            let parent = if index & 1 == 0 {
                poseidon_hash_two(current, sibling)
            } else {
                poseidon_hash_two(sibling, current)
            };
            index >>= 1;
            self.nodes.insert((level + 1, index), parent);
            current = parent;
        }
        current
    }

    fn node(&self, level: usize, index: u64) -> Fr {
        self.nodes
            .get(&(level, index))
            .copied()
            .unwrap_or(self.defaults[level])
    }

    pub fn root(&self) -> Fr {
        self.node(self.depth, 0)
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Sibling path for the leaf at `address`.
    pub fn path(&self, address: u64) -> MerklePath {
        assert!(
            address < (1u64 << self.depth),
            "ledger address exceeds tree capacity"
        );

        let mut siblings = Vec::with_capacity(self.depth);
        let mut index = address;
        for level in 0..self.depth {
            siblings.push(self.node(level, index ^ 1));
            index >>= 1;
        }
        MerklePath::new(siblings)
    }

    /// Check a path against the current root.
    pub fn verify_path(&self, address: u64, filled: u128, path: &MerklePath) -> bool {
        path.compute_root(Self::leaf_hash(filled), address) == self.root()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::LEDGER_DEPTH;

    #[test]
    fn test_empty_ledger() {
        let ledger = FilledLedger::new(LEDGER_DEPTH);
        assert_eq!(ledger.get(0), 0);
        assert_eq!(ledger.get(4095), 0);
    }

    #[test]
    fn test_update_changes_root() {
        let mut ledger = FilledLedger::new(LEDGER_DEPTH);
        let root0 = ledger.root();
        ledger.update(17, 100);
        assert_ne!(root0, ledger.root());
        assert_eq!(ledger.get(17), 100);
    }

    #[test]
    fn test_rewrite_same_value_keeps_root() {
        let mut ledger = FilledLedger::new(LEDGER_DEPTH);
        ledger.update(17, 100);
        let root = ledger.root();
        ledger.update(17, 100);
        assert_eq!(root, ledger.root());
    }

    #[test]
    fn test_path_verifies() {
        let mut ledger = FilledLedger::new(LEDGER_DEPTH);
        ledger.update(3, 42);
        ledger.update(900, 7);

        let path = ledger.path(3);
        assert!(ledger.verify_path(3, 42, &path));
        assert!(!ledger.verify_path(3, 43, &path));
    }

    #[test]
    fn test_path_of_untouched_address() {
        let mut ledger = FilledLedger::new(LEDGER_DEPTH);
        ledger.update(3, 42);

        let path = ledger.path(1000);
        assert!(ledger.verify_path(1000, 0, &path));
    }

    #[test]
    #[should_panic(expected = "exceeds tree capacity")]
    fn test_address_out_of_range_panics() {
        let mut ledger = FilledLedger::new(LEDGER_DEPTH);
        ledger.update(1u64 << LEDGER_DEPTH, 1);
    }
}
