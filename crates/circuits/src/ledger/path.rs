//! Sibling authentication path for a ledger leaf.
//!
//! Unlike a free-standing Merkle proof, direction bits are not part of the
//! path: they are the bits of the ledger address, which the circuit derives
//! from the order itself.

use ark_bn254::Fr;

use crate::poseidon::poseidon_hash_two;

/// Sibling hashes from the leaf level up to just below the root.
#[derive(Clone, Debug)]
pub struct MerklePath {
    siblings: Vec<Fr>,
}

impl MerklePath {
    pub fn new(siblings: Vec<Fr>) -> Self {
        Self { siblings }
    }

    pub fn siblings(&self) -> &[Fr] {
        &self.siblings
    }

    pub fn depth(&self) -> usize {
        self.siblings.len()
    }

    /// Recompute the root for a leaf hash at `address`.
    pub fn compute_root(&self, leaf_hash: Fr, address: u64) -> Fr {
        let mut current = leaf_hash;
        for (level, sibling) in self.siblings.iter().enumerate() {
            let is_right = (address >> level) & 1 == 1;
            current = if is_right {
                poseidon_hash_two(*sibling, current)
            } else {
                poseidon_hash_two(current, *sibling)
            };
        }
        current
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compute_root_deterministic() {
        let path = MerklePath::new(vec![Fr::from(1u64), Fr::from(2u64)]);
        assert_eq!(
            path.compute_root(Fr::from(5u64), 0),
            path.compute_root(Fr::from(5u64), 0),
        );
    }

    #[test]
    fn test_address_changes_root() {
        let path = MerklePath::new(vec![Fr::from(1u64), Fr::from(2u64)]);
        let left = path.compute_root(Fr::from(5u64), 0);
        let right = path.compute_root(Fr::from(5u64), 1);
        assert_ne!(left, right);
    }
}
