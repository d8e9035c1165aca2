//! Ledger authentication and update gadgets.

use ark_bn254::Fr;
use ark_r1cs_std::fields::fp::FpVar;
use ark_r1cs_std::prelude::*;
use ark_relations::r1cs::{ConstraintSystemRef, SynthesisError};

use super::path::MerklePath;
use crate::poseidon::poseidon_hash_two_var;

/// Circuit form of a sibling path.
#[derive(Clone)]
pub struct MerklePathVar {
    siblings: Vec<FpVar<Fr>>,
}

impl MerklePathVar {
    /// Allocate a path of exactly `depth` siblings.
    ///
    /// A supplied path of the wrong length is a construction-contract
    /// violation and panics rather than building a wrong circuit.
    pub fn new_witness(
        cs: ConstraintSystemRef<Fr>,
        depth: usize,
        path: Option<&MerklePath>,
    ) -> Result<Self, SynthesisError> {
        if let Some(p) = path {
            assert_eq!(
                p.depth(),
                depth,
                "authentication path length does not match the ledger depth"
            );
        }

        let siblings = (0..depth)
            .map(|i| {
                FpVar::new_witness(cs.clone(), || {
                    path.map(|p| p.siblings()[i])
                        .ok_or(SynthesisError::AssignmentMissing)
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { siblings })
    }
}

/// Fold a leaf hash up to the root along the sibling path, with direction
/// bits taken from the ledger address (LSB = leaf level).
pub fn compute_root_var(
    cs: ConstraintSystemRef<Fr>,
    leaf_hash: &FpVar<Fr>,
    address_bits: &[Boolean<Fr>],
    path: &MerklePathVar,
) -> Result<FpVar<Fr>, SynthesisError> {
    let mut current = leaf_hash.clone();
    for (sibling, is_right) in path.siblings.iter().zip(address_bits.iter()) {
        // If is_right: H(sibling, current), else H(current, sibling)
        let left = is_right.select(sibling, &current)?;
        let right = is_right.select(&current, sibling)?;
        current = poseidon_hash_two_var(cs.clone(), &left, &right)?;
    }
    Ok(current)
}

/// One authenticated ledger transition for a single order.
///
/// Verifies `Leaf(filledBefore)` against `root_before` at the given address,
/// then recomputes a root from `Leaf(filledBefore + fill)` over the same
/// siblings. Updating one leaf changes no sibling, so the path carries over.
pub struct LedgerUpdateVar {
    pub root_after: FpVar<Fr>,
    pub filled_after: FpVar<Fr>,
}

impl LedgerUpdateVar {
    pub fn synthesize(
        cs: ConstraintSystemRef<Fr>,
        root_before: &FpVar<Fr>,
        address_bits: &[Boolean<Fr>],
        fill: &FpVar<Fr>,
        witness: Option<(u128, &MerklePath)>,
    ) -> Result<Self, SynthesisError> {
        assert_eq!(
            address_bits.len(),
            crate::LEDGER_DEPTH,
            "ledger address width does not match the ledger depth"
        );

        let filled_before = FpVar::new_witness(cs.clone(), || {
            witness
                .map(|(filled, _)| Fr::from(filled))
                .ok_or(SynthesisError::AssignmentMissing)
        })?;
        let filled_after =
            FpVar::new_witness(cs.clone(), || Ok(filled_before.value()? + fill.value()?))?;
        (&filled_before + fill).enforce_equal(&filled_after)?;

        let path =
            MerklePathVar::new_witness(cs.clone(), crate::LEDGER_DEPTH, witness.map(|(_, p)| p))?;

        let leaf_before = poseidon_hash_two_var(cs.clone(), &filled_before, &filled_before)?;
        let computed_before = compute_root_var(cs.clone(), &leaf_before, address_bits, &path)?;
        computed_before.enforce_equal(root_before)?;

        let leaf_after = poseidon_hash_two_var(cs.clone(), &filled_after, &filled_after)?;
        let root_after = compute_root_var(cs, &leaf_after, address_bits, &path)?;

        Ok(Self {
            root_after,
            filled_after,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::FilledLedger;
    use crate::LEDGER_DEPTH;
    use ark_relations::r1cs::ConstraintSystem;

    fn address_bits(cs: ConstraintSystemRef<Fr>, address: u64) -> Vec<Boolean<Fr>> {
        (0..LEDGER_DEPTH)
            .map(|i| {
                Boolean::new_witness(cs.clone(), || Ok((address >> i) & 1 == 1)).unwrap()
            })
            .collect()
    }

    #[test]
    fn test_update_matches_native() {
        let mut ledger = FilledLedger::new(LEDGER_DEPTH);
        ledger.update(42, 100);
        let root_before = ledger.root();
        let path = ledger.path(42);

        ledger.update(42, 150);
        let expected_after = ledger.root();

        let cs = ConstraintSystem::<Fr>::new_ref();
        let root_var = FpVar::new_input(cs.clone(), || Ok(root_before)).unwrap();
        let fill = FpVar::new_witness(cs.clone(), || Ok(Fr::from(50u64))).unwrap();
        let bits = address_bits(cs.clone(), 42);

        let update =
            LedgerUpdateVar::synthesize(cs.clone(), &root_var, &bits, &fill, Some((100, &path)))
                .unwrap();

        let expected_var = FpVar::new_input(cs.clone(), || Ok(expected_after)).unwrap();
        update.root_after.enforce_equal(&expected_var).unwrap();

        assert!(cs.is_satisfied().unwrap());
    }

    #[test]
    fn test_zero_fill_keeps_root() {
        let mut ledger = FilledLedger::new(LEDGER_DEPTH);
        ledger.update(7, 33);
        let root = ledger.root();
        let path = ledger.path(7);

        let cs = ConstraintSystem::<Fr>::new_ref();
        let root_var = FpVar::new_input(cs.clone(), || Ok(root)).unwrap();
        let fill = FpVar::new_witness(cs.clone(), || Ok(Fr::from(0u64))).unwrap();
        let bits = address_bits(cs.clone(), 7);

        let update =
            LedgerUpdateVar::synthesize(cs.clone(), &root_var, &bits, &fill, Some((33, &path)))
                .unwrap();

        update.root_after.enforce_equal(&root_var).unwrap();
        assert!(cs.is_satisfied().unwrap());
    }

    #[test]
    fn test_wrong_filled_before_rejected() {
        let mut ledger = FilledLedger::new(LEDGER_DEPTH);
        ledger.update(42, 100);
        let root = ledger.root();
        let path = ledger.path(42);

        let cs = ConstraintSystem::<Fr>::new_ref();
        let root_var = FpVar::new_input(cs.clone(), || Ok(root)).unwrap();
        let fill = FpVar::new_witness(cs.clone(), || Ok(Fr::from(1u64))).unwrap();
        let bits = address_bits(cs.clone(), 42);

        // Claims 99 filled where the tree says 100
        let _ = LedgerUpdateVar::synthesize(cs.clone(), &root_var, &bits, &fill, Some((99, &path)))
            .unwrap();

        assert!(!cs.is_satisfied().unwrap());
    }

    #[test]
    fn test_tampered_sibling_rejected() {
        let mut ledger = FilledLedger::new(LEDGER_DEPTH);
        ledger.update(42, 100);
        let root = ledger.root();
        let mut siblings = ledger.path(42).siblings().to_vec();
        siblings[3] += Fr::from(1u64);
        let path = MerklePath::new(siblings);

        let cs = ConstraintSystem::<Fr>::new_ref();
        let root_var = FpVar::new_input(cs.clone(), || Ok(root)).unwrap();
        let fill = FpVar::new_witness(cs.clone(), || Ok(Fr::from(1u64))).unwrap();
        let bits = address_bits(cs.clone(), 42);

        let _ = LedgerUpdateVar::synthesize(cs.clone(), &root_var, &bits, &fill, Some((100, &path)))
            .unwrap();

        assert!(!cs.is_satisfied().unwrap());
    }

    #[test]
    #[should_panic(expected = "authentication path length")]
    fn test_short_path_panics() {
        let path = MerklePath::new(vec![Fr::from(0u64); LEDGER_DEPTH - 1]);
        let cs = ConstraintSystem::<Fr>::new_ref();
        let _ = MerklePathVar::new_witness(cs, LEDGER_DEPTH, Some(&path));
    }
}
