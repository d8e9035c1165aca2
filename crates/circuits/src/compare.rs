//! Bounded less-or-equal enforcement.
//!
//! Both operands must already be bounded well below the field modulus
//! (order amounts and fills are 128-bit, the modulus exceeds 250 bits), so
//! field comparison coincides with integer comparison.

use ark_bn254::Fr;
use ark_r1cs_std::fields::fp::FpVar;
use ark_r1cs_std::prelude::*;
use ark_relations::r1cs::SynthesisError;
use core::cmp::Ordering;

/// Force `a <= b`.
///
/// This is an unconditional assertion, not a flag: the comparison primitive
/// yields the strict-less and less-or-equal bits, and the latter is pinned to
/// true. Any witness with `a > b` is unsatisfiable.
pub fn enforce_leq(a: &FpVar<Fr>, b: &FpVar<Fr>) -> Result<(), SynthesisError> {
    let _lt = a.is_cmp_unchecked(b, Ordering::Less, false)?;
    let leq = a.is_cmp(b, Ordering::Less, true)?;
    leq.enforce_equal(&Boolean::TRUE)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ark_relations::r1cs::ConstraintSystem;

    fn check(a: u128, b: u128) -> bool {
        let cs = ConstraintSystem::<Fr>::new_ref();
        let a_var = FpVar::new_witness(cs.clone(), || Ok(Fr::from(a))).unwrap();
        let b_var = FpVar::new_witness(cs.clone(), || Ok(Fr::from(b))).unwrap();
        enforce_leq(&a_var, &b_var).unwrap();
        cs.is_satisfied().unwrap()
    }

    #[test]
    fn test_strictly_less() {
        assert!(check(50, 100));
    }

    #[test]
    fn test_equal() {
        assert!(check(100, 100));
    }

    #[test]
    fn test_greater_rejected() {
        assert!(!check(101, 100));
    }

    #[test]
    fn test_max_amount_bounds() {
        assert!(check(u128::MAX - 1, u128::MAX));
        assert!(!check(u128::MAX, 0));
    }
}
