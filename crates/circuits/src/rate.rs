//! Exchange-rate preservation via cross-multiplication.

use ark_bn254::Fr;
use ark_r1cs_std::fields::fp::FpVar;
use ark_r1cs_std::prelude::*;
use ark_relations::r1cs::{ConstraintSystemRef, SynthesisError};

/// Force `amount_sell * fill_buy == amount_buy * fill_sell`.
///
/// One intermediate witness carries the common product, tied down by two
/// multiplication constraints. Division is avoided entirely: with all
/// operands bounded to 128 bits the products stay far below the modulus, so
/// field equality is integer equality and the executed fill ratio matches
/// the declared rate exactly, with no rounding drift.
pub fn enforce_rate(
    cs: ConstraintSystemRef<Fr>,
    fill_sell: &FpVar<Fr>,
    fill_buy: &FpVar<Fr>,
    amount_sell: &FpVar<Fr>,
    amount_buy: &FpVar<Fr>,
) -> Result<(), SynthesisError> {
    let invariant = FpVar::new_witness(cs, || Ok(amount_sell.value()? * fill_buy.value()?))?;
    amount_sell.mul_equals(fill_buy, &invariant)?;
    amount_buy.mul_equals(fill_sell, &invariant)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ark_relations::r1cs::ConstraintSystem;

    fn check(fill_sell: u128, fill_buy: u128, amount_sell: u128, amount_buy: u128) -> bool {
        let cs = ConstraintSystem::<Fr>::new_ref();
        let fs = FpVar::new_witness(cs.clone(), || Ok(Fr::from(fill_sell))).unwrap();
        let fb = FpVar::new_witness(cs.clone(), || Ok(Fr::from(fill_buy))).unwrap();
        let ams = FpVar::new_witness(cs.clone(), || Ok(Fr::from(amount_sell))).unwrap();
        let amb = FpVar::new_witness(cs.clone(), || Ok(Fr::from(amount_buy))).unwrap();
        enforce_rate(cs.clone(), &fs, &fb, &ams, &amb).unwrap();
        cs.is_satisfied().unwrap()
    }

    #[test]
    fn test_exact_rate_holds() {
        // 50 * 200 == 100 * 100
        assert!(check(50, 100, 100, 200));
    }

    #[test]
    fn test_off_by_one_rejected() {
        // 99 instead of 100 breaks the invariant
        assert!(!check(50, 99, 100, 200));
    }

    #[test]
    fn test_full_fill() {
        assert!(check(100, 200, 100, 200));
    }

    #[test]
    fn test_zero_fill() {
        assert!(check(0, 0, 100, 200));
    }
}
