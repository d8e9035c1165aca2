//! In-circuit Poseidon hashing.

use ark_bn254::Fr;
use ark_crypto_primitives::sponge::constraints::CryptographicSpongeVar;
use ark_crypto_primitives::sponge::poseidon::constraints::PoseidonSpongeVar;
use ark_r1cs_std::fields::fp::FpVar;
use ark_relations::r1cs::{ConstraintSystemRef, SynthesisError};

use super::poseidon_config;

/// Hash two field variables.
pub fn poseidon_hash_two_var(
    cs: ConstraintSystemRef<Fr>,
    a: &FpVar<Fr>,
    b: &FpVar<Fr>,
) -> Result<FpVar<Fr>, SynthesisError> {
    let config = poseidon_config();
    let mut sponge = PoseidonSpongeVar::new(cs, &config);
    sponge.absorb(a)?;
    sponge.absorb(b)?;
    let out = sponge.squeeze_field_elements(1)?;
    Ok(out[0].clone())
}

/// Hash a sequence of field variables in order.
pub fn poseidon_hash_many_var(
    cs: ConstraintSystemRef<Fr>,
    inputs: &[FpVar<Fr>],
) -> Result<FpVar<Fr>, SynthesisError> {
    let config = poseidon_config();
    let mut sponge = PoseidonSpongeVar::new(cs, &config);
    for input in inputs {
        sponge.absorb(input)?;
    }
    let out = sponge.squeeze_field_elements(1)?;
    Ok(out[0].clone())
}

#[cfg(test)]
mod tests {
    use super::super::{poseidon_hash_many, poseidon_hash_two};
    use super::*;
    use ark_r1cs_std::alloc::AllocVar;
    use ark_r1cs_std::eq::EqGadget;
    use ark_relations::r1cs::ConstraintSystem;

    #[test]
    fn test_gadget_matches_native() {
        let cs = ConstraintSystem::<Fr>::new_ref();

        let a = Fr::from(42u64);
        let b = Fr::from(123u64);

        let a_var = FpVar::new_witness(cs.clone(), || Ok(a)).unwrap();
        let b_var = FpVar::new_witness(cs.clone(), || Ok(b)).unwrap();

        let out_var = poseidon_hash_two_var(cs.clone(), &a_var, &b_var).unwrap();
        let expected_var = FpVar::new_input(cs.clone(), || Ok(poseidon_hash_two(a, b))).unwrap();
        out_var.enforce_equal(&expected_var).unwrap();

        assert!(cs.is_satisfied().unwrap());
    }

    #[test]
    fn test_gadget_many_matches_native() {
        let cs = ConstraintSystem::<Fr>::new_ref();

        let inputs = vec![Fr::from(1u64), Fr::from(2u64), Fr::from(3u64)];
        let input_vars: Vec<FpVar<Fr>> = inputs
            .iter()
            .map(|x| FpVar::new_witness(cs.clone(), || Ok(*x)).unwrap())
            .collect();

        let out_var = poseidon_hash_many_var(cs.clone(), &input_vars).unwrap();
        let expected_var =
            FpVar::new_input(cs.clone(), || Ok(poseidon_hash_many(&inputs))).unwrap();
        out_var.enforce_equal(&expected_var).unwrap();

        assert!(cs.is_satisfied().unwrap());
    }
}
