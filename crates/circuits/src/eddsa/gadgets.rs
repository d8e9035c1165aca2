//! In-circuit signature verification.

use ark_bn254::Fr;
use ark_ec::AffineRepr;
use ark_ed_on_bn254::constraints::EdwardsVar;
use ark_ed_on_bn254::EdwardsAffine;
use ark_ff::{BigInteger, PrimeField};
use ark_r1cs_std::fields::fp::FpVar;
use ark_r1cs_std::groups::CurveVar;
use ark_r1cs_std::prelude::*;
use ark_relations::r1cs::{ConstraintSystemRef, SynthesisError};

use super::{PublicKey, Signature};
use crate::poseidon::poseidon_hash_many_var;

/// Bit length used for the allocated response scalar.
pub const SCALAR_BITS: usize = 256;

/// Circuit form of a verification key.
#[derive(Clone)]
pub struct PublicKeyVar {
    pub point: EdwardsVar,
}

impl PublicKeyVar {
    pub fn new_witness(
        cs: ConstraintSystemRef<Fr>,
        pk: Option<&PublicKey>,
    ) -> Result<Self, SynthesisError> {
        let point = EdwardsVar::new_witness(cs, || {
            pk.map(|p| p.0.into_group())
                .ok_or(SynthesisError::AssignmentMissing)
        })?;
        Ok(Self { point })
    }
}

/// Circuit form of a signature. The response scalar lives as raw bits; it is
/// only ever consumed by a scalar multiplication.
#[derive(Clone)]
pub struct SignatureVar {
    pub r: EdwardsVar,
    pub s_bits: Vec<Boolean<Fr>>,
}

impl SignatureVar {
    pub fn new_witness(
        cs: ConstraintSystemRef<Fr>,
        sig: Option<&Signature>,
    ) -> Result<Self, SynthesisError> {
        let r = EdwardsVar::new_witness(cs.clone(), || {
            sig.map(|s| s.r.into_group())
                .ok_or(SynthesisError::AssignmentMissing)
        })?;

        let s_native: Option<Vec<bool>> = sig.map(|s| {
            let mut bits = s.s.into_bigint().to_bits_le();
            bits.resize(SCALAR_BITS, false);
            bits
        });
        let s_bits = (0..SCALAR_BITS)
            .map(|i| {
                Boolean::new_witness(cs.clone(), || {
                    s_native
                        .as_ref()
                        .map(|bits| bits[i])
                        .ok_or(SynthesisError::AssignmentMissing)
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { r, s_bits })
    }
}

/// Enforce `s·G = R + c·A` with `c = Poseidon(R.x, R.y, A.x, A.y, message)`.
///
/// An invalid signature makes the group equation unsatisfiable.
pub fn enforce_signature(
    cs: ConstraintSystemRef<Fr>,
    pk: &PublicKeyVar,
    sig: &SignatureVar,
    message: &FpVar<Fr>,
) -> Result<(), SynthesisError> {
    let c = poseidon_hash_many_var(
        cs,
        &[
            sig.r.x.clone(),
            sig.r.y.clone(),
            pk.point.x.clone(),
            pk.point.y.clone(),
            message.clone(),
        ],
    )?;
    let c_bits = c.to_bits_le()?;

    let base = EdwardsVar::constant(EdwardsAffine::generator().into_group());
    let lhs = base.scalar_mul_le(sig.s_bits.iter())?;
    let rhs = sig.r.clone() + pk.point.scalar_mul_le(c_bits.iter())?;

    lhs.enforce_equal(&rhs)
}
