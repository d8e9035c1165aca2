//! Proof verification.

use ark_bn254::Bn254;
use ark_groth16::{Groth16, VerifyingKey};
use ark_snark::SNARK;

use crate::prove::ProofWithInputs;
use crate::Result;

/// Check a batch proof against the verifying key.
pub fn verify_batch(vk: &VerifyingKey<Bn254>, proof: &ProofWithInputs) -> Result<bool> {
    Ok(Groth16::<Bn254>::verify(
        vk,
        &proof.public_inputs,
        &proof.proof,
    )?)
}
