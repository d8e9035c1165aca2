//! Proof generation over an assembled batch.

use ark_bn254::{Bn254, Fr};
use ark_groth16::{Groth16, Proof};
use ark_serialize::{CanonicalDeserialize, CanonicalSerialize};
use ark_snark::SNARK;
use ark_std::rand::{CryptoRng, RngCore};

use settlement_circuits::{RingSettlement, SettlementBatchCircuit};

use crate::setup::BatchKeys;
use crate::ProverError;

/// A proof together with the public inputs it verifies against:
/// the pre-batch ledger root and the two digest halves.
#[derive(Clone, Debug, CanonicalSerialize, CanonicalDeserialize)]
pub struct ProofWithInputs {
    pub proof: Proof<Bn254>,
    pub public_inputs: Vec<Fr>,
}

/// Prove a batch of settlements under keys generated for its ring count.
pub fn prove_batch<R: RngCore + CryptoRng>(
    keys: &BatchKeys,
    settlements: Vec<RingSettlement>,
    rng: &mut R,
) -> crate::Result<ProofWithInputs> {
    if settlements.is_empty() {
        return Err(ProverError::EmptyBatch);
    }
    if settlements.len() != keys.num_rings {
        return Err(ProverError::RingCountMismatch {
            expected: keys.num_rings,
            actual: settlements.len(),
        });
    }

    let circuit = SettlementBatchCircuit::new(settlements);
    let root = circuit.ledger_root_before.unwrap_or_default();
    let (d0, d1) = circuit.public_data.unwrap_or_default();

    let proof = Groth16::<Bn254>::prove(&keys.pk, circuit, rng)?;
    Ok(ProofWithInputs {
        proof,
        public_inputs: vec![root, d0, d1],
    })
}
