//! Key generation for a fixed batch size.

use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use ark_bn254::Bn254;
use ark_groth16::{Groth16, ProvingKey, VerifyingKey};
use ark_serialize::{CanonicalDeserialize, CanonicalSerialize};
use ark_snark::SNARK;
use ark_std::rand::{CryptoRng, RngCore};

use settlement_circuits::SettlementBatchCircuit;

use crate::Result;

/// Groth16 keys for batches of exactly `num_rings` rings.
pub struct BatchKeys {
    pub num_rings: usize,
    pub pk: ProvingKey<Bn254>,
}

impl BatchKeys {
    pub fn vk(&self) -> &VerifyingKey<Bn254> {
        &self.pk.vk
    }
}

/// Run the circuit-specific setup over a blank instance of the batch
/// circuit.
pub fn setup_batch<R: RngCore + CryptoRng>(num_rings: usize, rng: &mut R) -> Result<BatchKeys> {
    let circuit = SettlementBatchCircuit::blank(num_rings);
    let (pk, _vk) = Groth16::<Bn254>::circuit_specific_setup(circuit, rng)?;
    Ok(BatchKeys { num_rings, pk })
}

/// Persist keys with the ring count they were generated for.
pub fn save_keys(keys: &BatchKeys, path: &Path) -> Result<()> {
    let mut file = BufWriter::new(File::create(path)?);
    (keys.num_rings as u64).serialize_compressed(&mut file)?;
    keys.pk.serialize_compressed(&mut file)?;
    Ok(())
}

pub fn load_keys(path: &Path) -> Result<BatchKeys> {
    let mut file = BufReader::new(File::open(path)?);
    let num_rings = u64::deserialize_compressed(&mut file)? as usize;
    let pk = ProvingKey::deserialize_compressed(&mut file)?;
    Ok(BatchKeys { num_rings, pk })
}
