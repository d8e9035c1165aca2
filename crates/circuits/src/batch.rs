//! The batch circuit: N ring settlements chained over one ledger root,
//! committed to by a single SHA-256 public-data digest.
//!
//! Verifier-side statement: starting from the public ledger root, there is a
//! sequence of valid ring settlements whose published transfers hash to the
//! public digest. Everything else is witness.

use ark_bn254::Fr;
use ark_crypto_primitives::crh::sha256::constraints::Sha256Gadget;
use ark_ff::PrimeField;
use ark_r1cs_std::fields::fp::FpVar;
use ark_r1cs_std::prelude::*;
use ark_relations::r1cs::{ConstraintSynthesizer, ConstraintSystemRef, SynthesisError};
use sha2::{Digest, Sha256};

use crate::settlement::{RingSettlement, RingSettlementVar};
use crate::transfer::bits_to_bytes_le;

/// The SHA-256 digest over a batch's concatenated transfer records.
///
/// The digest does not fit in one field element, so it is exposed to the
/// verifier as two 128-bit field elements, low half first.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PublicData {
    pub digest: [u8; 32],
}

impl PublicData {
    /// Hash the transfer records of every settlement, in batch order, with
    /// the bit stream padded to a byte boundary exactly as the circuit pads
    /// it.
    pub fn compute(settlements: &[RingSettlement]) -> Self {
        let mut bits = Vec::new();
        for settlement in settlements {
            for record in settlement.ring.transfers() {
                bits.extend(record.to_bits());
            }
        }

        let mut digest = [0u8; 32];
        digest.copy_from_slice(&Sha256::digest(bits_to_bytes_le(&bits)));
        Self { digest }
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.digest)
    }

    /// The digest split into its two public field elements.
    pub fn field_elements(&self) -> (Fr, Fr) {
        (
            Fr::from_le_bytes_mod_order(&self.digest[..16]),
            Fr::from_le_bytes_mod_order(&self.digest[16..]),
        )
    }
}

/// The top-level circuit over a fixed number of rings.
///
/// `num_rings` shapes the constraint system; the witness fields are `None`
/// for key generation and constraint counting.
#[derive(Clone)]
pub struct SettlementBatchCircuit {
    pub num_rings: usize,
    pub ledger_root_before: Option<Fr>,
    pub public_data: Option<(Fr, Fr)>,
    pub settlements: Option<Vec<RingSettlement>>,
}

impl SettlementBatchCircuit {
    /// Full proving instance over the given settlements.
    pub fn new(settlements: Vec<RingSettlement>) -> Self {
        assert!(!settlements.is_empty(), "a batch settles at least one ring");

        let (d0, d1) = PublicData::compute(&settlements).field_elements();
        Self {
            num_rings: settlements.len(),
            ledger_root_before: Some(settlements[0].ledger_root_before),
            public_data: Some((d0, d1)),
            settlements: Some(settlements),
        }
    }

    /// Structure-only instance for setup and constraint counting.
    pub fn blank(num_rings: usize) -> Self {
        Self {
            num_rings,
            ledger_root_before: None,
            public_data: None,
            settlements: None,
        }
    }
}

impl ConstraintSynthesizer<Fr> for SettlementBatchCircuit {
    fn generate_constraints(self, cs: ConstraintSystemRef<Fr>) -> Result<(), SynthesisError> {
        if let Some(settlements) = &self.settlements {
            assert_eq!(
                settlements.len(),
                self.num_rings,
                "settlement count does not match the ring count"
            );
        }

        // Public inputs, in verifier order: root, then the digest halves.
        let root_before = FpVar::new_input(cs.clone(), || {
            self.ledger_root_before
                .ok_or(SynthesisError::AssignmentMissing)
        })?;
        let digest_low = FpVar::new_input(cs.clone(), || {
            self.public_data
                .map(|(d0, _)| d0)
                .ok_or(SynthesisError::AssignmentMissing)
        })?;
        let digest_high = FpVar::new_input(cs.clone(), || {
            self.public_data
                .map(|(_, d1)| d1)
                .ok_or(SynthesisError::AssignmentMissing)
        })?;

        // Chain the settlements; each consumes the previous root directly.
        let mut current_root = root_before;
        let mut transfer_bits = Vec::new();
        for i in 0..self.num_rings {
            let settlement = self.settlements.as_ref().map(|s| &s[i]);
            let var = RingSettlementVar::synthesize(cs.clone(), &current_root, settlement)?;
            current_root = var.root_after;
            for record in &var.transfers {
                transfer_bits.extend(record.to_bits());
            }
        }

        // Byte-align the stream the same way the native hash does.
        while transfer_bits.len() % 8 != 0 {
            transfer_bits.push(Boolean::FALSE);
        }
        let bytes: Vec<UInt8<Fr>> = transfer_bits
            .chunks(8)
            .map(UInt8::from_bits_le)
            .collect();

        let mut hasher = Sha256Gadget::default();
        hasher.update(&bytes)?;
        let digest = hasher.finalize()?.0;

        let mut low_bits = Vec::with_capacity(128);
        for byte in &digest[..16] {
            low_bits.extend(byte.to_bits_le()?);
        }
        let mut high_bits = Vec::with_capacity(128);
        for byte in &digest[16..] {
            high_bits.extend(byte.to_bits_le()?);
        }
        Boolean::le_bits_to_fp_var(&low_bits)?.enforce_equal(&digest_low)?;
        Boolean::le_bits_to_fp_var(&high_bits)?.enforce_equal(&digest_high)?;

        Ok(())
    }
}
