//! Dual representation of a bounded value: packed field variable plus its
//! enforced little-endian bit decomposition at a declared width.
//!
//! Every order field and fill amount is allocated this way. The packed form
//! feeds arithmetic constraints (rates, comparisons, hashes); the bit form
//! feeds the public-data byte stream. The decomposition constraint keeps the
//! two in agreement, and forcing all bits above the declared width to zero
//! doubles as the range check.

use ark_bn254::Fr;
use ark_r1cs_std::fields::fp::FpVar;
use ark_r1cs_std::prelude::*;
use ark_relations::r1cs::{ConstraintSystemRef, SynthesisError};

/// A range-checked value with both packed and bit representations.
#[derive(Clone)]
pub struct DualVar {
    /// The value as a single field variable.
    pub packed: FpVar<Fr>,

    /// Little-endian bits, exactly `width` of them.
    pub bits: Vec<Boolean<Fr>>,
}

impl DualVar {
    /// Allocate a witness value and constrain it to `width` bits.
    ///
    /// A value that does not fit in `width` bits makes the decomposition
    /// unsatisfiable.
    pub fn new_witness(
        cs: ConstraintSystemRef<Fr>,
        value: impl FnOnce() -> Result<Fr, SynthesisError>,
        width: usize,
    ) -> Result<Self, SynthesisError> {
        let packed = FpVar::new_witness(cs, value)?;
        let all_bits = packed.to_bits_le()?;
        for bit in &all_bits[width..] {
            bit.enforce_equal(&Boolean::FALSE)?;
        }

        Ok(Self {
            packed,
            bits: all_bits[..width].to_vec(),
        })
    }

    /// Declared bit width.
    pub fn width(&self) -> usize {
        self.bits.len()
    }
}
