//! Token transfer records emitted by a settlement.
//!
//! Each settled ring publishes four transfers. Records are serialized as a
//! fixed-width little-endian bit stream (token, from, to, amount) and the
//! concatenation over a batch is what the public-data digest commits to.

use ark_bn254::Fr;
use ark_ff::{BigInteger, PrimeField};
use ark_r1cs_std::prelude::*;

use crate::NUM_BITS_AMOUNT;

/// Little-endian bits of a field element, truncated or zero-extended to
/// `width`. Values are already range-checked before they get here.
pub fn fr_bits_le(value: Fr, width: usize) -> Vec<bool> {
    let mut bits = value.into_bigint().to_bits_le();
    bits.resize(width, false);
    bits
}

/// Pack a little-endian bit stream into bytes, zero-padding the final
/// partial byte.
pub fn bits_to_bytes_le(bits: &[bool]) -> Vec<u8> {
    bits.chunks(8)
        .map(|chunk| {
            chunk
                .iter()
                .enumerate()
                .fold(0u8, |acc, (i, b)| acc | ((*b as u8) << i))
        })
        .collect()
}

/// One native transfer record.
#[derive(Clone, Debug)]
pub struct TransferRecord {
    pub token: Fr,
    /// Serialized width of the token field. Fee tokens carry one extra bit.
    pub token_width: usize,
    pub from: Fr,
    pub to: Fr,
    pub amount: u128,
}

impl TransferRecord {
    /// Serialized width in bits.
    pub fn width(&self) -> usize {
        self.token_width + crate::NUM_BITS_OWNER * 2 + NUM_BITS_AMOUNT
    }

    /// Fixed-layout little-endian serialization.
    pub fn to_bits(&self) -> Vec<bool> {
        let mut bits = Vec::with_capacity(self.width());
        bits.extend(fr_bits_le(self.token, self.token_width));
        bits.extend(fr_bits_le(self.from, crate::NUM_BITS_OWNER));
        bits.extend(fr_bits_le(self.to, crate::NUM_BITS_OWNER));
        bits.extend(fr_bits_le(Fr::from(self.amount), NUM_BITS_AMOUNT));
        bits
    }
}

/// Circuit form of a transfer record: the already range-checked bits of the
/// fields involved, in serialization order.
pub struct TransferRecordVar {
    pub token: Vec<Boolean<Fr>>,
    pub from: Vec<Boolean<Fr>>,
    pub to: Vec<Boolean<Fr>>,
    pub amount: Vec<Boolean<Fr>>,
}

impl TransferRecordVar {
    pub fn to_bits(&self) -> Vec<Boolean<Fr>> {
        let mut bits =
            Vec::with_capacity(self.token.len() + self.from.len() + self.to.len() + self.amount.len());
        bits.extend_from_slice(&self.token);
        bits.extend_from_slice(&self.from);
        bits.extend_from_slice(&self.to);
        bits.extend_from_slice(&self.amount);
        bits
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{NUM_BITS_OWNER, NUM_BITS_TOKEN, NUM_BITS_TOKEN_FEE};

    #[test]
    fn test_record_widths() {
        let sale = TransferRecord {
            token: Fr::from(1u64),
            token_width: NUM_BITS_TOKEN,
            from: Fr::from(2u64),
            to: Fr::from(3u64),
            amount: 4,
        };
        let fee = TransferRecord {
            token_width: NUM_BITS_TOKEN_FEE,
            ..sale.clone()
        };
        assert_eq!(sale.width(), 608);
        assert_eq!(fee.width(), 609);
        assert_eq!(sale.to_bits().len(), 608);
        assert_eq!(fee.to_bits().len(), 609);
    }

    #[test]
    fn test_bit_layout() {
        let record = TransferRecord {
            token: Fr::from(0b101u64),
            token_width: NUM_BITS_TOKEN,
            from: Fr::from(1u64),
            to: Fr::from(0u64),
            amount: 1,
        };
        let bits = record.to_bits();
        assert!(bits[0] && !bits[1] && bits[2]);
        assert!(bits[NUM_BITS_TOKEN]);
        assert!(bits[NUM_BITS_TOKEN + 2 * NUM_BITS_OWNER]);
    }

    #[test]
    fn test_bits_to_bytes_pads_tail() {
        let mut bits = vec![false; 10];
        bits[0] = true;
        bits[9] = true;
        assert_eq!(bits_to_bytes_le(&bits), vec![0x01, 0x02]);
    }

    #[test]
    fn test_fr_bits_roundtrip() {
        let v = Fr::from(0xdead_beefu64);
        let bits = fr_bits_le(v, NUM_BITS_OWNER);
        let back = bits
            .iter()
            .enumerate()
            .fold(0u64, |acc, (i, b)| if i < 64 { acc | ((*b as u64) << i) } else { acc });
        assert_eq!(back, 0xdead_beef);
    }
}
