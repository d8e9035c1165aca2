//! Orders and the order-commitment gadget.
//!
//! An order declares an owner, the token it sells, the token it buys, a fee
//! token, maximum amounts for all three, and carries a signature over those
//! seven fields under the order's key. The Poseidon hash of the signed
//! fields doubles as the order's ledger address.

use ark_bn254::Fr;
use ark_ff::PrimeField;
use ark_r1cs_std::fields::fp::FpVar;
use ark_r1cs_std::prelude::*;
use ark_relations::r1cs::{ConstraintSystemRef, SynthesisError};
use ark_std::rand::Rng;

use crate::dual::DualVar;
use crate::eddsa::{self, enforce_signature, PublicKey, PublicKeyVar, Signature, SignatureVar};
use crate::poseidon::{poseidon_hash_many, poseidon_hash_many_var};
use crate::{LEDGER_DEPTH, NUM_BITS_AMOUNT, NUM_BITS_OWNER, NUM_BITS_TOKEN, NUM_BITS_TOKEN_FEE};

/// One order, as supplied by the external witness-assembly layer.
#[derive(Clone, Debug)]
pub struct Order {
    pub owner: Fr,
    pub token_sell: Fr,
    pub token_buy: Fr,
    pub token_fee: Fr,
    pub amount_sell: u128,
    pub amount_buy: u128,
    pub amount_fee: u128,
    pub public_key: PublicKey,
    pub signature: Signature,
}

impl Order {
    /// Build and sign an order in one step.
    #[allow(clippy::too_many_arguments)]
    pub fn signed<R: Rng + ?Sized>(
        owner: Fr,
        token_sell: Fr,
        token_buy: Fr,
        token_fee: Fr,
        amount_sell: u128,
        amount_buy: u128,
        amount_fee: u128,
        key: &eddsa::SigningKey,
        rng: &mut R,
    ) -> Self {
        let mut order = Self {
            owner,
            token_sell,
            token_buy,
            token_fee,
            amount_sell,
            amount_buy,
            amount_fee,
            public_key: key.public_key(),
            signature: Signature::blank(),
        };
        order.signature = key.sign(order.message_hash(), rng);
        order
    }

    /// The signed message: all seven fields bound in fixed declaration
    /// order.
    // TODO: the public key is not among the signed fields, so the signature
    // binds the economic terms without itself proving key ownership of
    // those terms; ownership currently rides on the ledger addressing
    // scheme below.
    pub fn message_hash(&self) -> Fr {
        poseidon_hash_many(&[
            self.owner,
            self.token_sell,
            self.token_buy,
            self.token_fee,
            Fr::from(self.amount_sell),
            Fr::from(self.amount_buy),
            Fr::from(self.amount_fee),
        ])
    }

    /// Ledger address: the low bits of the order's own signed-message hash,
    /// not an externally assigned id. Address distinctness across orders is
    /// an assumption of this scheme, not something the circuit checks.
    pub fn ledger_address(&self) -> u64 {
        let limbs = self.message_hash().into_bigint();
        limbs.as_ref()[0] & ((1u64 << LEDGER_DEPTH) - 1)
    }
}

/// The order-commitment gadget: range-checked dual fields, the signed
/// message hash, and a verified signature.
pub struct OrderVar {
    pub owner: DualVar,
    pub token_sell: DualVar,
    pub token_buy: DualVar,
    pub token_fee: DualVar,
    pub amount_sell: DualVar,
    pub amount_buy: DualVar,
    pub amount_fee: DualVar,

    /// Poseidon hash of the seven packed fields; also the ledger address
    /// source.
    pub message_hash: FpVar<Fr>,
}

impl OrderVar {
    pub fn synthesize(
        cs: ConstraintSystemRef<Fr>,
        order: Option<&Order>,
    ) -> Result<Self, SynthesisError> {
        let field = |f: fn(&Order) -> Fr| {
            move || {
                order
                    .map(f)
                    .ok_or(SynthesisError::AssignmentMissing)
            }
        };

        let owner = DualVar::new_witness(cs.clone(), field(|o| o.owner), NUM_BITS_OWNER)?;
        let token_sell = DualVar::new_witness(cs.clone(), field(|o| o.token_sell), NUM_BITS_TOKEN)?;
        let token_buy = DualVar::new_witness(cs.clone(), field(|o| o.token_buy), NUM_BITS_TOKEN)?;
        let token_fee =
            DualVar::new_witness(cs.clone(), field(|o| o.token_fee), NUM_BITS_TOKEN_FEE)?;
        let amount_sell = DualVar::new_witness(
            cs.clone(),
            field(|o| Fr::from(o.amount_sell)),
            NUM_BITS_AMOUNT,
        )?;
        let amount_buy = DualVar::new_witness(
            cs.clone(),
            field(|o| Fr::from(o.amount_buy)),
            NUM_BITS_AMOUNT,
        )?;
        let amount_fee = DualVar::new_witness(
            cs.clone(),
            field(|o| Fr::from(o.amount_fee)),
            NUM_BITS_AMOUNT,
        )?;

        let message_hash = poseidon_hash_many_var(
            cs.clone(),
            &[
                owner.packed.clone(),
                token_sell.packed.clone(),
                token_buy.packed.clone(),
                token_fee.packed.clone(),
                amount_sell.packed.clone(),
                amount_buy.packed.clone(),
                amount_fee.packed.clone(),
            ],
        )?;

        let public_key = PublicKeyVar::new_witness(cs.clone(), order.map(|o| &o.public_key))?;
        let signature = SignatureVar::new_witness(cs.clone(), order.map(|o| &o.signature))?;
        enforce_signature(cs, &public_key, &signature, &message_hash)?;

        Ok(Self {
            owner,
            token_sell,
            token_buy,
            token_fee,
            amount_sell,
            amount_buy,
            amount_fee,
            message_hash,
        })
    }

    /// Ledger address bits, LSB first: the low bits of the message hash.
    pub fn address_bits(&self) -> Result<Vec<Boolean<Fr>>, SynthesisError> {
        let bits = self.message_hash.to_bits_le()?;
        Ok(bits[..LEDGER_DEPTH].to_vec())
    }
}
