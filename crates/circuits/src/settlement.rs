//! Ring settlement: two matched orders, six fill amounts, and one
//! root-to-root ledger transition.
//!
//! The gadget verifies both order signatures, range-checks every fill,
//! applies both filled-amount ledger updates in sequence, and enforces the
//! economic validity rules: no overfill, declared exchange and fee rates
//! preserved, and neither side receiving more than the other sold.

use ark_bn254::Fr;
use ark_r1cs_std::fields::fp::FpVar;
use ark_r1cs_std::prelude::*;
use ark_relations::r1cs::{ConstraintSystemRef, SynthesisError};

use crate::compare::enforce_leq;
use crate::dual::DualVar;
use crate::ledger::{LedgerUpdateVar, MerklePath};
use crate::order::{Order, OrderVar};
use crate::rate::enforce_rate;
use crate::transfer::{TransferRecord, TransferRecordVar};
use crate::{NUM_BITS_AMOUNT, NUM_BITS_TOKEN, NUM_BITS_TOKEN_FEE};

/// A matched pair of orders with the six fill amounts chosen by the
/// operator's matching engine.
#[derive(Clone, Debug)]
pub struct Ring {
    pub order_a: Order,
    pub order_b: Order,

    /// Amount of A's sell token leaving A.
    pub fill_s_a: u128,
    /// Amount of A's buy token arriving at A.
    pub fill_b_a: u128,
    /// A's fee.
    pub fill_f_a: u128,
    pub fill_s_b: u128,
    pub fill_b_b: u128,
    pub fill_f_b: u128,
}

impl Ring {
    /// The four transfers this ring publishes, in serialization order:
    /// A's sale, A's fee, B's sale, B's fee.
    pub fn transfers(&self) -> [TransferRecord; 4] {
        [
            TransferRecord {
                token: self.order_a.token_sell,
                token_width: NUM_BITS_TOKEN,
                from: self.order_a.owner,
                to: self.order_b.owner,
                amount: self.fill_s_a,
            },
            TransferRecord {
                token: self.order_a.token_fee,
                token_width: NUM_BITS_TOKEN_FEE,
                from: self.order_a.owner,
                to: self.order_a.owner,
                amount: self.fill_f_a,
            },
            TransferRecord {
                token: self.order_b.token_sell,
                token_width: NUM_BITS_TOKEN,
                from: self.order_b.owner,
                to: self.order_a.owner,
                amount: self.fill_s_b,
            },
            TransferRecord {
                token: self.order_b.token_fee,
                token_width: NUM_BITS_TOKEN_FEE,
                from: self.order_b.owner,
                to: self.order_b.owner,
                amount: self.fill_f_b,
            },
        ]
    }
}

/// One ring plus the ledger witness material needed to prove its
/// transition.
#[derive(Clone, Debug)]
pub struct RingSettlement {
    pub ring: Ring,

    /// Ledger root this settlement starts from.
    pub ledger_root_before: Fr,
    pub filled_before_a: u128,
    pub path_a: MerklePath,
    /// B's path is taken AFTER A's update has been applied.
    pub filled_before_b: u128,
    pub path_b: MerklePath,
}

pub struct RingSettlementVar {
    /// Ledger root after both updates.
    pub root_after: FpVar<Fr>,
    pub transfers: [TransferRecordVar; 4],
}

impl RingSettlementVar {
    pub fn synthesize(
        cs: ConstraintSystemRef<Fr>,
        root_before: &FpVar<Fr>,
        settlement: Option<&RingSettlement>,
    ) -> Result<Self, SynthesisError> {
        let ring = settlement.map(|s| &s.ring);

        let order_a = OrderVar::synthesize(cs.clone(), ring.map(|r| &r.order_a))?;
        let order_b = OrderVar::synthesize(cs.clone(), ring.map(|r| &r.order_b))?;

        let fill = |f: fn(&Ring) -> u128| {
            let value = ring.map(f);
            move || value.map(Fr::from).ok_or(SynthesisError::AssignmentMissing)
        };
        let fill_s_a = DualVar::new_witness(cs.clone(), fill(|r| r.fill_s_a), NUM_BITS_AMOUNT)?;
        let fill_b_a = DualVar::new_witness(cs.clone(), fill(|r| r.fill_b_a), NUM_BITS_AMOUNT)?;
        let fill_f_a = DualVar::new_witness(cs.clone(), fill(|r| r.fill_f_a), NUM_BITS_AMOUNT)?;
        let fill_s_b = DualVar::new_witness(cs.clone(), fill(|r| r.fill_s_b), NUM_BITS_AMOUNT)?;
        let fill_b_b = DualVar::new_witness(cs.clone(), fill(|r| r.fill_b_b), NUM_BITS_AMOUNT)?;
        let fill_f_b = DualVar::new_witness(cs.clone(), fill(|r| r.fill_f_b), NUM_BITS_AMOUNT)?;

        // The two orders must actually trade against each other.
        order_a
            .token_sell
            .packed
            .enforce_equal(&order_b.token_buy.packed)?;
        order_b
            .token_sell
            .packed
            .enforce_equal(&order_a.token_buy.packed)?;

        // Ledger transitions, A first then B over the intermediate root.
        let update_a = LedgerUpdateVar::synthesize(
            cs.clone(),
            root_before,
            &order_a.address_bits()?,
            &fill_s_a.packed,
            settlement.map(|s| (s.filled_before_a, &s.path_a)),
        )?;
        let update_b = LedgerUpdateVar::synthesize(
            cs.clone(),
            &update_a.root_after,
            &order_b.address_bits()?,
            &fill_s_b.packed,
            settlement.map(|s| (s.filled_before_b, &s.path_b)),
        )?;

        // No overfill: cumulative filled stays within the declared amount.
        enforce_leq(&update_a.filled_after, &order_a.amount_sell.packed)?;
        enforce_leq(&update_b.filled_after, &order_b.amount_sell.packed)?;

        // Each side's executed fills honor its own declared exchange and
        // fee rates.
        enforce_rate(
            cs.clone(),
            &fill_s_a.packed,
            &fill_b_a.packed,
            &order_a.amount_sell.packed,
            &order_a.amount_buy.packed,
        )?;
        enforce_rate(
            cs.clone(),
            &fill_s_a.packed,
            &fill_f_a.packed,
            &order_a.amount_sell.packed,
            &order_a.amount_fee.packed,
        )?;
        enforce_rate(
            cs.clone(),
            &fill_s_b.packed,
            &fill_b_b.packed,
            &order_b.amount_sell.packed,
            &order_b.amount_buy.packed,
        )?;
        enforce_rate(
            cs.clone(),
            &fill_s_b.packed,
            &fill_f_b.packed,
            &order_b.amount_sell.packed,
            &order_b.amount_fee.packed,
        )?;

        // Neither side receives more than the counterparty gave up.
        enforce_leq(&fill_b_a.packed, &fill_s_b.packed)?;
        enforce_leq(&fill_b_b.packed, &fill_s_a.packed)?;

        let transfers = [
            TransferRecordVar {
                token: order_a.token_sell.bits.clone(),
                from: order_a.owner.bits.clone(),
                to: order_b.owner.bits.clone(),
                amount: fill_s_a.bits,
            },
            TransferRecordVar {
                token: order_a.token_fee.bits,
                from: order_a.owner.bits.clone(),
                to: order_a.owner.bits.clone(),
                amount: fill_f_a.bits,
            },
            TransferRecordVar {
                token: order_b.token_sell.bits,
                from: order_b.owner.bits.clone(),
                to: order_a.owner.bits,
                amount: fill_s_b.bits,
            },
            TransferRecordVar {
                token: order_b.token_fee.bits,
                from: order_b.owner.bits.clone(),
                to: order_b.owner.bits,
                amount: fill_f_b.bits,
            },
        ];

        Ok(Self {
            root_after: update_b.root_after,
            transfers,
        })
    }
}
