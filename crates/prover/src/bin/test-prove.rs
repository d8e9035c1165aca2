//! End-to-end smoke run: assemble a demo batch, set up keys, prove, verify.

use std::time::Instant;

use ark_bn254::Fr;
use rand::thread_rng;

use settlement_circuits::eddsa::SigningKey;
use settlement_circuits::{FilledLedger, Order, PublicData, Ring, RingSettlement, LEDGER_DEPTH};
use settlement_prover::{prove_batch, setup_batch, verify_batch, Result};

fn demo_settlements(num_rings: usize) -> Vec<RingSettlement> {
    let rng = &mut thread_rng();
    let mut ledger = FilledLedger::new(LEDGER_DEPTH);

    (0..num_rings)
        .map(|i| {
            let base = 100 * (i as u128 + 1);
            let key_a = SigningKey::random(rng);
            let key_b = SigningKey::random(rng);

            let order_a = Order::signed(
                Fr::from(0x1000 + i as u64),
                Fr::from(1u64),
                Fr::from(2u64),
                Fr::from(3u64),
                base,
                2 * base,
                base / 10,
                &key_a,
                rng,
            );
            let order_b = Order::signed(
                Fr::from(0x2000 + i as u64),
                Fr::from(2u64),
                Fr::from(1u64),
                Fr::from(3u64),
                2 * base,
                base,
                base / 20,
                &key_b,
                rng,
            );
            let ring = Ring {
                order_a,
                order_b,
                fill_s_a: base,
                fill_b_a: 2 * base,
                fill_f_a: base / 10,
                fill_s_b: 2 * base,
                fill_b_b: base,
                fill_f_b: base / 20,
            };

            let root = ledger.root();
            let addr_a = ring.order_a.ledger_address();
            let filled_before_a = ledger.get(addr_a);
            let path_a = ledger.path(addr_a);
            ledger.update(addr_a, filled_before_a + ring.fill_s_a);

            let addr_b = ring.order_b.ledger_address();
            let filled_before_b = ledger.get(addr_b);
            let path_b = ledger.path(addr_b);
            ledger.update(addr_b, filled_before_b + ring.fill_s_b);

            RingSettlement {
                ring,
                ledger_root_before: root,
                filled_before_a,
                path_a,
                filled_before_b,
                path_b,
            }
        })
        .collect()
}

fn run(num_rings: usize) -> Result<()> {
    let rng = &mut thread_rng();

    let settlements = demo_settlements(num_rings);
    println!("public data: {}", PublicData::compute(&settlements).to_hex());

    let started = Instant::now();
    let keys = setup_batch(num_rings, rng)?;
    println!("setup for {num_rings} ring(s): {:.1?}", started.elapsed());

    let started = Instant::now();
    let proof = prove_batch(&keys, settlements, rng)?;
    println!("proof: {:.1?}", started.elapsed());

    let started = Instant::now();
    let ok = verify_batch(keys.vk(), &proof)?;
    println!("verify: {:.1?}, accepted: {ok}", started.elapsed());
    Ok(())
}

fn main() -> Result<()> {
    let num_rings = std::env::args()
        .nth(1)
        .and_then(|s| s.parse().ok())
        .unwrap_or(1);
    run(num_rings)
}
