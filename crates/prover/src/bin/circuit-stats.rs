//! Print constraint-system sizes for a range of batch sizes.

use ark_bn254::Fr;
use ark_relations::r1cs::{ConstraintSynthesizer, ConstraintSystem, SynthesisMode};

use settlement_circuits::SettlementBatchCircuit;

fn measure(num_rings: usize) -> (usize, usize) {
    let cs = ConstraintSystem::<Fr>::new_ref();
    cs.set_mode(SynthesisMode::Setup);
    SettlementBatchCircuit::blank(num_rings)
        .generate_constraints(cs.clone())
        .expect("blank synthesis cannot fail");
    (cs.num_constraints(), cs.num_witness_variables())
}

fn main() {
    println!("{:>6} {:>12} {:>12} {:>12}", "rings", "constraints", "witnesses", "delta");

    let mut previous = 0usize;
    for num_rings in 1..=4 {
        let (constraints, witnesses) = measure(num_rings);
        let delta = constraints - previous;
        previous = constraints;
        println!("{num_rings:>6} {constraints:>12} {witnesses:>12} {delta:>12}");
    }
}
