//! Poseidon hash over the BN254 scalar field.
//!
//! One permutation serves every hashing need of the settlement circuits:
//! ledger leaves and nodes, order message hashes and signature challenges.

pub mod gadgets;

use ark_bn254::Fr;
use ark_crypto_primitives::sponge::poseidon::{PoseidonConfig, PoseidonSponge};
use ark_crypto_primitives::sponge::CryptographicSponge;
use ark_ff::MontFp;

pub use gadgets::{poseidon_hash_many_var, poseidon_hash_two_var};

/// Number of full rounds (split evenly between start and end).
const FULL_ROUNDS: usize = 8;

/// Number of partial rounds.
const PARTIAL_ROUNDS: usize = 57;

/// S-box exponent (x^5).
const ALPHA: u64 = 5;

/// Poseidon configuration: rate 2, capacity 1, 128-bit security.
pub fn poseidon_config() -> PoseidonConfig<Fr> {
    // 3x3 MDS matrix for rate 2, capacity 1
    let mds = vec![
        vec![
            MontFp!("7511745149465107256748700652201246547602992235352608707588321460060273774987"),
            MontFp!("10370080108974718697676803824769673834027675643658433702224577712625900127200"),
            MontFp!("19705173408229649878903981084052839426532978878058043055305024233888854471533"),
        ],
        vec![
            MontFp!("18732019378264290557468133440468564866454307626475683536618613112504878618481"),
            MontFp!("20870176810702568768751421378473869562658540583882454726129544628203806653987"),
            MontFp!("7266061498423634438932006217945904744987532209093972706694887950396501989428"),
        ],
        vec![
            MontFp!("9131299761947733513298312097611845208338517739621853568979632113419485819303"),
            MontFp!("10595341252162738537912664445405114076324478519622938027420701542910180337937"),
            MontFp!("11597556804922396090267472882856054602429588299176362916247939723151043581408"),
        ],
    ];

    PoseidonConfig {
        full_rounds: FULL_ROUNDS,
        partial_rounds: PARTIAL_ROUNDS,
        alpha: ALPHA,
        ark: round_constants(),
        mds,
        rate: 2,
        capacity: 1,
    }
}

/// Deterministic round-constant schedule.
/// In production these should come from a proper generation ceremony.
fn round_constants() -> Vec<Vec<Fr>> {
    let num_rounds = FULL_ROUNDS + PARTIAL_ROUNDS;
    let width = 3; // rate + capacity

    let mut state = Fr::from(0x504f534549444f4eu64);
    let mut ark = Vec::with_capacity(num_rounds);
    for _ in 0..num_rounds {
        let mut row = Vec::with_capacity(width);
        for _ in 0..width {
            state = state * state + Fr::from(7u64);
            row.push(state);
        }
        ark.push(row);
    }
    ark
}

/// Hash two field elements.
pub fn poseidon_hash_two(a: Fr, b: Fr) -> Fr {
    let config = poseidon_config();
    let mut sponge = PoseidonSponge::new(&config);
    sponge.absorb(&a);
    sponge.absorb(&b);
    sponge.squeeze_field_elements(1)[0]
}

/// Hash a sequence of field elements in order.
pub fn poseidon_hash_many(inputs: &[Fr]) -> Fr {
    let config = poseidon_config();
    let mut sponge = PoseidonSponge::new(&config);
    for input in inputs {
        sponge.absorb(input);
    }
    sponge.squeeze_field_elements(1)[0]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_shape() {
        let config = poseidon_config();
        assert_eq!(config.full_rounds, FULL_ROUNDS);
        assert_eq!(config.partial_rounds, PARTIAL_ROUNDS);
        assert_eq!(config.rate, 2);
        assert_eq!(config.capacity, 1);
        assert_eq!(config.mds.len(), 3);
        assert_eq!(config.ark.len(), FULL_ROUNDS + PARTIAL_ROUNDS);
    }

    #[test]
    fn test_hash_deterministic() {
        let h1 = poseidon_hash_two(Fr::from(42u64), Fr::from(123u64));
        let h2 = poseidon_hash_two(Fr::from(42u64), Fr::from(123u64));
        assert_eq!(h1, h2);
    }

    #[test]
    fn test_hash_input_sensitivity() {
        let h1 = poseidon_hash_two(Fr::from(1u64), Fr::from(2u64));
        let h2 = poseidon_hash_two(Fr::from(1u64), Fr::from(3u64));
        let h3 = poseidon_hash_two(Fr::from(2u64), Fr::from(1u64));
        assert_ne!(h1, h2);
        assert_ne!(h1, h3);
    }

    #[test]
    fn test_hash_many_differs_by_order() {
        let h1 = poseidon_hash_many(&[Fr::from(1u64), Fr::from(2u64), Fr::from(3u64)]);
        let h2 = poseidon_hash_many(&[Fr::from(3u64), Fr::from(2u64), Fr::from(1u64)]);
        assert_ne!(h1, h2);
    }
}
