//! Schnorr-style EdDSA over Baby Jubjub with a Poseidon challenge.
//!
//! The signature curve is `ark-ed-on-bn254`, whose base field is the BN254
//! scalar field, so curve coordinates are native circuit values. A signature
//! is `(R, s)` with `s·G = R + c·A` for the challenge
//! `c = Poseidon(R.x, R.y, A.x, A.y, message)`.

pub mod gadgets;

use ark_bn254::Fr;
use ark_ec::{AffineRepr, CurveGroup};
use ark_ed_on_bn254::{EdwardsAffine, Fr as EdScalar};
use ark_ff::{BigInteger, PrimeField, Zero};
use ark_std::rand::Rng;
use ark_std::UniformRand;

use crate::poseidon::poseidon_hash_many;

pub use gadgets::{enforce_signature, PublicKeyVar, SignatureVar};

/// A signing key for order owners.
pub struct SigningKey {
    secret: EdScalar,
}

/// A verification key: one Baby Jubjub point.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PublicKey(pub EdwardsAffine);

/// A signature: the nonce commitment `R` and response scalar `s`.
#[derive(Clone, Copy, Debug)]
pub struct Signature {
    pub r: EdwardsAffine,
    pub s: EdScalar,
}

impl SigningKey {
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self {
            secret: EdScalar::rand(rng),
        }
    }

    pub fn public_key(&self) -> PublicKey {
        PublicKey((EdwardsAffine::generator() * self.secret).into_affine())
    }

    /// Sign a message (a single field element, typically a Poseidon hash).
    pub fn sign<R: Rng + ?Sized>(&self, message: Fr, rng: &mut R) -> Signature {
        let nonce = EdScalar::rand(rng);
        let r = (EdwardsAffine::generator() * nonce).into_affine();
        let c = challenge(&r, &self.public_key(), message);
        let c_scalar = EdScalar::from_le_bytes_mod_order(&c.into_bigint().to_bytes_le());
        Signature {
            r,
            s: nonce + c_scalar * self.secret,
        }
    }
}

impl Signature {
    /// Placeholder signature, replaced once the full message is assembled
    /// and hashed.
    pub fn blank() -> Self {
        Self {
            r: EdwardsAffine::zero(),
            s: EdScalar::zero(),
        }
    }
}

/// Fiat-Shamir challenge binding nonce, key and message.
pub fn challenge(r: &EdwardsAffine, pk: &PublicKey, message: Fr) -> Fr {
    poseidon_hash_many(&[r.x, r.y, pk.0.x, pk.0.y, message])
}

/// Native verification, mirroring the in-circuit equation.
pub fn verify(pk: &PublicKey, message: Fr, sig: &Signature) -> bool {
    let c = challenge(&sig.r, pk, message);
    let lhs = EdwardsAffine::generator() * sig.s;
    let rhs = sig.r + pk.0.mul_bigint(c.into_bigint());
    lhs == rhs
}

#[cfg(test)]
mod tests {
    use super::*;
    use ark_std::rand::rngs::StdRng;
    use ark_std::rand::SeedableRng;

    #[test]
    fn test_sign_verify_roundtrip() {
        let mut rng = StdRng::seed_from_u64(7);
        let key = SigningKey::random(&mut rng);
        let message = Fr::from(123456u64);

        let sig = key.sign(message, &mut rng);
        assert!(verify(&key.public_key(), message, &sig));
    }

    #[test]
    fn test_wrong_message_rejected() {
        let mut rng = StdRng::seed_from_u64(8);
        let key = SigningKey::random(&mut rng);

        let sig = key.sign(Fr::from(1u64), &mut rng);
        assert!(!verify(&key.public_key(), Fr::from(2u64), &sig));
    }

    #[test]
    fn test_wrong_key_rejected() {
        let mut rng = StdRng::seed_from_u64(9);
        let key = SigningKey::random(&mut rng);
        let other = SigningKey::random(&mut rng);
        let message = Fr::from(3u64);

        let sig = key.sign(message, &mut rng);
        assert!(!verify(&other.public_key(), message, &sig));
    }
}
