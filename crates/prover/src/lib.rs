//! Groth16 proving layer for settlement batches.
//!
//! The circuit shape depends only on the ring count, so one key pair per
//! batch size is generated once, persisted, and reused for every batch of
//! that size.

pub mod prove;
pub mod setup;
pub mod verify;

pub use prove::{prove_batch, ProofWithInputs};
pub use setup::{load_keys, save_keys, setup_batch, BatchKeys};
pub use verify::verify_batch;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProverError {
    #[error("constraint synthesis failed: {0}")]
    Synthesis(#[from] ark_relations::r1cs::SynthesisError),

    #[error("key or proof (de)serialization failed: {0}")]
    Serialization(#[from] ark_serialize::SerializationError),

    #[error("key file i/o failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("batch has {actual} rings but the keys were generated for {expected}")]
    RingCountMismatch { expected: usize, actual: usize },

    #[error("batch must settle at least one ring")]
    EmptyBatch,
}

pub type Result<T> = std::result::Result<T, ProverError>;
