//! Generate keys for a batch size and write the verifying key to disk.
//!
//! Usage: export-vk <num_rings> <output-path>

use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;
use std::process::ExitCode;

use ark_serialize::CanonicalSerialize;
use rand::thread_rng;

use settlement_prover::setup_batch;

fn main() -> ExitCode {
    let mut args = std::env::args().skip(1);
    let (num_rings, path) = match (args.next(), args.next()) {
        (Some(n), Some(p)) => match n.parse::<usize>() {
            Ok(n) if n > 0 => (n, PathBuf::from(p)),
            _ => {
                eprintln!("num_rings must be a positive integer");
                return ExitCode::FAILURE;
            }
        },
        _ => {
            eprintln!("usage: export-vk <num_rings> <output-path>");
            return ExitCode::FAILURE;
        }
    };

    let keys = match setup_batch(num_rings, &mut thread_rng()) {
        Ok(keys) => keys,
        Err(e) => {
            eprintln!("setup failed: {e}");
            return ExitCode::FAILURE;
        }
    };

    let result = File::create(&path)
        .map_err(settlement_prover::ProverError::from)
        .and_then(|f| {
            keys.vk()
                .serialize_compressed(BufWriter::new(f))
                .map_err(Into::into)
        });
    match result {
        Ok(()) => {
            println!("wrote verifying key for {num_rings}-ring batches to {}", path.display());
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("failed to write {}: {e}", path.display());
            ExitCode::FAILURE
        }
    }
}
