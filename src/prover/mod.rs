// Proof generation against the external proving engine
pub mod artifact;
pub mod engine;
pub mod response;

pub use artifact::*;
pub use engine::*;
pub use response::parse_proof_text;

use thiserror::Error;

/// Errors from the proving stage. `MalformedProof` means the prover
/// answered with a textual payload that does not match the expected
/// grammar; it is treated as a prover failure since the upstream engine
/// produced an unexpected shape.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProofError {
    #[error("prover failed for circuit {circuit}: {reason}")]
    ProverFailure { circuit: String, reason: String },

    #[error("malformed proof response: {0}")]
    MalformedProof(String),
}

pub type Result<T> = std::result::Result<T, ProofError>;
