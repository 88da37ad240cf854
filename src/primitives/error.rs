// Error taxonomy for the registration pipeline
use thiserror::Error;

pub type Result<T> = std::result::Result<T, RegistrationError>;

/// Top-level error for a registration attempt. Each stage of the pipeline
/// keeps its own typed error; this enum is what crosses the registration
/// boundary so callers can tell the user why the attempt failed.
#[derive(Error, Debug)]
pub enum RegistrationError {
    #[error("MRZ error: {0}")]
    Mrz(#[from] crate::mrz::MrzError),

    #[error("encoding error: {0}")]
    Codec(#[from] crate::encoding::CodecError),

    #[error("circuit input error: {0}")]
    Input(#[from] crate::encoding::InputError),

    #[error("proof error: {0}")]
    Proof(#[from] crate::prover::ProofError),

    #[error("chain error: {0}")]
    Chain(#[from] crate::chain::ChainError),

    #[error("secure store error: {0}")]
    Store(#[from] crate::identity::StoreError),

    #[error("a registration attempt is already in flight")]
    AttemptInProgress,

    #[error("registration attempt was cancelled")]
    Cancelled,
}

impl RegistrationError {
    /// Whether the attempt may have touched on-chain state. A reverted
    /// transaction consumed gas; retrying it with the same inputs is a
    /// defect, everything else is safe to retry wholesale.
    pub fn consumed_chain_resources(&self) -> bool {
        matches!(
            self,
            RegistrationError::Chain(crate::chain::ChainError::TransactionReverted { .. })
        )
    }

    /// Whether this is the expected "your document type is unsupported"
    /// outcome, which gets its own user-facing flow instead of a retry.
    pub fn is_unsupported_document(&self) -> bool {
        matches!(
            self,
            RegistrationError::Input(
                crate::encoding::InputError::UnsupportedSignatureAlgorithm { .. }
            )
        )
    }
}
