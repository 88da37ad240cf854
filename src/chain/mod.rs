// Transaction submission and confirmation against the registry chain
pub mod provider;
pub mod relay;

pub use provider::*;
pub use relay::*;

use thiserror::Error;

/// Chain-side failures. `SubmissionFailure` means no transaction ever made
/// it out; `TransactionReverted` means a transaction was mined and failed,
/// so on-chain resources were consumed and a blind retry with the same
/// inputs is wrong.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ChainError {
    #[error("transaction submission failed: {0}")]
    SubmissionFailure(String),

    #[error("transaction {hash} was mined but reverted")]
    TransactionReverted { hash: String },

    #[error("no receipt for transaction {hash} after {attempts} polls")]
    ConfirmationTimeout { hash: String, attempts: u32 },

    #[error("provider returned an unexpected response: {0}")]
    BadResponse(String),
}

pub type Result<T> = std::result::Result<T, ChainError>;

/// Identifier of a submitted transaction, as returned by the relay.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionHandle(pub String);

impl std::fmt::Display for TransactionHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Outcome of waiting for a transaction to be mined successfully.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Confirmation {
    pub hash: String,
    pub block_number: Option<u64>,
}
