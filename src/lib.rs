// ZK Passport Registry Library
// Turns a scanned travel document into an on-chain identity commitment:
// MRZ extraction, circuit input encoding, proof orchestration and
// transaction submission.

// Standard Rust module structure
pub mod chain;
pub mod encoding;
pub mod identity;
pub mod mrz;
pub mod primitives;
pub mod prover;

#[cfg(test)]
mod tests;

// Re-export key types for easy access
pub use primitives::{
    IdentityPhase, PassportPubKey, PassportRecord, RegistrationError, RegistrationState,
    RegistryConfig, Result, StoreKeys, PASSPORT_ATTESTATION_ID,
};

pub use mrz::{parse_mrz, MrzError, MrzInfo};

pub use encoding::{
    build_register_inputs, bytes_to_biguint, join_words, split_to_words, CircuitInput,
    CircuitInputMap, CircuitVariant, CodecError, InputError, InputOptions, RSA_LIMB_BITS,
    RSA_LIMB_COUNT,
};

pub use prover::{
    parse_proof_text, ProofArtifact, ProofEngine, ProofError, ProofOrchestrator, ProofPoints,
    ProverResponse,
};

pub use chain::{
    ChainError, Confirmation, HttpRelay, JsonRpcProvider, ReceiptProvider, TransactionHandle,
    TransactionRelay,
};

pub use identity::{
    cancel_pair, CancelHandle, CancelToken, FileSecureStore, IdentityManager, MemorySecureStore,
    SecureStore, StoreError,
};
