// Shared types and primitives for the passport registry pipeline
pub mod error;
pub mod passport;

pub use error::*;
pub use passport::*;

/// Fixed service names under which the secure store keeps its two records.
pub struct StoreKeys;

impl StoreKeys {
    /// Raw identity secret, `0x`-prefixed hex string.
    pub const SECRET: &'static str = "secret";

    /// JSON-serialized `PassportRecord`.
    pub const PASSPORT_DATA: &'static str = "passportData";
}

/// Attestation identifier for electronic passports, passed to the register
/// circuit alongside the identity secret.
pub const PASSPORT_ATTESTATION_ID: &str =
    "8518753152044246090169372947057357973469996808638122125210848696986717482788";

/// Registry configuration shared by the identity manager and chain clients.
#[derive(Debug, Clone)]
pub struct RegistryConfig {
    /// JSON-RPC provider endpoint used for receipt polling.
    pub rpc_url: String,
    /// Relay endpoint that wraps the proof into a register transaction.
    pub relay_url: String,
    /// Interval between receipt polls.
    pub poll_interval: std::time::Duration,
    /// Maximum number of receipt polls before giving up on confirmation.
    pub max_poll_attempts: u32,
    /// Relaxes certificate-chain presence checks for test fixtures.
    /// Never enable this on a production path.
    pub development_mode: bool,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            rpc_url: "http://localhost:8545".to_string(),
            relay_url: "http://localhost:3000/register".to_string(),
            poll_interval: std::time::Duration::from_secs(2),
            max_poll_attempts: 150,
            development_mode: false,
        }
    }
}
