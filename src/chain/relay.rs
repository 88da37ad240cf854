// Relay client wrapping the proof into a register transaction
use async_trait::async_trait;
use serde::Deserialize;
use tracing::info;

use super::{ChainError, Result, TransactionHandle};
use crate::prover::ProofArtifact;

/// Relay that turns a proof artifact into an on-chain register transaction
/// and returns its hash. The commented-out dual-proof (CSCA) flow in the
/// upstream app would land here as a second method if it ever becomes the
/// active path.
#[async_trait]
pub trait TransactionRelay: Send + Sync {
    async fn submit_register(&self, proof: &ProofArtifact) -> Result<TransactionHandle>;
}

/// Shape of the relay's success response: `{ "data": { "hash": "0x..." } }`.
#[derive(Debug, Deserialize)]
struct RelayResponse {
    data: RelayData,
}

#[derive(Debug, Deserialize)]
struct RelayData {
    hash: String,
}

/// HTTP relay client.
pub struct HttpRelay {
    client: reqwest::Client,
    url: String,
}

impl HttpRelay {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            url: url.into(),
        }
    }
}

#[async_trait]
impl TransactionRelay for HttpRelay {
    async fn submit_register(&self, proof: &ProofArtifact) -> Result<TransactionHandle> {
        info!("📤 Submitting register transaction to relay");

        let response = self
            .client
            .post(&self.url)
            .json(proof)
            .send()
            .await
            .map_err(|e| ChainError::SubmissionFailure(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ChainError::SubmissionFailure(format!(
                "relay answered {status}"
            )));
        }

        let body: RelayResponse = response
            .json()
            .await
            .map_err(|e| ChainError::SubmissionFailure(format!("bad relay response: {e}")))?;

        info!("📤 Relay accepted transaction {}", body.data.hash);
        Ok(TransactionHandle(body.data.hash))
    }
}
