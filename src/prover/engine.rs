// Proof orchestration over a black-box proving engine
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info};

use super::artifact::ProofArtifact;
use super::response::parse_proof_text;
use super::Result;
use crate::encoding::CircuitInputMap;

/// How the platform delivered the proof. Desktop and iOS engines hand back
/// structured data; the Android engine emits a native event carrying a
/// stringified proof that still needs parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProverResponse {
    Structured(ProofArtifact),
    Textual(String),
}

/// External proving engine. The circuit itself is a black box behind this
/// trait; implementations wrap the platform prover binary or bridge.
#[async_trait]
pub trait ProofEngine: Send + Sync {
    /// Run the named circuit over the input map and return whatever shape
    /// the platform produces.
    async fn prove(&self, circuit: &str, inputs: &CircuitInputMap) -> Result<ProverResponse>;
}

/// Dispatches input maps to the engine and normalizes the response into a
/// structured artifact, whichever delivery path the platform uses.
pub struct ProofOrchestrator {
    engine: Arc<dyn ProofEngine>,
}

impl ProofOrchestrator {
    pub fn new(engine: Arc<dyn ProofEngine>) -> Self {
        Self { engine }
    }

    /// Generate a proof for `circuit`. Proving can take tens of seconds to
    /// minutes; this is a suspension point, callers must not block on it.
    pub async fn generate_proof(
        &self,
        circuit: &str,
        inputs: &CircuitInputMap,
    ) -> Result<ProofArtifact> {
        info!("🔐 Generating proof for circuit {}", circuit);
        let start = Instant::now();

        let response = self.engine.prove(circuit, inputs).await?;

        let artifact = match response {
            ProverResponse::Structured(artifact) => artifact,
            ProverResponse::Textual(text) => {
                debug!("Prover returned textual payload, parsing");
                parse_proof_text(&text)?
            }
        };

        info!(
            "✅ Proof for {} generated in {:.1}s",
            circuit,
            start.elapsed().as_secs_f64()
        );
        Ok(artifact)
    }
}
