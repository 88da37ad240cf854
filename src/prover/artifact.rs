// Structured proof artifact
use serde::{Deserialize, Serialize};

/// Groth16-shaped proof components. Every element is a decimal-string
/// encoded integer; converting to machine integers anywhere on this path
/// would silently truncate field elements.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProofPoints {
    pub a: Vec<String>,
    pub b: Vec<Vec<String>>,
    pub c: Vec<String>,
}

/// One proof plus its public signals, produced once per registration
/// attempt and immutable afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProofArtifact {
    pub proof: ProofPoints,
    pub pub_signals: Vec<String>,
}
