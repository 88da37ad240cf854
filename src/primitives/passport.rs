// Passport record types shared across the pipeline
use serde::{Deserialize, Serialize};

/// RSA public key of the document signer certificate. Modulus and exponent
/// are kept as decimal strings so the record serializes losslessly to JSON
/// for the secure store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PassportPubKey {
    pub modulus: String,
    pub exponent: String,
}

/// Everything the register circuit needs about one scanned document.
///
/// The three MRZ-derived strings are fixed-length substrings of a validated
/// two-line MRZ block (see `mrz::parse_mrz`); the remaining fields come from
/// the chip read. Persisted as JSON under the `passportData` service key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PassportRecord {
    /// Document number, filler characters stripped, at most 9 characters.
    pub document_number: String,
    /// Date of birth, YYMMDD.
    pub date_of_birth: String,
    /// Date of expiry, YYMMDD.
    pub date_of_expiry: String,
    /// Signature algorithm of the document signer certificate,
    /// e.g. "sha256WithRSAEncryption".
    pub signature_algorithm: String,
    /// Public key of the document signer certificate.
    pub pub_key: PassportPubKey,
    /// Signed attributes (eContent) covered by the signature.
    pub econtent: Vec<u8>,
    /// Signature over the signed attributes (encrypted digest).
    pub encrypted_digest: Vec<u8>,
    /// Document signer certificate, DER bytes.
    pub dsc_cert: Vec<u8>,
}

impl PassportRecord {
    /// Mock record signed with sha256WithRSAEncryption / 65537, for tests
    /// and development-mode runs. The numbers are small stand-ins, not a
    /// real 2048-bit key; development mode skips chain validation so the
    /// input builder accepts them.
    pub fn mock_sha256_rsa_65537() -> Self {
        Self {
            document_number: "L898902C3".to_string(),
            date_of_birth: "740812".to_string(),
            date_of_expiry: "120415".to_string(),
            signature_algorithm: "sha256WithRSAEncryption".to_string(),
            pub_key: PassportPubKey {
                modulus: "24692587535523196286949032606082582450664979585944840".to_string(),
                exponent: "65537".to_string(),
            },
            econtent: vec![49, 102, 48, 21, 6, 9, 42, 134, 72, 134, 247, 13, 1, 9, 3, 49, 8],
            encrypted_digest: vec![0x12, 0x34, 0x56, 0x78, 0x9a, 0xbc, 0xde, 0xf0],
            dsc_cert: vec![0x30, 0x82, 0x01, 0x0a],
        }
    }
}

/// Registration status of the local identity. Flips to registered only
/// after a confirmed transaction and never reverts automatically.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistrationState {
    pub registered: bool,
}

/// Lifecycle position of the locally stored identity, derived from what is
/// present in the secure store and the registration flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdentityPhase {
    /// Nothing stored yet; onboarding has not started.
    NoSecret,
    /// A secret exists but no passport record has been scanned.
    SecretOnly,
    /// Secret and passport record are stored, commitment not yet on chain.
    SecretAndData,
    /// Commitment confirmed on chain.
    Registered,
}
