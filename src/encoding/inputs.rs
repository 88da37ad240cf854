// Register circuit input construction
//
// Turns an identity secret plus a scanned passport record into the named
// input map one specific register circuit expects. Variant selection (and
// with it the limb parameters) happens here, before any proving work, so
// an unsupported document fails fast with a distinct error.

use num_bigint::BigUint;
use sha2::{Digest, Sha256};
use std::collections::BTreeMap;
use thiserror::Error;
use tracing::warn;

use super::words::{bytes_to_biguint, split_to_words, RSA_LIMB_BITS, RSA_LIMB_COUNT};
use crate::primitives::PassportRecord;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InputError {
    #[error("unsupported signature algorithm {algorithm} with exponent {exponent}")]
    UnsupportedSignatureAlgorithm { algorithm: String, exponent: String },

    #[error("invalid numeric field {field}: {value:?}")]
    InvalidNumeric { field: String, value: String },

    #[error("certificate chain rejected: {0}")]
    CertificateChain(String),

    #[error("input map does not match circuit contract: {0}")]
    IncompleteInputs(String),

    #[error(transparent)]
    Codec(#[from] super::words::CodecError),
}

pub type Result<T> = std::result::Result<T, InputError>;

/// One register circuit variant together with the limb parameters it was
/// compiled with. Selection and limb sizing stay in one place so the
/// encoding can never drift from the compiled circuit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CircuitVariant {
    pub name: &'static str,
    pub limb_bits: u32,
    pub limb_count: usize,
}

impl CircuitVariant {
    /// Keys the variant's input map must contain, nothing more or less.
    const EXPECTED_KEYS: [&'static str; 8] = [
        "secret",
        "attestation_id",
        "document_number",
        "date_of_birth",
        "date_of_expiry",
        "modulus",
        "signature",
        "message",
    ];

    /// Select the circuit for a record's signature algorithm and public
    /// exponent. This is the dominant real-world failure point: anything
    /// outside the supported matrix is reported as an unsupported document
    /// before a prover is ever invoked.
    pub fn select(record: &PassportRecord) -> Result<Self> {
        match (record.signature_algorithm.as_str(), record.pub_key.exponent.as_str()) {
            ("sha256WithRSAEncryption", "65537") => Ok(Self {
                name: "register_sha256WithRSAEncryption_65537",
                limb_bits: RSA_LIMB_BITS,
                limb_count: RSA_LIMB_COUNT,
            }),
            (algorithm, exponent) => Err(InputError::UnsupportedSignatureAlgorithm {
                algorithm: algorithm.to_string(),
                exponent: exponent.to_string(),
            }),
        }
    }
}

/// A single circuit input: either a scalar or a limb array, both rendered
/// as decimal strings to avoid any precision loss on the way to the prover.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
#[serde(untagged)]
pub enum CircuitInput {
    Scalar(String),
    Words(Vec<String>),
}

/// Named input map for one circuit variant. Key set is fixed by the
/// variant; a mismatch is a build-time contract violation surfaced as
/// `IncompleteInputs`, never a runtime circuit failure.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
#[serde(transparent)]
pub struct CircuitInputMap(BTreeMap<String, CircuitInput>);

impl CircuitInputMap {
    fn new() -> Self {
        Self(BTreeMap::new())
    }

    fn insert_scalar(&mut self, key: &str, value: impl Into<String>) {
        self.0.insert(key.to_string(), CircuitInput::Scalar(value.into()));
    }

    fn insert_words(&mut self, key: &str, words: Vec<BigUint>) {
        let rendered = words.iter().map(|w| w.to_str_radix(10)).collect();
        self.0.insert(key.to_string(), CircuitInput::Words(rendered));
    }

    pub fn get(&self, key: &str) -> Option<&CircuitInput> {
        self.0.get(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    fn validate_keys(&self, expected: &[&str]) -> Result<()> {
        for key in expected {
            if !self.0.contains_key(*key) {
                return Err(InputError::IncompleteInputs(format!("missing key {key}")));
            }
        }
        if self.0.len() != expected.len() {
            let unknown: Vec<&str> = self
                .keys()
                .filter(|k| !expected.contains(k))
                .collect();
            return Err(InputError::IncompleteInputs(format!(
                "unknown keys {unknown:?}"
            )));
        }
        Ok(())
    }
}

/// Options for input construction.
#[derive(Debug, Clone, Copy, Default)]
pub struct InputOptions {
    /// Accept records whose certificate chain cannot be validated, for
    /// mock fixtures. Must never be set on a production path.
    pub development_mode: bool,
}

/// Build the full input map for the register circuit matching `record`.
///
/// The secret is a `0x`-prefixed hex string; modulus and signature come
/// from the record, the message is the SHA-256 digest of the signed
/// attributes. All three big integers pass through the word codec with the
/// selected variant's limb parameters.
pub fn build_register_inputs(
    secret: &str,
    attestation_id: &str,
    record: &PassportRecord,
    options: InputOptions,
) -> Result<(CircuitVariant, CircuitInputMap)> {
    let variant = CircuitVariant::select(record)?;

    check_certificate_chain(record, options)?;

    let secret_scalar = hex_to_decimal("secret", secret)?;
    let modulus = parse_decimal("modulus", &record.pub_key.modulus)?;
    let signature = bytes_to_biguint(&record.encrypted_digest);
    let message = bytes_to_biguint(&Sha256::digest(&record.econtent));

    let mut map = CircuitInputMap::new();
    map.insert_scalar("secret", secret_scalar);
    map.insert_scalar("attestation_id", attestation_id);
    map.insert_scalar("document_number", record.document_number.clone());
    map.insert_scalar("date_of_birth", record.date_of_birth.clone());
    map.insert_scalar("date_of_expiry", record.date_of_expiry.clone());
    map.insert_words(
        "modulus",
        split_to_words(&modulus, variant.limb_bits, variant.limb_count)?,
    );
    map.insert_words(
        "signature",
        split_to_words(&signature, variant.limb_bits, variant.limb_count)?,
    );
    map.insert_words(
        "message",
        split_to_words(&message, variant.limb_bits, variant.limb_count)?,
    );

    map.validate_keys(&CircuitVariant::EXPECTED_KEYS)?;

    Ok((variant, map))
}

/// Minimal chain sanity check. Full CSCA chain validation happens outside
/// this crate; here we only refuse records with no signer certificate at
/// all, unless development mode explicitly accepts fixtures.
fn check_certificate_chain(record: &PassportRecord, options: InputOptions) -> Result<()> {
    if options.development_mode {
        warn!("⚠️  development mode: certificate chain checks relaxed, fixtures accepted");
        return Ok(());
    }
    if record.dsc_cert.is_empty() {
        return Err(InputError::CertificateChain(
            "record carries no document signer certificate".to_string(),
        ));
    }
    if record.econtent.is_empty() || record.encrypted_digest.is_empty() {
        return Err(InputError::CertificateChain(
            "record carries no signed attributes or signature".to_string(),
        ));
    }
    Ok(())
}

fn parse_decimal(field: &str, value: &str) -> Result<BigUint> {
    BigUint::parse_bytes(value.as_bytes(), 10).ok_or_else(|| InputError::InvalidNumeric {
        field: field.to_string(),
        value: value.to_string(),
    })
}

fn hex_to_decimal(field: &str, value: &str) -> Result<String> {
    let stripped = value.strip_prefix("0x").unwrap_or(value);
    let parsed =
        BigUint::parse_bytes(stripped.as_bytes(), 16).ok_or_else(|| InputError::InvalidNumeric {
            field: field.to_string(),
            value: value.to_string(),
        })?;
    Ok(parsed.to_str_radix(10))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::primitives::PASSPORT_ATTESTATION_ID;

    fn dev_options() -> InputOptions {
        InputOptions {
            development_mode: true,
        }
    }

    #[test]
    fn test_variant_selection() {
        let record = PassportRecord::mock_sha256_rsa_65537();
        let variant = CircuitVariant::select(&record).unwrap();
        assert_eq!(variant.name, "register_sha256WithRSAEncryption_65537");
        assert_eq!(variant.limb_bits, 121);
        assert_eq!(variant.limb_count, 34);
    }

    #[test]
    fn test_unsupported_algorithm_fails_fast() {
        let mut record = PassportRecord::mock_sha256_rsa_65537();
        record.signature_algorithm = "sha1WithRSAEncryption".to_string();
        let err = CircuitVariant::select(&record).unwrap_err();
        assert!(matches!(
            err,
            InputError::UnsupportedSignatureAlgorithm { .. }
        ));

        // Same algorithm with an odd exponent is just as unsupported
        let mut record = PassportRecord::mock_sha256_rsa_65537();
        record.pub_key.exponent = "3".to_string();
        assert!(CircuitVariant::select(&record).is_err());
    }

    #[test]
    fn test_build_inputs_complete_map() {
        let record = PassportRecord::mock_sha256_rsa_65537();
        let secret = "0x1f349c1d74a9e4b5c3a2";
        let (variant, map) =
            build_register_inputs(secret, PASSPORT_ATTESTATION_ID, &record, dev_options())
                .unwrap();

        assert_eq!(variant.name, "register_sha256WithRSAEncryption_65537");
        for key in CircuitVariant::EXPECTED_KEYS {
            assert!(map.get(key).is_some(), "missing {key}");
        }

        match map.get("modulus").unwrap() {
            CircuitInput::Words(words) => assert_eq!(words.len(), 34),
            other => panic!("expected words, got {other:?}"),
        }
        match map.get("secret").unwrap() {
            CircuitInput::Scalar(s) => {
                // hex converted to decimal, no 0x prefix left
                assert!(s.bytes().all(|b| b.is_ascii_digit()));
            }
            other => panic!("expected scalar, got {other:?}"),
        }
    }

    #[test]
    fn test_message_is_econtent_digest() {
        let record = PassportRecord::mock_sha256_rsa_65537();
        let (_, map) = build_register_inputs(
            "0x01",
            PASSPORT_ATTESTATION_ID,
            &record,
            dev_options(),
        )
        .unwrap();

        let digest = bytes_to_biguint(&Sha256::digest(&record.econtent));
        let words = match map.get("message").unwrap() {
            CircuitInput::Words(words) => words.clone(),
            _ => panic!("message must be a limb array"),
        };
        let rebuilt = crate::encoding::join_words(
            &words
                .iter()
                .map(|w| BigUint::parse_bytes(w.as_bytes(), 10).unwrap())
                .collect::<Vec<_>>(),
            121,
        );
        assert_eq!(rebuilt, digest);
    }

    #[test]
    fn test_missing_certificate_rejected_outside_dev_mode() {
        let mut record = PassportRecord::mock_sha256_rsa_65537();
        record.dsc_cert.clear();
        let err = build_register_inputs(
            "0x01",
            PASSPORT_ATTESTATION_ID,
            &record,
            InputOptions::default(),
        )
        .unwrap_err();
        assert!(matches!(err, InputError::CertificateChain(_)));
    }

    #[test]
    fn test_bad_secret_hex_rejected() {
        let record = PassportRecord::mock_sha256_rsa_65537();
        let err = build_register_inputs(
            "0xzz",
            PASSPORT_ATTESTATION_ID,
            &record,
            dev_options(),
        )
        .unwrap_err();
        assert!(matches!(err, InputError::InvalidNumeric { .. }));
    }

    #[test]
    fn test_input_map_serializes_to_named_json() {
        let record = PassportRecord::mock_sha256_rsa_65537();
        let (_, map) =
            build_register_inputs("0x02", PASSPORT_ATTESTATION_ID, &record, dev_options())
                .unwrap();
        let json = serde_json::to_value(&map).unwrap();
        assert!(json.get("modulus").unwrap().is_array());
        assert!(json.get("attestation_id").unwrap().is_string());
    }
}
