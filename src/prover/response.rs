// Strict parser for the textual proof representation
//
// One platform delivers the proof as a stringified value over a native
// event channel instead of structured data:
//
//   ZkProof(proof=Proof(pi_a=[A], pi_b=[[B1], [B2], [1, 0]], pi_c=[C],
//           protocol=groth16, curve=bn128), pub_signals=[S])
//
// A, B1, B2, C and S are comma-separated decimal integer lists. The
// grammar is matched structurally, marker by marker; anything that does
// not line up exactly is rejected. A partially matched proof would be a
// cryptographically wrong proof, so this parser fails closed.

use super::artifact::{ProofArtifact, ProofPoints};
use super::ProofError;

const HEAD: &str = "ZkProof(proof=Proof(pi_a=[";
const PI_B_OPEN: &str = "], pi_b=[[";
const PI_B_SEP: &str = "], [";
const PI_B_CLOSE: &str = "], [1, 0]], pi_c=[";
const TAIL_MARKERS: &str = "], protocol=groth16, curve=bn128), pub_signals=[";
const END: &str = "])";

/// Parse the fixed textual proof grammar into a `ProofArtifact`.
pub fn parse_proof_text(text: &str) -> Result<ProofArtifact, ProofError> {
    let rest = expect_marker(text.trim(), HEAD)?;
    let (pi_a, rest) = take_list(rest, PI_B_OPEN)?;
    let (pi_b_1, rest) = take_list(rest, PI_B_SEP)?;
    let (pi_b_2, rest) = take_list(rest, PI_B_CLOSE)?;
    let (pi_c, rest) = take_list(rest, TAIL_MARKERS)?;
    let (pub_signals, rest) = take_list(rest, END)?;

    if !rest.is_empty() {
        return Err(ProofError::MalformedProof(format!(
            "trailing content after proof: {rest:?}"
        )));
    }

    Ok(ProofArtifact {
        proof: ProofPoints {
            a: pi_a,
            b: vec![pi_b_1, pi_b_2],
            c: pi_c,
        },
        pub_signals,
    })
}

fn expect_marker<'a>(input: &'a str, marker: &str) -> Result<&'a str, ProofError> {
    input.strip_prefix(marker).ok_or_else(|| {
        ProofError::MalformedProof(format!("expected marker {marker:?}"))
    })
}

/// Consume a decimal-integer list up to `terminator`, returning the parsed
/// elements and the remainder after the terminator.
fn take_list<'a>(
    input: &'a str,
    terminator: &str,
) -> Result<(Vec<String>, &'a str), ProofError> {
    let end = input.find(terminator).ok_or_else(|| {
        ProofError::MalformedProof(format!("expected terminator {terminator:?}"))
    })?;
    let body = &input[..end];

    // A list body must not contain stray brackets; that would mean the
    // nesting in the input does not match the grammar.
    if body.contains('[') || body.contains(']') {
        return Err(ProofError::MalformedProof(format!(
            "mismatched bracket nesting in list {body:?}"
        )));
    }

    let elements = body
        .split(',')
        .map(|e| e.trim().to_string())
        .collect::<Vec<_>>();

    for element in &elements {
        if element.is_empty() || !element.bytes().all(|b| b.is_ascii_digit()) {
            return Err(ProofError::MalformedProof(format!(
                "list element is not a decimal integer: {element:?}"
            )));
        }
    }

    Ok((elements, &input[end + terminator.len()..]))
}

#[cfg(test)]
mod tests {
    use super::*;

    const VALID: &str = "ZkProof(proof=Proof(pi_a=[11, 12, 1], pi_b=[[21, 22], [23, 24], [1, 0]], pi_c=[31, 32, 1], protocol=groth16, curve=bn128), pub_signals=[41, 42, 43])";

    #[test]
    fn test_parse_valid_proof() {
        let artifact = parse_proof_text(VALID).unwrap();
        assert_eq!(artifact.proof.a, vec!["11", "12", "1"]);
        assert_eq!(artifact.proof.b.len(), 2);
        assert_eq!(artifact.proof.b[0], vec!["21", "22"]);
        assert_eq!(artifact.proof.b[1], vec!["23", "24"]);
        assert_eq!(artifact.proof.c, vec!["31", "32", "1"]);
        assert_eq!(artifact.pub_signals, vec!["41", "42", "43"]);
    }

    #[test]
    fn test_elements_trimmed_and_kept_as_strings() {
        let text = "ZkProof(proof=Proof(pi_a=[ 1 ,2], pi_b=[[3], [4], [1, 0]], pi_c=[5], protocol=groth16, curve=bn128), pub_signals=[21888242871839275222246405745257275088548364400416034343698204186575808495617])";
        let artifact = parse_proof_text(text).unwrap();
        assert_eq!(artifact.proof.a, vec!["1", "2"]);
        // bigger than any machine integer, must survive untouched
        assert_eq!(
            artifact.pub_signals[0],
            "21888242871839275222246405745257275088548364400416034343698204186575808495617"
        );
    }

    #[test]
    fn test_missing_protocol_marker_rejected() {
        let text = VALID.replace("protocol=groth16", "protocol=plonk");
        assert!(parse_proof_text(&text).is_err());
    }

    #[test]
    fn test_missing_curve_marker_rejected() {
        let text = VALID.replace("curve=bn128", "curve=bls12381");
        assert!(parse_proof_text(&text).is_err());
    }

    #[test]
    fn test_wrong_third_pi_b_row_rejected() {
        let text = VALID.replace("[1, 0]", "[1, 1]");
        assert!(parse_proof_text(&text).is_err());
    }

    #[test]
    fn test_mismatched_nesting_rejected() {
        let text = "ZkProof(proof=Proof(pi_a=[11, [12], 1], pi_b=[[21], [22], [1, 0]], pi_c=[31], protocol=groth16, curve=bn128), pub_signals=[41])";
        let err = parse_proof_text(text).unwrap_err();
        assert!(matches!(err, ProofError::MalformedProof(_)));
    }

    #[test]
    fn test_trailing_garbage_rejected() {
        let text = format!("{VALID}garbage");
        assert!(parse_proof_text(&text).is_err());
    }

    #[test]
    fn test_non_decimal_element_rejected() {
        let text = VALID.replace("pi_c=[31", "pi_c=[0x31");
        assert!(parse_proof_text(&text).is_err());

        let empty = VALID.replace("pub_signals=[41, 42, 43]", "pub_signals=[]");
        assert!(parse_proof_text(&empty).is_err());
    }
}
