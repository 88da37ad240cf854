// Word codec and input encoding tests across module boundaries
use crate::encoding::{
    build_register_inputs, bytes_to_biguint, join_words, split_to_words, CircuitInput,
    InputOptions, RSA_LIMB_BITS, RSA_LIMB_COUNT,
};
use crate::primitives::{PassportRecord, PASSPORT_ATTESTATION_ID};
use num_bigint::BigUint;

#[test]
fn test_round_trip_across_widths() {
    // The codec must hold for any (n, k) pairing, not just the RSA one
    let cases: &[(u32, usize)] = &[(8, 32), (64, 4), (121, 34), (121, 17)];

    for &(n, k) in cases {
        let max = (BigUint::from(1u8) << (n as u64 * k as u64)) - 1u8;
        let mid = &max >> 1u8;
        for value in [BigUint::from(0u8), BigUint::from(1u8), mid, max] {
            let words = split_to_words(&value, n, k).unwrap();
            assert_eq!(words.len(), k);
            assert_eq!(join_words(&words, n), value, "round trip n={n} k={k}");
        }
    }

    println!("✅ Word codec round-trips across limb widths");
}

#[test]
fn test_overflow_is_a_contract_violation() {
    for &(n, k) in &[(8u32, 2usize), (121, 34)] {
        let too_big = BigUint::from(1u8) << (n as u64 * k as u64);
        assert!(split_to_words(&too_big, n, k).is_err());
    }
}

#[test]
fn test_bytes_to_biguint_big_endian_weight() {
    assert_eq!(bytes_to_biguint(&[0x01, 0x00]), BigUint::from(256u32));
}

#[test]
fn test_limb_words_decode_back_to_modulus() {
    // End to end: the modulus rendered into the input map must reassemble
    // to the record's modulus exactly
    let record = PassportRecord::mock_sha256_rsa_65537();
    let (_, map) = build_register_inputs(
        "0x05",
        PASSPORT_ATTESTATION_ID,
        &record,
        InputOptions {
            development_mode: true,
        },
    )
    .unwrap();

    let words = match map.get("modulus").unwrap() {
        CircuitInput::Words(words) => words
            .iter()
            .map(|w| BigUint::parse_bytes(w.as_bytes(), 10).unwrap())
            .collect::<Vec<_>>(),
        _ => panic!("modulus must be a limb array"),
    };
    assert_eq!(words.len(), RSA_LIMB_COUNT);

    let expected = BigUint::parse_bytes(record.pub_key.modulus.as_bytes(), 10).unwrap();
    assert_eq!(join_words(&words, RSA_LIMB_BITS), expected);

    println!("✅ Input map limbs decode back to the certificate modulus");
}
