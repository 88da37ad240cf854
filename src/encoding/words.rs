// Fixed-width word codec for circuit inputs
//
// The register circuit does its RSA arithmetic on fixed-width limbs. An
// arbitrary-precision integer (modulus, signature, digest) is re-expressed
// as exactly `k` words of `n` bits each, little-endian positional weight:
//
//   value == sum(word[i] * 2^(n*i)) for i in [0, k)
//
// The (n, k) pair must match the constants the circuit was compiled with;
// a mismatch produces a circuit that silently cannot be satisfied. The
// default pairing below is the single source of truth consumed by circuit
// variant selection in `inputs.rs`.

use num_bigint::BigUint;
use thiserror::Error;

/// Limb width in bits for the RSA register circuits.
pub const RSA_LIMB_BITS: u32 = 121;

/// Limb count for the RSA register circuits. 121 * 34 = 4114 bits, enough
/// for a 4096-bit key with margin.
pub const RSA_LIMB_COUNT: usize = 34;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CodecError {
    #[error("value of {value_bits} bits overflows {n}x{k} word encoding")]
    Overflow { value_bits: u64, n: u32, k: usize },
}

pub type Result<T> = std::result::Result<T, CodecError>;

/// Split `value` into exactly `k` words of `n` bits, little-endian weight.
///
/// Fails with `Overflow` when `value >= 2^(n*k)`; sizing (n, k) to the
/// modulus bit-length is the caller's contract. The encoding is unique for
/// in-range values and `join_words` is its exact inverse.
pub fn split_to_words(value: &BigUint, n: u32, k: usize) -> Result<Vec<BigUint>> {
    if value.bits() > n as u64 * k as u64 {
        return Err(CodecError::Overflow {
            value_bits: value.bits(),
            n,
            k,
        });
    }

    let mask = (BigUint::from(1u8) << n) - 1u8;
    let mut words = Vec::with_capacity(k);
    let mut rest = value.clone();
    for _ in 0..k {
        words.push(&rest & &mask);
        rest >>= n;
    }
    Ok(words)
}

/// Reassemble a word array produced by `split_to_words`.
pub fn join_words(words: &[BigUint], n: u32) -> BigUint {
    let mut value = BigUint::from(0u8);
    for word in words.iter().rev() {
        value = (value << n) + word;
    }
    value
}

/// Interpret a byte sequence as a big-endian unsigned integer; `bytes[0]`
/// is most significant.
pub fn bytes_to_biguint(bytes: &[u8]) -> BigUint {
    BigUint::from_bytes_be(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_bigint::BigUint;

    #[test]
    fn test_round_trip_small_values() {
        for v in [0u64, 1, 255, 256, u64::MAX] {
            let value = BigUint::from(v);
            let words = split_to_words(&value, 8, 9).unwrap();
            assert_eq!(words.len(), 9);
            assert_eq!(join_words(&words, 8), value);
        }
    }

    #[test]
    fn test_round_trip_rsa_sized() {
        // A 4096-bit value: all bits set
        let value = (BigUint::from(1u8) << 4096u32) - 1u8;
        let words = split_to_words(&value, RSA_LIMB_BITS, RSA_LIMB_COUNT).unwrap();
        assert_eq!(words.len(), RSA_LIMB_COUNT);
        let bound = BigUint::from(1u8) << RSA_LIMB_BITS;
        for word in &words {
            assert!(word < &bound);
        }
        assert_eq!(join_words(&words, RSA_LIMB_BITS), value);
    }

    #[test]
    fn test_boundary_value_fits() {
        // 2^(n*k) - 1 is the largest encodable value
        let value = (BigUint::from(1u8) << (3u32 * 4)) - 1u8;
        let words = split_to_words(&value, 3, 4).unwrap();
        assert_eq!(join_words(&words, 3), value);
    }

    #[test]
    fn test_overflow_rejected() {
        let value = BigUint::from(1u8) << (3u32 * 4);
        let err = split_to_words(&value, 3, 4).unwrap_err();
        assert_eq!(
            err,
            CodecError::Overflow {
                value_bits: 13,
                n: 3,
                k: 4
            }
        );
    }

    #[test]
    fn test_zero_pads_to_k_words() {
        let words = split_to_words(&BigUint::from(0u8), RSA_LIMB_BITS, RSA_LIMB_COUNT).unwrap();
        assert_eq!(words.len(), RSA_LIMB_COUNT);
        assert!(words.iter().all(|w| w == &BigUint::from(0u8)));
    }

    #[test]
    fn test_bytes_to_biguint_big_endian() {
        assert_eq!(bytes_to_biguint(&[0x01, 0x00]), BigUint::from(256u32));
        assert_eq!(bytes_to_biguint(&[]), BigUint::from(0u8));
        assert_eq!(bytes_to_biguint(&[0xff, 0xff]), BigUint::from(65535u32));
    }
}
