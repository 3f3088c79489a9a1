//! This module contains the packed word codec. A float is stored in a
//! 32-byte word: 4 bytes of exponent followed by 28 bytes of mantissa, both
//! in big-endian two's complement.

use super::error::{FloatError, Result};
use super::float::{Float, EXPONENT_BITS, PACKED_BYTES};
use num_bigint::{BigInt, Sign};

const EXPONENT_BYTES: usize = EXPONENT_BITS / 8;
const HEX_DIGITS: usize = PACKED_BYTES * 2;

impl Float {
    /// Pack the mantissa `mantissa` and the exponent `exp` into a float.
    /// Fails with `OutOfRange` if the mantissa does not fit 224 bits.
    pub fn pack(mantissa: &BigInt, exp: i32) -> Result<Self> {
        Self::new(mantissa.clone(), exp)
    }

    /// Returns the mantissa and the exponent of the packed word.
    pub fn unpack(&self) -> (BigInt, i32) {
        (self.get_mantissa().clone(), self.get_exp())
    }

    /// Returns the packed word as bytes.
    pub fn to_bytes(&self) -> [u8; PACKED_BYTES] {
        let mut word = [0u8; PACKED_BYTES];
        word[..EXPONENT_BYTES].copy_from_slice(&self.get_exp().to_be_bytes());

        // Sign-extend the minimal two's complement form into the field.
        let mantissa = self.get_mantissa().to_signed_bytes_be();
        let fill = if self.get_mantissa().sign() == Sign::Minus {
            0xff
        } else {
            0
        };
        let start = PACKED_BYTES - mantissa.len();
        debug_assert!(start >= EXPONENT_BYTES, "mantissa out of range");
        for byte in &mut word[EXPONENT_BYTES..start] {
            *byte = fill;
        }
        word[start..].copy_from_slice(&mantissa);
        word
    }

    /// Decode a packed word. Every word is a valid float; a zero mantissa
    /// field decodes to the canonical zero.
    pub fn from_bytes(word: [u8; PACKED_BYTES]) -> Self {
        let mut exp = [0u8; EXPONENT_BYTES];
        exp.copy_from_slice(&word[..EXPONENT_BYTES]);
        let exp = i32::from_be_bytes(exp);
        let mantissa = BigInt::from_signed_bytes_be(&word[EXPONENT_BYTES..]);
        Self::raw(mantissa, exp)
    }

    /// Returns the packed word as `0x` followed by 64 lowercase hex digits.
    pub fn as_hex(&self) -> String {
        format!("0x{}", hex::encode(self.to_bytes()))
    }

    /// Decode a packed word from hex text, with an optional `0x` prefix.
    pub fn from_hex(text: &str) -> Result<Self> {
        let digits = text
            .strip_prefix("0x")
            .or_else(|| text.strip_prefix("0X"))
            .unwrap_or(text);

        if digits.len() != HEX_DIGITS {
            tracing::debug!(len = digits.len(), "packed word has wrong length");
            return Err(FloatError::malformed(format!(
                "expected {} hex digits, found {}",
                HEX_DIGITS,
                digits.len()
            )));
        }

        let mut word = [0u8; PACKED_BYTES];
        hex::decode_to_slice(digits, &mut word).map_err(|err| {
            tracing::debug!(%err, "packed word is not hexadecimal");
            FloatError::malformed(err.to_string())
        })?;
        Ok(Self::from_bytes(word))
    }
}

#[cfg(test)]
use super::float::{max_mantissa, min_mantissa};

#[test]
fn test_pack_unpack() {
    let cases = [
        (BigInt::from(314), -2),
        (BigInt::from(-7), 12),
        (BigInt::from(1), i32::MIN),
        (BigInt::from(1), i32::MAX),
        (max_mantissa(), 0),
        (min_mantissa(), -5),
    ];
    for (m, e) in cases {
        let x = Float::pack(&m, e).unwrap();
        assert_eq!(x.unpack(), (m, e));
    }

    // Zero is canonical.
    let x = Float::pack(&BigInt::from(0), 99).unwrap();
    assert_eq!(x.unpack(), (BigInt::from(0), 0));

    assert_eq!(
        Float::pack(&(max_mantissa() + 1), 0).unwrap_err(),
        FloatError::OutOfRange
    );
    assert_eq!(
        Float::pack(&(min_mantissa() - 1), 0).unwrap_err(),
        FloatError::OutOfRange
    );
}

#[test]
fn test_hex_layout() {
    let x = Float::pack(&BigInt::from(314), -2).unwrap();
    let hex = x.as_hex();
    assert_eq!(hex.len(), 66);
    // Exponent field first, then the mantissa field.
    assert!(hex.starts_with("0xfffffffe"));
    assert!(hex.ends_with("013a"));
    assert_eq!(&hex[10..62], "0".repeat(52));

    let five = Float::pack(&BigInt::from(5), 0).unwrap();
    assert_eq!(five.as_hex(), format!("0x{}5", "0".repeat(63)));

    let neg = Float::pack(&BigInt::from(-1), 0).unwrap();
    assert_eq!(neg.as_hex(), format!("0x00000000{}", "f".repeat(56)));

    assert_eq!(Float::zero().as_hex(), format!("0x{}", "0".repeat(64)));
}

#[test]
fn test_hex_round_trip() {
    let cases = [
        Float::pack(&BigInt::from(-314), -2).unwrap(),
        Float::pack(&max_mantissa(), i32::MAX).unwrap(),
        Float::pack(&min_mantissa(), i32::MIN).unwrap(),
        Float::zero(),
    ];
    for x in cases {
        let y = Float::from_hex(&x.as_hex()).unwrap();
        assert_eq!(x.unpack(), y.unpack());
        let z = Float::from_bytes(x.to_bytes());
        assert_eq!(x.unpack(), z.unpack());
    }

    // Upper case and a missing prefix are accepted.
    let x = Float::pack(&BigInt::from(0xabc), 3).unwrap();
    let upper = x.as_hex().to_uppercase();
    assert_eq!(Float::from_hex(&upper).unwrap().unpack(), x.unpack());
    let bare = &x.as_hex()[2..];
    assert_eq!(Float::from_hex(bare).unwrap().unpack(), x.unpack());
}

#[test]
fn test_hex_zero_mantissa_is_canonical() {
    let text = format!("0x0000000a{}", "0".repeat(56));
    let x = Float::from_hex(&text).unwrap();
    assert!(x.is_zero());
    assert_eq!(x.get_exp(), 0);
}

#[test]
fn test_hex_malformed() {
    let short = Float::from_hex("0x1234").unwrap_err();
    assert_eq!(short.kind(), crate::ErrorKind::MalformedEncoding);

    let long = format!("0x{}", "0".repeat(65));
    assert!(Float::from_hex(&long).is_err());

    let bad = format!("0x{}g", "0".repeat(63));
    let err = Float::from_hex(&bad).unwrap_err();
    assert_eq!(err.kind(), crate::ErrorKind::MalformedEncoding);
    assert!(err.to_string().contains("'g'"), "{}", err);

    // A multi-byte character keeps the byte length at 64.
    let wide = format!("0x{}é", "0".repeat(62));
    let err = Float::from_hex(&wide).unwrap_err();
    assert_eq!(err.kind(), crate::ErrorKind::MalformedEncoding);

    let err = Float::from_hex("0x1234").unwrap_err();
    assert!(err.to_string().contains("found 4"), "{}", err);

    assert!(Float::from_hex("").is_err());
    let spaced = format!(" 0x{}", "0".repeat(64));
    assert!(Float::from_hex(&spaced).is_err());
}
