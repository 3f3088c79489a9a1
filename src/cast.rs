//! This module contains the conversions between floats, integers and fixed
//! decimals (integers scaled by a power of ten).

use super::error::{FloatError, Result};
use super::float::Float;
use super::string::parse_integer;
use super::utils;
use num_bigint::BigInt;
use num_integer::Integer;
use num_traits::Zero;

/// The result of a conversion that may drop a remainder. `lossless` is set
/// when converting back gives exactly the original value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LossyConversion<T> {
    pub value: T,
    pub lossless: bool,
}

impl<T> LossyConversion<T> {
    pub fn new(value: T, lossless: bool) -> Self {
        LossyConversion { value, lossless }
    }
}

impl Float {
    /// Load the integer `val` into the float, with a zero exponent. Fails
    /// with `OutOfRange` if the integer does not fit the mantissa.
    pub fn from_bigint(val: &BigInt) -> Result<Self> {
        Self::new(val.clone(), 0)
    }

    /// Returns the integral part of the number, rounded toward negative
    /// infinity. Notice that numbers with a large exponent produce very large
    /// integers.
    pub fn to_bigint(&self) -> BigInt {
        let int = self.floor();
        let exp = int.get_exp();
        debug_assert!(exp >= 0 || int.is_zero());
        if exp <= 0 {
            return int.get_mantissa().clone();
        }
        int.get_mantissa() * utils::pow10(exp.unsigned_abs())
    }

    /// Convert the number to an integer. Fails with `PrecisionLoss` if the
    /// number has a non-zero fractional part.
    pub fn try_to_bigint(&self) -> Result<BigInt> {
        if !self.is_integer() {
            tracing::debug!(
                mantissa = %self.get_mantissa(),
                exp = self.get_exp(),
                "number has a fractional part"
            );
            return Err(FloatError::PrecisionLoss);
        }
        Ok(self.to_bigint())
    }

    /// Load the fixed decimal `scaled × 10^-decimals`.
    /// Example: (12345, 2) is 123.45.
    pub fn from_fixed_decimal(scaled: &BigInt, decimals: u8) -> Result<Self> {
        Self::pack(scaled, -(decimals as i32))
    }

    /// Same as [`Float::from_fixed_decimal`]. Loading a fixed decimal is
    /// always lossless.
    pub fn from_fixed_decimal_lossy(
        scaled: &BigInt,
        decimals: u8,
    ) -> Result<LossyConversion<Self>> {
        let value = Self::from_fixed_decimal(scaled, decimals)?;
        Ok(LossyConversion::new(value, true))
    }

    /// Split `self × 10^decimals` into the integer part, truncated toward
    /// zero, and the remainder.
    fn scale_to_fixed(&self, decimals: u8) -> (BigInt, BigInt) {
        let exp = self.get_exp() as i64 + decimals as i64;
        let mantissa = self.get_mantissa();
        // At most i32::MAX + u8::MAX, which fits a u32.
        if let Ok(exp) = u32::try_from(exp) {
            let scaled = mantissa * utils::pow10(exp);
            return (scaled, BigInt::zero());
        }

        let digits = utils::count_digits(mantissa);
        match u32::try_from(-exp) {
            // Truncate toward zero, the remainder has the sign of the
            // mantissa.
            Ok(shift) if shift as u64 <= digits => {
                mantissa.div_rem(&utils::pow10(shift))
            }
            _ => (BigInt::zero(), mantissa.clone()),
        }
    }

    /// Convert the number to a fixed decimal with `decimals` decimal places.
    /// Fails with `PrecisionLoss` if more decimal places are needed.
    pub fn to_fixed_decimal(&self, decimals: u8) -> Result<BigInt> {
        let (scaled, remainder) = self.scale_to_fixed(decimals);
        if !remainder.is_zero() {
            tracing::debug!(
                mantissa = %self.get_mantissa(),
                exp = self.get_exp(),
                decimals,
                "fixed decimal would drop a remainder"
            );
            return Err(FloatError::PrecisionLoss);
        }
        Ok(scaled)
    }

    /// Convert the number to a fixed decimal with `decimals` decimal places,
    /// truncating extra digits toward zero.
    pub fn to_fixed_decimal_lossy(
        &self,
        decimals: u8,
    ) -> LossyConversion<BigInt> {
        let (scaled, remainder) = self.scale_to_fixed(decimals);
        LossyConversion::new(scaled, remainder.is_zero())
    }

    /// Pack the decimal integer `coefficient` with the exponent `exp`.
    /// Example: ("314", -2) is 3.14.
    pub fn pack_lossless(coefficient: &str, exp: i32) -> Result<Self> {
        let mantissa = parse_integer(coefficient)?;
        Self::pack(&mantissa, exp)
    }
}

impl TryFrom<BigInt> for Float {
    type Error = FloatError;

    fn try_from(value: BigInt) -> Result<Self> {
        Self::new(value, 0)
    }
}

impl TryFrom<&BigInt> for Float {
    type Error = FloatError;

    fn try_from(value: &BigInt) -> Result<Self> {
        Self::from_bigint(value)
    }
}

impl TryFrom<&Float> for BigInt {
    type Error = FloatError;

    fn try_from(value: &Float) -> Result<Self> {
        value.try_to_bigint()
    }
}

macro_rules! declare_from_int {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Float {
                fn from(val: $ty) -> Self {
                    Self::raw(BigInt::from(val), 0)
                }
            }
        )*
    };
}

declare_from_int!(i32, u32, i64, u64, i128, u128);

#[test]
fn test_from_bigint() {
    let x = Float::from_bigint(&BigInt::from(5)).unwrap();
    assert_eq!(x.as_hex(), format!("0x{}5", "0".repeat(63)));

    let big = BigInt::from(1) << 223;
    let err = Float::from_bigint(&big).unwrap_err();
    assert_eq!(err, FloatError::OutOfRange);
    assert!(Float::try_from(-big.clone()).is_ok());
    assert!(Float::try_from(&big).is_err());

    assert_eq!(Float::from(-7i64).format(), "-7");
    assert_eq!(Float::from(u128::MAX).to_bigint(), BigInt::from(u128::MAX));
    assert_eq!(Float::from(0u32).get_exp(), 0);
}

#[test]
fn test_to_bigint() {
    let hex = format!("0x{}1234", "0".repeat(60));
    let x = Float::from_hex(&hex).unwrap();
    assert_eq!(x.to_bigint(), BigInt::from(0x1234));

    let to_int = |s: &str| Float::parse(s).unwrap().to_bigint();
    assert_eq!(to_int("3.14"), BigInt::from(3));
    assert_eq!(to_int("-3.14"), BigInt::from(-4));
    assert_eq!(to_int("1.5e3"), BigInt::from(1500));
    assert_eq!(to_int("-0.001"), BigInt::from(-1));
    assert_eq!(to_int("0"), BigInt::from(0));
}

#[test]
fn test_try_to_bigint() {
    let x = Float::parse("42.000").unwrap();
    assert_eq!(x.try_to_bigint().unwrap(), BigInt::from(42));
    assert_eq!(BigInt::try_from(&x).unwrap(), BigInt::from(42));

    let x = Float::parse("42.5").unwrap();
    assert_eq!(x.try_to_bigint().unwrap_err(), FloatError::PrecisionLoss);
}

#[test]
fn test_fixed_decimal() {
    let x = Float::from_fixed_decimal(&BigInt::from(12345), 2).unwrap();
    assert_eq!(x.format(), "123.45");

    let y = Float::parse("123.45").unwrap();
    assert_eq!(y.to_fixed_decimal(2).unwrap(), BigInt::from(12345));
    assert_eq!(y.to_fixed_decimal(4).unwrap(), BigInt::from(1234500));
    let err = y.to_fixed_decimal(1).unwrap_err();
    assert_eq!(err, FloatError::PrecisionLoss);

    let lossy = Float::from_fixed_decimal_lossy(&BigInt::from(5), 18);
    let lossy = lossy.unwrap();
    assert!(lossy.lossless);
    assert_eq!(lossy.value.format(), "5e-18");

    let big = BigInt::from(1) << 224;
    assert!(Float::from_fixed_decimal(&big, 0).is_err());
}

#[test]
fn test_fixed_decimal_lossy() {
    let x = Float::from_fixed_decimal(&BigInt::from(12345), 3).unwrap();
    let out = x.to_fixed_decimal_lossy(2);
    assert_eq!(out, LossyConversion::new(BigInt::from(1234), false));

    let x = Float::from_fixed_decimal(&BigInt::from(12340), 3).unwrap();
    let out = x.to_fixed_decimal_lossy(2);
    assert_eq!(out, LossyConversion::new(BigInt::from(1234), true));

    // Truncation is toward zero.
    let x = Float::parse("-1.99").unwrap();
    let out = x.to_fixed_decimal_lossy(1);
    assert_eq!(out, LossyConversion::new(BigInt::from(-19), false));

    let x = Float::min_positive_value();
    let out = x.to_fixed_decimal_lossy(18);
    assert_eq!(out, LossyConversion::new(BigInt::from(0), false));

    // Exponents at both ends of the range.
    let x = Float::pack(&BigInt::from(-3), i32::MIN + 10).unwrap();
    let out = x.to_fixed_decimal_lossy(u8::MAX);
    assert_eq!(out, LossyConversion::new(BigInt::from(0), false));

    let x = Float::pack(&BigInt::from(1234), -254).unwrap();
    let out = x.to_fixed_decimal_lossy(u8::MAX);
    assert_eq!(out, LossyConversion::new(BigInt::from(12340), true));

    let x = Float::pack(&BigInt::from(2), 40).unwrap();
    let out = x.to_fixed_decimal_lossy(u8::MAX);
    assert_eq!(out.value, BigInt::from(2) * utils::pow10(295));
    assert!(out.lossless);
}

#[test]
fn test_pack_lossless() {
    let x = Float::pack_lossless("314", -2).unwrap();
    assert_eq!(x.unpack(), Float::parse("3.14").unwrap().unpack());

    let x = Float::pack_lossless("-5", 3).unwrap();
    assert_eq!(x.format(), "-5000");

    assert!(Float::pack_lossless("3.14", 0).is_err());
    assert!(Float::pack_lossless("", 0).is_err());
    let wide = "9".repeat(70);
    let err = Float::pack_lossless(&wide, 0).unwrap_err();
    assert_eq!(err, FloatError::OutOfRange);
}
