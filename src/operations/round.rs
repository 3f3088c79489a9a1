//! This module contains the implementation of methods that split a number
//! into its integral and fractional parts.

use crate::error::Result;
use crate::utils;
use crate::Float;
use num_bigint::BigInt;
use num_integer::Integer;
use num_traits::Signed;

impl Float {
    /// Round the number toward negative infinity. The result has a zero
    /// exponent, unless the number is already an integer.
    pub fn floor(&self) -> Self {
        if self.get_exp() >= 0 {
            return self.clone();
        }

        let mantissa = self.get_mantissa();
        let scale = self.get_exp().unsigned_abs();

        // All of the digits are after the point.
        if scale as u64 > utils::count_digits(mantissa) {
            return if mantissa.is_negative() {
                Self::raw(BigInt::from(-1), 0)
            } else {
                Self::zero()
            };
        }

        let integral = mantissa.div_floor(&utils::pow10(scale));
        Self::raw(integral, 0)
    }

    /// Returns the fractional part, `self - floor(self)`. The result is
    /// never negative.
    pub fn frac(&self) -> Result<Self> {
        self.sub(&self.floor())
    }
}

#[cfg(test)]
fn parse(text: &str) -> Float {
    Float::parse(text).unwrap()
}

#[test]
fn test_floor() {
    assert_eq!(parse("3.14").floor().format(), "3");
    assert_eq!(parse("-3.14").floor().format(), "-4");
    assert_eq!(parse("-3").floor().format(), "-3");
    assert_eq!(parse("-3.000").floor().format(), "-3");
    assert_eq!(parse("0.5").floor().format(), "0");
    assert_eq!(parse("-0.5").floor().format(), "-1");
    assert_eq!(parse("1e-30").floor().format(), "0");
    assert_eq!(parse("-1e-30").floor().format(), "-1");
    assert_eq!(parse("1e20").floor().format(), "1e20");
    assert!(Float::zero().floor().is_zero());

    let x = parse("314.15").floor();
    assert_eq!(x.unpack(), (BigInt::from(314), 0));

    let tiny = Float::pack(&BigInt::from(7), i32::MIN).unwrap();
    assert!(tiny.floor().is_zero());
    let tiny = Float::pack(&BigInt::from(-7), i32::MIN).unwrap();
    assert_eq!(tiny.floor().unpack(), (BigInt::from(-1), 0));
}

#[test]
fn test_frac() {
    assert_eq!(parse("3.14").frac().unwrap().format(), "0.14");
    assert_eq!(parse("-3.14").frac().unwrap().format(), "0.86");
    assert_eq!(parse("0.75").frac().unwrap().format(), "0.75");
    assert!(parse("42").frac().unwrap().is_zero());
    assert!(parse("-42.0").frac().unwrap().is_zero());

    // The fraction of a tiny negative number needs too many digits.
    let tiny = Float::max_negative_value();
    assert!(tiny.frac().is_err());
}

#[test]
fn test_floor_plus_frac() {
    for text in utils::get_special_test_values() {
        let x = parse(text);
        let Ok(frac) = x.frac() else { continue };
        let sum = x.floor().add(&frac).unwrap();
        assert_eq!(sum, x, "{}", text);
    }
}
