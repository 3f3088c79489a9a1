//! This module contains the table of constants: the extreme values of the
//! packed word and the default formatting thresholds.

use crate::float::{max_mantissa, min_mantissa};
use crate::Float;
use num_bigint::BigInt;

impl Float {
    /// Returns the largest positive value, (2^223 - 1) × 10^2147483647.
    pub fn max_positive_value() -> Self {
        Self::raw(max_mantissa(), i32::MAX)
    }

    /// Returns the smallest positive value, 1 × 10^-2147483648.
    pub fn min_positive_value() -> Self {
        Self::raw(BigInt::from(1), i32::MIN)
    }

    /// Returns the negative value closest to zero, -1 × 10^-2147483648.
    pub fn max_negative_value() -> Self {
        Self::raw(BigInt::from(-1), i32::MIN)
    }

    /// Returns the most negative value, -2^223 × 10^2147483647.
    pub fn min_negative_value() -> Self {
        Self::raw(min_mantissa(), i32::MAX)
    }

    /// Returns the default lower threshold of decimal notation, 1e-4.
    pub fn format_default_scientific_min() -> Self {
        Self::raw(BigInt::from(1), -4)
    }

    /// Returns the default upper threshold of decimal notation, 1e9.
    pub fn format_default_scientific_max() -> Self {
        Self::raw(BigInt::from(1), 9)
    }
}

#[test]
fn test_extreme_values() {
    let one = Float::one();
    let zero = Float::zero();
    let max_pos = Float::max_positive_value();
    let min_pos = Float::min_positive_value();
    let max_neg = Float::max_negative_value();
    let min_neg = Float::min_negative_value();

    assert!(max_pos > one);
    assert!(min_pos > zero && min_pos < one);
    assert!(max_neg < zero && max_neg > one.neg().unwrap());
    assert!(min_neg < max_neg);

    let all = [&max_pos, &min_pos, &max_neg, &min_neg];
    for (i, a) in all.iter().enumerate() {
        for b in all.iter().skip(i + 1) {
            assert_ne!(a, b);
        }
    }

    // Nothing is larger than the largest value.
    for text in crate::utils::get_special_test_values() {
        let x = Float::parse(text).unwrap();
        assert!(x.lte(&max_pos) && x.gte(&min_neg));
        assert!(x.is_zero() || x.gte(&min_pos) || x.lte(&max_neg));
    }
}

#[test]
fn test_extreme_values_hex() {
    let hex = Float::max_positive_value().as_hex();
    assert_eq!(hex, format!("0x7fffffff7f{}", "f".repeat(54)));

    let hex = Float::min_negative_value().as_hex();
    assert_eq!(hex, format!("0x7fffffff80{}", "0".repeat(54)));

    let hex = Float::min_positive_value().as_hex();
    assert_eq!(hex, format!("0x80000000{}1", "0".repeat(55)));

    let hex = Float::max_negative_value().as_hex();
    assert_eq!(hex, format!("0x80000000{}", "f".repeat(56)));
}

#[test]
fn test_default_thresholds() {
    assert_eq!(Float::format_default_scientific_min().format(), "0.0001");
    assert_eq!(
        Float::format_default_scientific_max().format(),
        "1000000000"
    );
}
