//! This file contains simple helper functions and test helpers.

use num_bigint::BigInt;
use num_traits::Zero;

/// Returns 10^`n`. Callers convert wider shifts with `u32::try_from` and
/// handle the failure.
pub fn pow10(n: u32) -> BigInt {
    BigInt::from(10u32).pow(n)
}

/// Returns the number of decimal digits in the magnitude of `val`. Zero has
/// a single digit.
pub fn count_digits(val: &BigInt) -> u64 {
    if val.is_zero() {
        return 1;
    }
    val.magnitude().to_str_radix(10).len() as u64
}

/// Moves trailing decimal zeros of `mantissa` into `exp`. Zero is returned
/// as (0, 0).
pub fn strip_trailing_zeros(mantissa: BigInt, exp: i64) -> (BigInt, i64) {
    if mantissa.is_zero() {
        return (mantissa, 0);
    }
    let ten = BigInt::from(10u32);
    let mut mantissa = mantissa;
    let mut exp = exp;
    loop {
        let rem = &mantissa % &ten;
        if !rem.is_zero() {
            return (mantissa, exp);
        }
        mantissa /= &ten;
        exp += 1;
    }
}

#[test]
fn test_pow10() {
    assert_eq!(pow10(0), BigInt::from(1));
    assert_eq!(pow10(3), BigInt::from(1000));
    assert_eq!(pow10(20).to_string(), "100000000000000000000");
    assert_eq!(count_digits(&pow10(300)), 301);
    assert_eq!(count_digits(&-pow10(135)), 136);
}

#[test]
fn test_count_digits() {
    assert_eq!(count_digits(&BigInt::from(0)), 1);
    assert_eq!(count_digits(&BigInt::from(7)), 1);
    assert_eq!(count_digits(&BigInt::from(-10)), 2);
    assert_eq!(count_digits(&BigInt::from(99)), 2);
    assert_eq!(count_digits(&BigInt::from(100)), 3);
    assert_eq!(count_digits(&pow10(67)), 68);
    assert_eq!(count_digits(&(pow10(67) - 1)), 67);

    let two_223 = BigInt::from(1) << 223;
    assert_eq!(count_digits(&two_223), 68);
}

#[test]
fn test_strip_trailing_zeros() {
    let (m, e) = strip_trailing_zeros(BigInt::from(31400), -4);
    assert_eq!((m, e), (BigInt::from(314), -2));

    let (m, e) = strip_trailing_zeros(BigInt::from(-7), 3);
    assert_eq!((m, e), (BigInt::from(-7), 3));

    let (m, e) = strip_trailing_zeros(BigInt::from(0), -9);
    assert_eq!((m, e), (BigInt::from(0), 0));
}

#[cfg(test)]
/// Returns list of interesting decimal literals that various tests use to
/// catch edge cases.
pub fn get_special_test_values() -> [&'static str; 20] {
    [
        "0",
        "1",
        "-1",
        "3.14",
        "-3.14",
        "2.0",
        "0.5",
        "-0.25",
        "0.0001",
        "0.00001",
        "1000000000",
        "1000000001",
        "123.45",
        "-987654321.123456789",
        "0.000000000000000000000000000001",
        "100000000000000000000000000000000",
        "13479973333575319897333507543509815336818572211270286240551805124607",
        "-13479973333575319897333507543509815336818572211270286240551805124608",
        "1e-30",
        "-4.2e17",
    ]
}
