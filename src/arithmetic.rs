//! This module contains the implementation of the basic arithmetic
//! operations. Every operation is exact, except for division, which keeps a
//! fixed number of significant digits and truncates the rest.

use super::error::{FloatError, Result};
use super::float::{align, Float};
use super::utils;
use num_traits::Zero;

/// The minimum number of significant digits in the quotient of a division.
pub(crate) const DIV_DIGITS: u64 = 66;

/// Report that the exact result of `op` on `a` and `b` does not fit.
fn overflow(op: &'static str, a: &Float, b: &Float) -> FloatError {
    tracing::debug!(
        op,
        a_mantissa = %a.get_mantissa(),
        a_exp = a.get_exp(),
        b_mantissa = %b.get_mantissa(),
        b_exp = b.get_exp(),
        "result is not representable"
    );
    FloatError::Overflow
}

impl Float {
    /// Compute a+b. The result is exact.
    pub fn add(&self, other: &Self) -> Result<Self> {
        self.add_or_sub(other, false)
    }

    /// Compute a-b. The result is exact.
    pub fn sub(&self, other: &Self) -> Result<Self> {
        self.add_or_sub(other, true)
    }

    fn add_or_sub(&self, other: &Self, subtract: bool) -> Result<Self> {
        let op = if subtract { "sub" } else { "add" };
        // Bring both mantissas to the smaller exponent, then operate on
        // integers.
        let (a, b, exp) =
            align(self, other).ok_or_else(|| overflow(op, self, other))?;
        let mantissa = if subtract { a - b } else { a + b };
        Self::from_exact(mantissa, exp)
            .ok_or_else(|| overflow(op, self, other))
    }

    /// Compute a*b. The result is exact.
    pub fn mul(&self, other: &Self) -> Result<Self> {
        let mantissa = self.get_mantissa() * other.get_mantissa();
        let exp = self.get_exp() as i64 + other.get_exp() as i64;
        Self::from_exact(mantissa, exp)
            .ok_or_else(|| overflow("mul", self, other))
    }

    /// Compute a/b. Exact quotients are returned exactly. Other quotients
    /// are computed to at least 66 significant digits, and truncated toward
    /// zero. Digits below 10^i32::MIN are truncated as well; a quotient
    /// with no digit left fails with `Overflow`.
    pub fn div(&self, other: &Self) -> Result<Self> {
        if other.is_zero() {
            tracing::debug!(
                mantissa = %self.get_mantissa(),
                exp = self.get_exp(),
                "division by zero"
            );
            return Err(FloatError::DivisionByZero);
        }
        if self.is_zero() {
            return Ok(Self::zero());
        }

        let a = self.get_mantissa();
        let b = other.get_mantissa();

        // Scale the dividend to generate the digits after the point.
        let a_digits = utils::count_digits(a);
        let b_digits = utils::count_digits(b);
        let shift = (DIV_DIGITS + b_digits).saturating_sub(a_digits);
        let shift = u32::try_from(shift)
            .map_err(|_| overflow("div", self, other))?;
        let dividend = a * utils::pow10(shift);

        // Integer division truncates toward zero.
        let quotient = &dividend / b;
        let remainder = &dividend % b;
        if !remainder.is_zero() {
            tracing::trace!(
                %quotient,
                %remainder,
                "division truncated an inexact quotient"
            );
        }

        let exp =
            self.get_exp() as i64 - other.get_exp() as i64 - shift as i64;
        let (mut quotient, mut exp) =
            utils::strip_trailing_zeros(quotient, exp);

        // Drop the digits below the smallest exponent, toward zero.
        let floor = i32::MIN as i64;
        if exp < floor {
            let digits = utils::count_digits(&quotient);
            let drop = match u32::try_from(floor - exp) {
                Ok(drop) if (drop as u64) < digits => drop,
                _ => return Err(overflow("div", self, other)),
            };
            tracing::trace!(drop, "quotient truncated at the exponent floor");
            quotient /= utils::pow10(drop);
            exp = floor;
        }

        Self::from_exact(quotient, exp)
            .ok_or_else(|| overflow("div", self, other))
    }

    /// Returns the value with the sign flipped. Fails for the single
    /// mantissa -2^223, whose negation does not fit.
    pub fn neg(&self) -> Result<Self> {
        let mantissa = -self.get_mantissa();
        Self::from_exact(mantissa, self.get_exp() as i64).ok_or_else(|| {
            tracing::debug!(
                mantissa = %self.get_mantissa(),
                exp = self.get_exp(),
                "negation does not fit"
            );
            FloatError::Overflow
        })
    }

    /// Returns the absolute value.
    pub fn abs(&self) -> Result<Self> {
        if self.is_negative() {
            self.neg()
        } else {
            Ok(self.clone())
        }
    }

    /// Compute 1/a.
    pub fn inv(&self) -> Result<Self> {
        Self::one().div(self)
    }
}

macro_rules! declare_operator {
    ($trait_name:ident,
     $func_name:ident) => {
        // Self + Self
        impl core::ops::$trait_name for Float {
            type Output = Result<Float>;

            fn $func_name(self, rhs: Self) -> Self::Output {
                Float::$func_name(&self, &rhs)
            }
        }

        // Self + &Self
        impl core::ops::$trait_name<&Float> for Float {
            type Output = Result<Float>;

            fn $func_name(self, rhs: &Float) -> Self::Output {
                Float::$func_name(&self, rhs)
            }
        }

        // &Self + &Self
        impl core::ops::$trait_name<&Float> for &Float {
            type Output = Result<Float>;

            fn $func_name(self, rhs: &Float) -> Self::Output {
                Float::$func_name(self, rhs)
            }
        }
    };
}

declare_operator!(Add, add);
declare_operator!(Sub, sub);
declare_operator!(Mul, mul);
declare_operator!(Div, div);

impl core::ops::Neg for Float {
    type Output = Result<Float>;

    fn neg(self) -> Self::Output {
        Float::neg(&self)
    }
}

impl core::ops::Neg for &Float {
    type Output = Result<Float>;

    fn neg(self) -> Self::Output {
        Float::neg(self)
    }
}

#[cfg(test)]
fn parse(text: &str) -> Float {
    Float::parse(text).unwrap()
}

#[test]
fn test_add_sub() {
    let a = parse("3.14");
    let b = parse("-3.14");
    assert_eq!(a.sub(&b).unwrap().format(), "6.28");
    assert_eq!(a.add(&b).unwrap().format(), "0");
    assert!(a.add(&b).unwrap().is_zero());

    // Operands with different exponents.
    let c = parse("100");
    let d = parse("0.001");
    let sum = c.add(&d).unwrap();
    assert_eq!(sum.unpack(), (num_bigint::BigInt::from(100001), -3));
    assert_eq!(c.sub(&d).unwrap().format(), "99.999");

    // Adding zero keeps the other operand.
    let z = Float::zero();
    assert_eq!(z.add(&a).unwrap().unpack(), a.unpack());
    assert_eq!(a.sub(&z).unwrap().unpack(), a.unpack());
}

#[test]
fn test_add_wide_gap() {
    // Trailing zeros make the gap between the exponents narrow enough.
    let a = Float::pack(&utils::pow10(60), 10).unwrap();
    let b = Float::pack(&utils::pow10(65), -60).unwrap();
    let expected = Float::pack(&(utils::pow10(65) + 1), 5).unwrap();
    assert_eq!(a.add(&b).unwrap(), expected);

    // The exact sum needs far more digits than the mantissa holds.
    let huge = parse("1e100");
    let tiny = parse("1e-100");
    let err = huge.add(&tiny).unwrap_err();
    assert_eq!(err, FloatError::Overflow);

    // Extreme exponents are still fine when the result is representable.
    let x = Float::max_positive_value();
    let sum = x.add(&Float::zero()).unwrap();
    assert_eq!(sum, x);
    assert_eq!(x.sub(&x).unwrap(), Float::zero());
}

#[test]
fn test_add_overflow() {
    let max = Float::max_positive_value();
    let err = max.add(&max).unwrap_err();
    assert_eq!(err, FloatError::Overflow);

    let min = Float::min_negative_value();
    let one = Float::pack(&num_bigint::BigInt::from(1), i32::MAX).unwrap();
    assert_eq!(min.sub(&one).unwrap_err(), FloatError::Overflow);
}

#[test]
fn test_mul() {
    let a = parse("3.14");
    let c = parse("2.0");
    assert_eq!(a.mul(&c).unwrap().format(), "6.28");
    assert_eq!(parse("-1.5").mul(&parse("-4")).unwrap().format(), "6");
    assert!(a.mul(&Float::zero()).unwrap().is_zero());

    let err = Float::max_positive_value().mul(&parse("10")).unwrap_err();
    assert_eq!(err, FloatError::Overflow);

    let tiny = Float::min_positive_value();
    assert_eq!(tiny.mul(&tiny).unwrap_err(), FloatError::Overflow);
}

#[test]
fn test_div() {
    let a = parse("3.14");
    let b = parse("-3.14");
    let c = parse("2.0");
    assert_eq!(a.div(&c).unwrap().format(), "1.57");
    assert_eq!(a.div(&b).unwrap().format(), "-1");
    assert_eq!(parse("6.28").div(&parse("2")).unwrap().unpack().1, -2);

    // An inexact quotient keeps 66 digits, truncated toward zero.
    let third = parse("1").div(&parse("3")).unwrap();
    let (m, e) = third.unpack();
    assert_eq!(m.to_string(), "3".repeat(66));
    assert_eq!(e, -66);

    let two_thirds = parse("-2").div(&parse("3")).unwrap();
    let expected = format!("-{}", "6".repeat(66));
    assert_eq!(two_thirds.get_mantissa().to_string(), expected);

    // Wide exact quotients are not truncated.
    let max = Float::pack(&super::float::max_mantissa(), 0).unwrap();
    assert_eq!(max.div(&parse("1")).unwrap(), max);

    assert!(Float::zero().div(&a).unwrap().is_zero());
}

#[test]
fn test_div_errors() {
    let a = parse("3.14");
    let err = a.div(&Float::zero()).unwrap_err();
    assert_eq!(err, FloatError::DivisionByZero);
    assert_eq!(
        Float::zero().div(&Float::zero()).unwrap_err(),
        FloatError::DivisionByZero
    );

    let tiny = Float::min_positive_value();
    let huge = Float::max_positive_value();
    assert_eq!(tiny.div(&huge).unwrap_err(), FloatError::Overflow);
}

#[test]
fn test_div_near_smallest_exponent() {
    use num_bigint::BigInt;

    // The quotient keeps the digits that are above 10^i32::MIN.
    let a = Float::pack(&BigInt::from(2), i32::MIN + 5).unwrap();
    let q = a.div(&parse("3")).unwrap();
    assert_eq!(q.unpack(), (BigInt::from(66666), i32::MIN));

    let a = Float::pack(&BigInt::from(-1), i32::MIN + 60).unwrap();
    let q = a.div(&parse("7")).unwrap();
    assert_eq!(q.get_exp(), i32::MIN);
    assert_eq!(q.get_mantissa().to_string().len(), 61);
    assert!(q.get_mantissa().to_string().starts_with("-142857"));

    let a = Float::pack(&BigInt::from(3), i32::MAX - 5).unwrap();
    let q = a.inv().unwrap();
    assert_eq!(q.unpack(), (BigInt::from(333333), i32::MIN));

    // Nothing is left above the smallest exponent.
    let a = Float::min_positive_value();
    assert_eq!(a.div(&parse("3")).unwrap_err(), FloatError::Overflow);
}

#[test]
fn test_neg_abs_inv() {
    let a = parse("3.14");
    let b = parse("-3.14");
    assert_eq!(b.abs().unwrap().format(), "3.14");
    assert_eq!(a.abs().unwrap().format(), "3.14");
    assert_eq!(a.neg().unwrap(), b);
    assert!(Float::zero().neg().unwrap().is_zero());

    let min = Float::pack(&super::float::min_mantissa(), 0).unwrap();
    assert_eq!(min.neg().unwrap_err(), FloatError::Overflow);
    assert_eq!(min.abs().unwrap_err(), FloatError::Overflow);

    assert_eq!(parse("2.0").inv().unwrap().format(), "0.5");
    assert_eq!(parse("-0.25").inv().unwrap().format(), "-4");
    assert_eq!(
        Float::zero().inv().unwrap_err(),
        FloatError::DivisionByZero
    );
}

#[test]
fn test_operators() {
    let a = parse("8");
    let b = parse("2");
    assert_eq!((&a + &b).unwrap().format(), "10");
    assert_eq!((&a - &b).unwrap().format(), "6");
    assert_eq!((&a * &b).unwrap().format(), "16");
    assert_eq!((&a / &b).unwrap().format(), "4");
    assert_eq!((-&a).unwrap().format(), "-8");
    assert_eq!((a.clone() + &b).unwrap().format(), "10");

    let c = ((a / b).unwrap() - parse("1")).unwrap();
    assert_eq!(c.format(), "3");
    assert_eq!((-c).unwrap().format(), "-3");
}
