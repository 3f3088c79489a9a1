//! This module contains the implementation of string conversion: the decimal
//! parser and the decimal/scientific formatter.

use super::error::{FloatError, Result};
use super::float::Float;
use super::utils;
use core::cmp::Ordering;
use core::fmt::{Display, LowerExp};
use core::str::FromStr;
use num_bigint::BigInt;
use num_traits::{Signed, Zero};

/// Controls when [`Float::format_with_options`] switches to scientific
/// notation. Values whose magnitude is between `scientific_min` and
/// `scientific_max`, inclusive, are printed in decimal notation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatOptions {
    pub scientific_min: Float,
    pub scientific_max: Float,
}

impl FormatOptions {
    pub fn new(scientific_min: Float, scientific_max: Float) -> Self {
        FormatOptions {
            scientific_min,
            scientific_max,
        }
    }
}

impl Default for FormatOptions {
    fn default() -> Self {
        Self::new(
            Float::format_default_scientific_min(),
            Float::format_default_scientific_max(),
        )
    }
}

/// Parse an optionally negated run of decimal digits.
pub(crate) fn parse_integer(text: &str) -> Result<BigInt> {
    let digits = text.strip_prefix('-').unwrap_or(text);
    if digits.is_empty() || !digits.bytes().all(|c| c.is_ascii_digit()) {
        return Err(FloatError::invalid_syntax(text));
    }
    let num = BigInt::parse_bytes(digits.as_bytes(), 10)
        .ok_or_else(|| FloatError::invalid_syntax(text))?;
    Ok(if digits.len() == text.len() { num } else { -num })
}

fn is_digits(text: &str) -> bool {
    text.bytes().all(|c| c.is_ascii_digit())
}

impl Float {
    /// Parse the decimal literal `text`. The accepted grammar is an optional
    /// `-`, digits with an optional `.` and fraction, and an optional
    /// exponent suffix made of `e` or `E`, an optional `-` and digits.
    /// Example: "-3.14", "0.5", "1e-5", "-1.2345e14".
    pub fn parse(text: &str) -> Result<Self> {
        let err = || FloatError::invalid_syntax(text);

        let (negative, body) = match text.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, text),
        };

        // Split the number to the digits and the exponent.
        let (number, suffix) = match body.find(|c| c == 'e' || c == 'E') {
            Some(idx) => (&body[..idx], Some(&body[idx + 1..])),
            None => (body, None),
        };

        let (int_part, frac_part) =
            number.split_once('.').unwrap_or((number, ""));
        if int_part.is_empty() && frac_part.is_empty() {
            return Err(err());
        }
        if !is_digits(int_part) || !is_digits(frac_part) {
            return Err(err());
        }

        let explicit_exp = match suffix {
            None => None,
            Some(exp) => {
                let digits = exp.strip_prefix('-').unwrap_or(exp);
                if digits.is_empty() || !is_digits(digits) {
                    return Err(err());
                }
                Some(exp)
            }
        };

        let mut digits = String::with_capacity(number.len());
        digits.push_str(int_part);
        digits.push_str(frac_part);
        let mut mantissa =
            BigInt::parse_bytes(digits.as_bytes(), 10).ok_or_else(err)?;
        if mantissa.is_zero() {
            return Ok(Self::zero());
        }
        if negative {
            mantissa = -mantissa;
        }

        let shift = match explicit_exp {
            None => 0,
            Some(exp) => exp.parse::<i64>().map_err(|_| {
                tracing::debug!(input = text, "exponent suffix is too wide");
                FloatError::OutOfRange
            })?,
        };
        let exp = shift
            .checked_sub(frac_part.len() as i64)
            .ok_or(FloatError::OutOfRange)?;

        Self::from_exact(mantissa, exp).ok_or_else(|| {
            tracing::debug!(input = text, "literal exceeds the packed width");
            FloatError::OutOfRange
        })
    }

    /// Format the number in decimal notation when its magnitude is within
    /// the default thresholds (1e-4 to 1e9), and in scientific notation
    /// otherwise.
    pub fn format(&self) -> String {
        self.format_with_options(&FormatOptions::default())
    }

    /// Format the number, forcing scientific notation when `scientific` is
    /// set, and decimal notation otherwise.
    pub fn format_with_scientific(&self, scientific: bool) -> String {
        if scientific {
            self.render_scientific()
        } else {
            self.render_decimal()
        }
    }

    /// Format the number using the magnitude thresholds `min` and `max`.
    pub fn format_with_range(&self, min: &Float, max: &Float) -> String {
        if self.is_zero() {
            return "0".to_string();
        }
        let above_min = self.cmp_magnitude(min) != Ordering::Less;
        let below_max = self.cmp_magnitude(max) != Ordering::Greater;
        self.format_with_scientific(!(above_min && below_max))
    }

    pub fn format_with_options(&self, options: &FormatOptions) -> String {
        self.format_with_range(&options.scientific_min, &options.scientific_max)
    }

    /// Format the number in decimal notation, truncating the fraction toward
    /// zero to at most `decimals` digits.
    pub fn format_truncated(&self, decimals: u8) -> String {
        let (mut mantissa, mut exp) = utils::strip_trailing_zeros(
            self.get_mantissa().clone(),
            self.get_exp() as i64,
        );
        let limit = -(decimals as i64);
        if exp < limit {
            let digits = utils::count_digits(&mantissa);
            match u32::try_from(limit - exp) {
                Ok(drop) if (drop as u64) < digits => {
                    mantissa /= utils::pow10(drop);
                }
                _ => return "0".to_string(),
            }
            exp = limit;
        }
        render_decimal_parts(mantissa, exp)
    }

    /// Format the number with at most 18 fractional digits.
    pub fn format18(&self) -> String {
        self.format_truncated(18)
    }

    fn render_decimal(&self) -> String {
        render_decimal_parts(self.get_mantissa().clone(), self.get_exp() as i64)
    }

    fn render_scientific(&self) -> String {
        if self.is_zero() {
            return "0e0".to_string();
        }
        let (mantissa, exp) = utils::strip_trailing_zeros(
            self.get_mantissa().clone(),
            self.get_exp() as i64,
        );
        let digits = mantissa.abs().to_string();
        let adjusted = exp + digits.len() as i64 - 1;

        let mut result = String::with_capacity(digits.len() + 16);
        if mantissa.is_negative() {
            result.push('-');
        }
        let (lead, rest) = digits.split_at(1);
        result.push_str(lead);
        if !rest.is_empty() {
            result.push('.');
            result.push_str(rest);
        }
        result.push('e');
        result.push_str(&adjusted.to_string());
        result
    }
}

/// Render `mantissa × 10^exp` in decimal notation, without trailing
/// fractional zeros.
fn render_decimal_parts(mantissa: BigInt, exp: i64) -> String {
    let (mantissa, exp) = utils::strip_trailing_zeros(mantissa, exp);
    if mantissa.is_zero() {
        return "0".to_string();
    }

    let mut result = String::new();
    if mantissa.is_negative() {
        result.push('-');
    }
    let digits = mantissa.abs().to_string();

    if exp >= 0 {
        result.push_str(&digits);
        result.extend(core::iter::repeat('0').take(exp as usize));
        return result;
    }

    let scale = (-exp) as usize;
    if digits.len() > scale {
        let (int_part, frac_part) = digits.split_at(digits.len() - scale);
        result.push_str(int_part);
        result.push('.');
        result.push_str(frac_part);
    } else {
        // Add the leading zeros after the point.
        result.push_str("0.");
        result.extend(core::iter::repeat('0').take(scale - digits.len()));
        result.push_str(&digits);
    }
    result
}

impl Display for Float {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.format())
    }
}

impl LowerExp for Float {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.format_with_scientific(true))
    }
}

impl FromStr for Float {
    type Err = FloatError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

#[test]
fn test_parse_basic() {
    let x = Float::parse("3.14").unwrap();
    assert_eq!(x.unpack(), (BigInt::from(314), -2));

    let x = Float::parse("-0.25").unwrap();
    assert_eq!(x.unpack(), (BigInt::from(-25), -2));

    let x = Float::parse("3.140").unwrap();
    assert_eq!(x.unpack(), (BigInt::from(3140), -3));

    let x = Float::parse("42").unwrap();
    assert_eq!(x.unpack(), (BigInt::from(42), 0));

    let x = Float::parse(".5").unwrap();
    assert_eq!(x.unpack(), (BigInt::from(5), -1));

    let x = Float::parse("5.").unwrap();
    assert_eq!(x.unpack(), (BigInt::from(5), 0));

    let x = Float::parse("-0.000").unwrap();
    assert_eq!(x.unpack(), (BigInt::from(0), 0));
}

#[test]
fn test_parse_scientific_suffix() {
    let x = Float::parse("1e-5").unwrap();
    assert_eq!(x.unpack(), (BigInt::from(1), -5));

    let x = Float::parse("-1.2345e14").unwrap();
    assert_eq!(x.unpack(), (BigInt::from(-12345), 10));

    let x = Float::parse("2E3").unwrap();
    assert_eq!(x.unpack(), (BigInt::from(2), 3));

    let x = Float::parse("0e99999999999999999999").unwrap();
    assert!(x.is_zero());
}

#[test]
fn test_parse_invalid() {
    let bad = [
        "", "-", ".", "-.", "+1", " 1", "1 ", "1.2.3", "abc", "1,5", "1e",
        "1e+5", "e5", "1e5e5", "1e-", "--1", "0x10", "1_000",
    ];
    for text in bad {
        let err = Float::parse(text).unwrap_err();
        assert_eq!(err.kind(), crate::ErrorKind::InvalidSyntax, "{:?}", text);
    }
}

#[test]
fn test_parse_bounds() {
    // Trailing zeros move into the exponent.
    let text = format!("1{}", "0".repeat(80));
    let x = Float::parse(&text).unwrap();
    assert_eq!(x.unpack(), (BigInt::from(1), 80));

    // Too many significant digits.
    let text = format!("1{}1", "0".repeat(80));
    let err = Float::parse(&text).unwrap_err();
    assert_eq!(err, FloatError::OutOfRange);

    let err = Float::parse("1e99999999999").unwrap_err();
    assert_eq!(err, FloatError::OutOfRange);
}

#[test]
fn test_parse_integer() {
    assert_eq!(parse_integer("314").unwrap(), BigInt::from(314));
    assert_eq!(parse_integer("-7").unwrap(), BigInt::from(-7));
    assert!(parse_integer("").is_err());
    assert!(parse_integer("-").is_err());
    assert!(parse_integer("3.14").is_err());
    assert!(parse_integer("+3").is_err());
}

#[test]
fn test_format_decimal() {
    let cases = [
        ("3.14", "3.14"),
        ("3.140", "3.14"),
        ("-0.25", "-0.25"),
        ("2.0", "2"),
        ("0.0001", "0.0001"),
        ("1000000000", "1000000000"),
        ("123.45", "123.45"),
        ("-987654321.5", "-987654321.5"),
        ("0", "0"),
        ("-0", "0"),
    ];
    for (input, expected) in cases {
        assert_eq!(Float::parse(input).unwrap().format(), expected);
    }
}

#[test]
fn test_format_scientific() {
    let cases = [
        ("0.00001", "1e-5"),
        ("0.000012", "1.2e-5"),
        ("1000000001", "1.000000001e9"),
        ("-123450000000000", "-1.2345e14"),
        ("1e-30", "1e-30"),
        ("-4.2e17", "-4.2e17"),
    ];
    for (input, expected) in cases {
        assert_eq!(Float::parse(input).unwrap().format(), expected);
    }

    assert_eq!(Float::zero().format_with_scientific(true), "0e0");
    let x = Float::parse("3.14").unwrap();
    assert_eq!(x.format_with_scientific(true), "3.14e0");
    assert_eq!(format!("{:e}", x), "3.14e0");
    let x = Float::parse("1e-5").unwrap();
    assert_eq!(x.format_with_scientific(false), "0.00001");
    let x = Float::parse("1.5e3").unwrap();
    assert_eq!(x.format_with_scientific(false), "1500");
}

#[test]
fn test_format_with_range() {
    let min = Float::parse("1").unwrap();
    let max = Float::parse("100").unwrap();
    let fmt = |s: &str| Float::parse(s).unwrap().format_with_range(&min, &max);
    assert_eq!(fmt("1"), "1");
    assert_eq!(fmt("100"), "100");
    assert_eq!(fmt("-50"), "-50");
    assert_eq!(fmt("0.5"), "5e-1");
    assert_eq!(fmt("101"), "1.01e2");
    assert_eq!(fmt("0"), "0");

    let options = FormatOptions::new(min.clone(), max.clone());
    let x = Float::parse("250").unwrap();
    assert_eq!(x.format_with_options(&options), "2.5e2");
    assert_eq!(FormatOptions::default().scientific_min.format(), "0.0001");
}

#[test]
fn test_format_truncated() {
    let x = Float::parse("2.5").unwrap();
    assert_eq!(x.format18(), "2.5");

    let x = Float::parse("1.23456789").unwrap();
    assert_eq!(x.format_truncated(4), "1.2345");
    assert_eq!(x.format_truncated(0), "1");

    let x = Float::parse("-1.99").unwrap();
    assert_eq!(x.format_truncated(1), "-1.9");

    let x = Float::parse("-0.00001").unwrap();
    assert_eq!(x.format_truncated(3), "0");

    let x = Float::parse("1e-20").unwrap();
    assert_eq!(x.format18(), "0");

    let x = Float::parse("1e12").unwrap();
    assert_eq!(x.format18(), "1000000000000");

    let x = Float::pack(&BigInt::from(-7), i32::MIN).unwrap();
    assert_eq!(x.format_truncated(u8::MAX), "0");
}

#[test]
fn test_round_trip_special_values() {
    for text in utils::get_special_test_values() {
        let x: Float = text.parse().unwrap();
        let y = Float::parse(&x.to_string()).unwrap();
        assert_eq!(x, y, "{}", text);
        let z = Float::parse(&x.format_with_scientific(true)).unwrap();
        assert_eq!(x, z, "{}", text);
    }
}
