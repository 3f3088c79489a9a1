use super::error::{FloatError, Result};
use super::utils;
use core::cmp::Ordering;
use num_bigint::{BigInt, Sign};
use num_traits::{One, Signed, Zero};

/// The width of the mantissa field of the packed word, in bits.
pub const MANTISSA_BITS: usize = 224;
/// The width of the exponent field of the packed word, in bits.
pub const EXPONENT_BITS: usize = 32;
/// The size of the packed word, in bytes.
pub const PACKED_BYTES: usize = (MANTISSA_BITS + EXPONENT_BITS) / 8;

/// The number of decimal digits in the widest mantissa (2^223).
pub(crate) const MANTISSA_DIGITS: u64 = 68;

/// Returns the largest mantissa, 2^223 - 1.
pub(crate) fn max_mantissa() -> BigInt {
    (BigInt::one() << (MANTISSA_BITS - 1)) - 1
}

/// Returns the smallest mantissa, -2^223.
pub(crate) fn min_mantissa() -> BigInt {
    -(BigInt::one() << (MANTISSA_BITS - 1))
}

/// Returns true if `mantissa` fits the two's complement mantissa field.
pub(crate) fn fits_mantissa(mantissa: &BigInt) -> bool {
    let limit = (MANTISSA_BITS - 1) as u64;
    match mantissa.sign() {
        Sign::Minus => (mantissa.magnitude().clone() - 1u32).bits() <= limit,
        _ => mantissa.bits() <= limit,
    }
}

/// This is the main data structure of this library. It represents the
/// base-10 number `mantissa × 10^exponent`, where the mantissa is a signed
/// 224-bit integer and the exponent is a signed 32-bit integer. The
/// representation is not normalized (3.14 and 3.140 have different
/// mantissas), except for zero, which always has a zero exponent.
#[derive(Debug, Clone)]
pub struct Float {
    // The signed significand, within [-2^223, 2^223 - 1].
    mantissa: BigInt,
    // The base-10 exponent.
    exp: i32,
}

impl Float {
    /// Create a new float from a mantissa that is known to be in range.
    pub(crate) fn raw(mantissa: BigInt, exp: i32) -> Self {
        debug_assert!(fits_mantissa(&mantissa), "mantissa out of range");
        if mantissa.is_zero() {
            return Self::zero();
        }
        Float { mantissa, exp }
    }

    /// Create a new float from the mantissa `mantissa` and the exponent
    /// `exp`. Fails with `OutOfRange` if the mantissa does not fit the
    /// packed field. A zero mantissa produces the canonical zero.
    pub fn new(mantissa: BigInt, exp: i32) -> Result<Self> {
        if !fits_mantissa(&mantissa) {
            tracing::debug!(%mantissa, exp, "mantissa exceeds the field");
            return Err(FloatError::OutOfRange);
        }
        Ok(Self::raw(mantissa, exp))
    }

    /// Create a float with the exact value `mantissa × 10^exp`. A value that
    /// is in range is kept as is. Otherwise all of the trailing zeros of the
    /// mantissa are moved into the exponent, and an exponent that is still
    /// too large is moved back into the mantissa. Returns None if no exact
    /// representation exists.
    pub(crate) fn from_exact(mantissa: BigInt, exp: i64) -> Option<Self> {
        if mantissa.is_zero() {
            return Some(Self::zero());
        }

        let in_range = i32::MIN as i64 <= exp && exp <= i32::MAX as i64;
        if in_range && fits_mantissa(&mantissa) {
            return Some(Float {
                mantissa,
                exp: exp as i32,
            });
        }

        let (mut mantissa, mut exp) =
            utils::strip_trailing_zeros(mantissa, exp);
        if !fits_mantissa(&mantissa) || exp < i32::MIN as i64 {
            return None;
        }

        // Lower a large exponent by growing the mantissa.
        let ten = BigInt::from(10u32);
        while exp > i32::MAX as i64 {
            mantissa *= &ten;
            exp -= 1;
            if !fits_mantissa(&mantissa) {
                return None;
            }
        }

        Some(Float {
            mantissa,
            exp: exp as i32,
        })
    }

    /// Returns a new zero float.
    pub fn zero() -> Self {
        Float {
            mantissa: BigInt::zero(),
            exp: 0,
        }
    }

    /// Returns a new float with the value one.
    pub fn one() -> Self {
        Float {
            mantissa: BigInt::one(),
            exp: 0,
        }
    }

    /// Returns true if the Float is zero.
    pub fn is_zero(&self) -> bool {
        self.mantissa.is_zero()
    }

    /// Returns true if the Float is negative.
    pub fn is_negative(&self) -> bool {
        self.mantissa.is_negative()
    }

    /// Returns true if the Float is an integer (no fractional part).
    pub fn is_integer(&self) -> bool {
        if self.exp >= 0 || self.is_zero() {
            return true;
        }
        let shift = self.exp.unsigned_abs();
        if shift as u64 >= utils::count_digits(&self.mantissa) {
            return false;
        }
        (&self.mantissa % utils::pow10(shift)).is_zero()
    }

    /// Returns the mantissa of the float.
    pub fn get_mantissa(&self) -> &BigInt {
        &self.mantissa
    }

    /// Returns the exponent of the float.
    pub fn get_exp(&self) -> i32 {
        self.exp
    }

    /// Returns the exponent of the leading digit, the value `e` such that
    /// 10^e <= |self| < 10^(e + 1). Zero returns 0.
    pub(crate) fn adjusted_exp(&self) -> i64 {
        if self.is_zero() {
            return 0;
        }
        self.exp as i64 + utils::count_digits(&self.mantissa) as i64 - 1
    }
}

/// Rescale the parts (am, ae) and (bm, be) to the smaller of the two
/// exponents by multiplying the other mantissa by a power of ten. Returns
/// the rescaled mantissas and the common exponent.
pub(crate) fn align_parts(
    am: BigInt,
    ae: i64,
    bm: BigInt,
    be: i64,
) -> (BigInt, BigInt, i64) {
    // Callers keep the gap within MANTISSA_DIGITS.
    let gap = ae.abs_diff(be);
    debug_assert!(gap <= MANTISSA_DIGITS, "alignment gap is too wide");
    let scale = utils::pow10(gap as u32);
    match ae.cmp(&be) {
        Ordering::Equal => (am, bm, ae),
        Ordering::Greater => (am * scale, bm, be),
        Ordering::Less => (am, bm * scale, ae),
    }
}

/// Align `a` and `b` to a common exponent (the smaller of the two). Gaps
/// that are wider than the mantissa are retried on the operands with their
/// trailing zeros removed. Returns None when the gap is still too wide, which
/// means that no sum of the operands fits the mantissa.
pub(crate) fn align(a: &Float, b: &Float) -> Option<(BigInt, BigInt, i64)> {
    if a.is_zero() {
        return Some((BigInt::zero(), b.mantissa.clone(), b.exp as i64));
    }
    if b.is_zero() {
        return Some((a.mantissa.clone(), BigInt::zero(), a.exp as i64));
    }

    let (ae, be) = (a.exp as i64, b.exp as i64);
    if (ae - be).unsigned_abs() <= MANTISSA_DIGITS {
        let (am, bm) = (a.mantissa.clone(), b.mantissa.clone());
        return Some(align_parts(am, ae, bm, be));
    }

    let (am, ae) = utils::strip_trailing_zeros(a.mantissa.clone(), ae);
    let (bm, be) = utils::strip_trailing_zeros(b.mantissa.clone(), be);
    if (ae - be).unsigned_abs() > MANTISSA_DIGITS {
        return None;
    }
    Some(align_parts(am, ae, bm, be))
}

impl Float {
    /// Compare the absolute values of `self` and `other`.
    pub(crate) fn cmp_magnitude(&self, other: &Self) -> Ordering {
        match (self.is_zero(), other.is_zero()) {
            (true, true) => return Ordering::Equal,
            (true, false) => return Ordering::Less,
            (false, true) => return Ordering::Greater,
            (false, false) => {}
        }

        let by_exp = self.adjusted_exp().cmp(&other.adjusted_exp());
        if by_exp != Ordering::Equal {
            return by_exp;
        }

        // Equal leading-digit exponents keep the gap below MANTISSA_DIGITS.
        let (a, b, _) = align_parts(
            self.mantissa.abs(),
            self.exp as i64,
            other.mantissa.abs(),
            other.exp as i64,
        );
        a.cmp(&b)
    }

    /// Returns true if `self` is less than `other`.
    pub fn lt(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Less
    }

    /// Returns true if `self` is less than or equal to `other`.
    pub fn lte(&self, other: &Self) -> bool {
        self.cmp(other) != Ordering::Greater
    }

    /// Returns true if `self` is greater than `other`.
    pub fn gt(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Greater
    }

    /// Returns true if `self` is greater than or equal to `other`.
    pub fn gte(&self, other: &Self) -> bool {
        self.cmp(other) != Ordering::Less
    }

    /// Returns the smaller operand, unchanged. Returns `self` on a tie.
    pub fn min(self, other: Self) -> Self {
        if other.lt(&self) {
            other
        } else {
            self
        }
    }

    /// Returns the larger operand, unchanged. Returns `self` on a tie.
    pub fn max(self, other: Self) -> Self {
        if other.gt(&self) {
            other
        } else {
            self
        }
    }
}

impl PartialEq for Float {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Float {}

impl PartialOrd for Float {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Values are ordered by sign, then by the position of the leading digit,
/// and finally by the mantissas rescaled to a common exponent.
impl Ord for Float {
    fn cmp(&self, other: &Self) -> Ordering {
        let sign = self.mantissa.sign();
        let other_sign = other.mantissa.sign();
        if sign != other_sign {
            return sign.cmp(&other_sign);
        }
        match sign {
            Sign::Minus => other.cmp_magnitude(self),
            _ => self.cmp_magnitude(other),
        }
    }
}

#[test]
fn test_mantissa_bounds() {
    assert!(fits_mantissa(&max_mantissa()));
    assert!(fits_mantissa(&min_mantissa()));
    assert!(!fits_mantissa(&(max_mantissa() + 1)));
    assert!(!fits_mantissa(&(min_mantissa() - 1)));
    assert!(fits_mantissa(&BigInt::zero()));
    assert!(fits_mantissa(&BigInt::from(-1)));
    assert_eq!(PACKED_BYTES, 32);
}

#[test]
fn test_new_canonical_zero() {
    let z = Float::new(BigInt::zero(), 17).unwrap();
    assert!(z.is_zero());
    assert_eq!(z.get_exp(), 0);

    let err = Float::new(max_mantissa() + 1, 0).unwrap_err();
    assert_eq!(err, FloatError::OutOfRange);
}

#[test]
fn test_from_exact_reduces() {
    // 10^70 does not fit, but 1 × 10^70 does.
    let x = Float::from_exact(utils::pow10(70), 0).unwrap();
    assert_eq!(x.get_mantissa(), &BigInt::one());
    assert_eq!(x.get_exp(), 70);

    // An exponent past i32::MAX moves into the mantissa.
    let x = Float::from_exact(BigInt::from(5), i32::MAX as i64 + 2).unwrap();
    assert_eq!(x.get_mantissa(), &BigInt::from(500));
    assert_eq!(x.get_exp(), i32::MAX);

    // An exponent below i32::MIN drops trailing zeros.
    let x = Float::from_exact(BigInt::from(-700), i32::MIN as i64 - 2);
    let x = x.unwrap();
    assert_eq!(x.get_mantissa(), &BigInt::from(-7));
    assert_eq!(x.get_exp(), i32::MIN);

    // Every trailing zero moves, even past the point where the mantissa
    // would fit.
    let x = Float::from_exact(utils::pow10(80) * 7, -5).unwrap();
    assert_eq!(x.unpack(), (BigInt::from(7), 75));

    // Stripping past i32::MAX is undone by growing the mantissa.
    let x = Float::from_exact(utils::pow10(70), i32::MAX as i64 - 5);
    let x = x.unwrap();
    assert_eq!(x.get_mantissa(), &utils::pow10(65));
    assert_eq!(x.get_exp(), i32::MAX);

    // No exact representation.
    assert!(Float::from_exact(max_mantissa() + 1, 0).is_none());
    assert!(Float::from_exact(BigInt::from(3), i32::MIN as i64 - 1).is_none());
    assert!(Float::from_exact(max_mantissa(), i32::MAX as i64 + 1).is_none());
}

#[test]
fn test_is_integer() {
    assert!(Float::new(BigInt::from(300), -2).unwrap().is_integer());
    assert!(!Float::new(BigInt::from(314), -2).unwrap().is_integer());
    assert!(!Float::new(BigInt::from(5), -9).unwrap().is_integer());
    assert!(Float::new(BigInt::from(5), 9).unwrap().is_integer());
    assert!(Float::zero().is_integer());
}

#[test]
fn test_comparisons() {
    let a = Float::new(BigInt::from(1), 0).unwrap();
    let b = Float::new(BigInt::from(2), 0).unwrap();
    let c = Float::new(BigInt::from(100), -2).unwrap();
    let neg = Float::new(BigInt::from(-314), -2).unwrap();
    let tiny = Float::new(BigInt::from(1), i32::MIN).unwrap();
    let huge = Float::new(BigInt::from(1), i32::MAX).unwrap();

    assert!(a.lt(&b));
    assert!(a.lte(&b));
    assert!(a.lte(&c));
    assert!(b.gt(&a));
    assert!(b.gte(&a));
    assert!(c.gte(&a));
    assert_eq!(a, c);
    assert!(neg < Float::zero());
    assert!(neg < tiny);
    assert!(tiny > Float::zero());
    assert!(tiny < a);
    assert!(huge > b);
    assert!(huge.clone().neg().unwrap() < neg);

    assert_eq!(a.clone().max(b.clone()), b);
    assert_eq!(a.clone().min(b.clone()), a);
}

#[test]
fn test_total_order() {
    let values: Vec<Float> = utils::get_special_test_values()
        .iter()
        .map(|s| Float::parse(s).unwrap())
        .collect();

    for a in &values {
        for b in &values {
            let lt = a.lt(b);
            let eq = a == b;
            let gt = a.gt(b);
            // Exactly one relation holds.
            assert_eq!(1, lt as u8 + eq as u8 + gt as u8, "{} vs {}", a, b);
            assert_eq!(lt, b.gt(a));
        }
    }
}

#[test]
fn test_min_max_tie_keeps_representation() {
    let a = Float::new(BigInt::from(20), -1).unwrap();
    let b = Float::new(BigInt::from(2), 0).unwrap();
    let m = a.clone().min(b.clone());
    assert_eq!(m.get_exp(), -1);
    let m = a.max(b);
    assert_eq!(m.get_exp(), -1);
}

#[test]
fn test_float_is_send_sync() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Float>();
    assert_send_sync::<FloatError>();
}
