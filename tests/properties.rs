use decfloat::{BigInt, Float, PACKED_BYTES};
use proptest::prelude::*;

/// Floats with a mantissa in the i32 range and a small exponent. Sums and
/// products of two of these always fit the mantissa.
fn small_float() -> impl Strategy<Value = Float> {
    (any::<i32>(), -20i32..20)
        .prop_map(|(m, e)| Float::pack(&BigInt::from(m), e).unwrap())
}

/// Floats whose pairwise sums overflow for large exponent gaps.
fn spread_float() -> impl Strategy<Value = Float> {
    (any::<i64>(), -60i32..60)
        .prop_map(|(m, e)| Float::pack(&BigInt::from(m), e).unwrap())
}

/// Returns true if the exact sum, stripped of trailing zeros, fits the
/// 224-bit mantissa.
fn exact_sum_fits(a: &Float, b: &Float) -> bool {
    let (am, ae) = a.unpack();
    let (bm, be) = b.unpack();
    let exp = ae.min(be);
    let ten = BigInt::from(10);
    let zero = BigInt::from(0);
    let mut sum =
        am * ten.pow((ae - exp) as u32) + bm * ten.pow((be - exp) as u32);
    if sum == zero {
        return true;
    }
    while &sum % &ten == zero {
        sum /= &ten;
    }
    let bound = BigInt::from(1) << 223;
    -&bound <= sum && sum < bound
}

/// Floats that cover the whole mantissa and exponent range.
fn wide_float() -> impl Strategy<Value = Float> {
    (prop::array::uniform28(any::<u8>()), any::<i32>()).prop_map(|(m, e)| {
        let mantissa = BigInt::from_signed_bytes_be(&m);
        Float::pack(&mantissa, e).unwrap()
    })
}

/// Values of the form ±2^i × 5^j × 10^k, which have exact inverses.
fn invertible_float() -> impl Strategy<Value = Float> {
    (0u32..20, 0u32..20, -10i32..10, any::<bool>()).prop_map(
        |(i, j, k, negative)| {
            let mut m = BigInt::from(2).pow(i) * BigInt::from(5).pow(j);
            if negative {
                m = -m;
            }
            Float::pack(&m, k).unwrap()
        },
    )
}

proptest! {
    #[test]
    fn pack_unpack_round_trip(m in any::<[u8; 28]>(), e in any::<i32>()) {
        let mantissa = BigInt::from_signed_bytes_be(&m);
        let x = Float::pack(&mantissa, e).unwrap();
        let expected = if mantissa == BigInt::from(0) {
            (mantissa, 0)
        } else {
            (mantissa, e)
        };
        prop_assert_eq!(x.unpack(), expected);
    }

    #[test]
    fn hex_round_trip(x in wide_float()) {
        let hex = x.as_hex();
        prop_assert_eq!(hex.len(), 2 + PACKED_BYTES * 2);
        let y = Float::from_hex(&hex).unwrap();
        prop_assert_eq!(x.unpack(), y.unpack());
    }

    #[test]
    fn parse_format_round_trip(x in wide_float()) {
        let y = Float::parse(&x.format()).unwrap();
        prop_assert_eq!(&x, &y);
        let z = Float::parse(&x.format_with_scientific(true)).unwrap();
        prop_assert_eq!(&x, &z);
    }

    #[test]
    fn parse_format_decimal_round_trip(x in small_float()) {
        let y = Float::parse(&x.format_with_scientific(false)).unwrap();
        prop_assert_eq!(x, y);
    }

    #[test]
    fn floor_plus_frac(x in small_float()) {
        let floor = x.floor();
        let frac = x.frac().unwrap();
        prop_assert!(floor.lte(&x));
        prop_assert!(!frac.is_negative());
        prop_assert!(frac.lt(&Float::one()));
        prop_assert_eq!(floor.add(&frac).unwrap(), x);
    }

    #[test]
    fn add_neg_is_zero(x in small_float()) {
        let sum = x.add(&x.neg().unwrap()).unwrap();
        prop_assert!(sum.is_zero());
        prop_assert_eq!(sum, Float::zero());
    }

    #[test]
    fn sub_is_add_neg(a in small_float(), b in small_float()) {
        let lhs = a.sub(&b).unwrap();
        let rhs = a.add(&b.neg().unwrap()).unwrap();
        prop_assert_eq!(lhs, rhs);
    }

    #[test]
    fn add_mul_commute(a in small_float(), b in small_float()) {
        prop_assert_eq!(a.add(&b).unwrap(), b.add(&a).unwrap());
        prop_assert_eq!(a.mul(&b).unwrap(), b.mul(&a).unwrap());
    }

    #[test]
    fn add_fails_only_when_exact_sum_overflows(
        a in spread_float(),
        b in spread_float(),
    ) {
        let fits = exact_sum_fits(&a, &b);
        prop_assert_eq!(a.add(&b).is_ok(), fits);
        prop_assert_eq!(b.add(&a).is_ok(), fits);
        if let Ok(sum) = a.add(&b) {
            prop_assert_eq!(sum.sub(&b).unwrap(), a);
        }
    }

    #[test]
    fn mul_then_div(a in small_float(), b in small_float()) {
        prop_assume!(!b.is_zero());
        let product = a.mul(&b).unwrap();
        prop_assert_eq!(product.div(&b).unwrap(), a);
    }

    #[test]
    fn inv_inv(x in invertible_float()) {
        let y = x.inv().unwrap().inv().unwrap();
        prop_assert_eq!(y, x);
    }

    #[test]
    fn order_matches_difference(a in small_float(), b in small_float()) {
        let diff = a.sub(&b).unwrap();
        let expected = diff.cmp(&Float::zero());
        prop_assert_eq!(a.cmp(&b), expected);
        prop_assert_eq!(a.lt(&b), b.gt(&a));
        prop_assert_eq!(a.lte(&b), b.gte(&a));
        prop_assert_eq!(a == b, diff.is_zero());
    }

    #[test]
    fn order_is_total(a in wide_float(), b in wide_float()) {
        let relations = [a.lt(&b), a == b, a.gt(&b)];
        prop_assert_eq!(relations.iter().filter(|r| **r).count(), 1);
        prop_assert_eq!(a.cmp(&b), b.cmp(&a).reverse());
    }

    #[test]
    fn min_max_pick_operands(a in wide_float(), b in wide_float()) {
        let min = a.clone().min(b.clone());
        let max = a.clone().max(b.clone());
        prop_assert!(min.lte(&max));
        prop_assert!(min == a || min == b);
        prop_assert!(max == a || max == b);
    }

    #[test]
    fn is_zero_matches_equality(x in wide_float()) {
        prop_assert_eq!(x.is_zero(), x == Float::zero());
    }

    #[test]
    fn fixed_decimal_lossy_flag(
        m in any::<i64>(),
        e in -30i32..5,
        decimals in 0u8..30,
    ) {
        let x = Float::pack(&BigInt::from(m), e).unwrap();
        let out = x.to_fixed_decimal_lossy(decimals);
        let back = Float::from_fixed_decimal(&out.value, decimals).unwrap();
        prop_assert_eq!(out.lossless, back == x);
        prop_assert_eq!(out.lossless, x.to_fixed_decimal(decimals).is_ok());
        // Truncation never moves away from zero.
        prop_assert!(back.abs().unwrap().lte(&x.abs().unwrap()));
    }
}
