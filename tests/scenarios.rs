use decfloat::{BigInt, ErrorKind, Float, FloatError, LossyConversion};

fn parse(text: &str) -> Float {
    Float::parse(text).unwrap()
}

#[test]
fn parse_and_pack_pi() {
    let x = parse("3.14");
    let hex = x.as_hex();
    // The exponent field holds -2, the mantissa field holds 314.
    assert_eq!(&hex[..10], "0xfffffffe");
    assert_eq!(&hex[10..], format!("{}13a", "0".repeat(53)));
    assert_eq!(x.unpack(), (BigInt::from(314), -2));
    assert_eq!(Float::from_hex(&hex).unwrap().unpack(), x.unpack());
}

#[test]
fn fixed_decimal_bridge() {
    let x = Float::from_fixed_decimal(&BigInt::from(12345), 2).unwrap();
    assert_eq!(x.format(), "123.45");
    let scaled = parse("123.45").to_fixed_decimal(2).unwrap();
    assert_eq!(scaled, BigInt::from(12345));
}

#[test]
fn scientific_thresholds() {
    assert_eq!(parse("0.00001").format(), "1e-5");
    assert_eq!(parse("0.0001").format(), "0.0001");
    assert_eq!(parse("1000000000").format(), "1000000000");
    assert_eq!(parse("1000000000.5").format(), "1.0000000005e9");
    assert_eq!(parse("-123450000000000").format(), "-1.2345e14");
}

#[test]
fn division() {
    let a = parse("3.14");
    let b = parse("-3.14");
    let c = parse("2.0");
    assert_eq!(a.div(&c).unwrap().format(), "1.57");
    assert_eq!(a.div(&b).unwrap().format(), "-1");
    assert_eq!(
        a.div(&Float::zero()).unwrap_err().kind(),
        ErrorKind::DivisionByZero
    );
}

#[test]
fn lossy_fixed_decimal() {
    let x = Float::from_fixed_decimal(&BigInt::from(12345), 3).unwrap();
    assert_eq!(
        x.to_fixed_decimal_lossy(2),
        LossyConversion::new(BigInt::from(1234), false)
    );

    let x = Float::from_fixed_decimal(&BigInt::from(12340), 3).unwrap();
    assert_eq!(
        x.to_fixed_decimal_lossy(2),
        LossyConversion::new(BigInt::from(1234), true)
    );
}

#[test]
fn constants() {
    let one = Float::one();
    let zero = Float::zero();
    assert!(Float::max_positive_value().gt(&one));
    assert!(Float::min_positive_value().gt(&zero));
    assert!(Float::min_positive_value().lt(&one));
    assert!(Float::max_negative_value().lt(&zero));
    assert!(Float::min_negative_value().lt(&Float::max_negative_value()));

    let values = [
        Float::max_positive_value(),
        Float::min_positive_value(),
        Float::max_negative_value(),
        Float::min_negative_value(),
    ];
    for (i, a) in values.iter().enumerate() {
        for (j, b) in values.iter().enumerate() {
            assert_eq!(i == j, a == b);
        }
    }
}

#[test]
fn arithmetic_vectors() {
    let a = parse("3.14");
    let b = parse("-3.14");
    let c = parse("2.0");
    assert_eq!(a.floor().format(), "3");
    assert_eq!(a.frac().unwrap().format(), "0.14");
    assert_eq!(c.inv().unwrap().format(), "0.5");
    assert_eq!(b.abs().unwrap().format(), "3.14");
    assert_eq!(a.sub(&b).unwrap().format(), "6.28");
    assert_eq!(a.mul(&c).unwrap().format(), "6.28");
    assert_eq!(a.add(&b).unwrap().format(), "0");
    assert_eq!(b.neg().unwrap().format(), "3.14");
    assert_eq!(b.floor().format(), "-4");
}

#[test]
fn comparisons() {
    let a = parse("1");
    let b = parse("2");
    assert!(a.lt(&b) && a.lte(&b) && b.gt(&a) && b.gte(&a));
    assert!(a.lte(&parse("1.000")) && a.gte(&parse("1.000")));
    assert_eq!(a, parse("1.0"));
    assert_eq!(a.clone().min(b.clone()).format(), "1");
    assert_eq!(a.max(b).format(), "2");
    assert!(parse("-0").is_zero());
}

#[test]
fn integer_bridge() {
    let x = Float::from_bigint(&BigInt::from(5)).unwrap();
    assert_eq!(x.as_hex(), format!("0x{}5", "0".repeat(63)));

    let hex = format!("0x{}1234", "0".repeat(60));
    let x = Float::from_hex(&hex).unwrap();
    assert_eq!(x.to_bigint(), BigInt::from(0x1234));

    let wide = BigInt::from(1) << 230;
    assert_eq!(
        Float::try_from(&wide).unwrap_err(),
        FloatError::OutOfRange
    );
    assert_eq!(
        parse("2.5").try_to_bigint().unwrap_err(),
        FloatError::PrecisionLoss
    );
}

#[test]
fn pack_lossless_matches_parse() {
    let x = Float::pack_lossless("314", -2).unwrap();
    assert_eq!(x.unpack(), parse("3.14").unpack());
    assert_eq!(x.as_hex(), parse("3.14").as_hex());
}

#[test]
fn format_variants() {
    let x = parse("2.5");
    assert_eq!(x.format(), "2.5");
    assert_eq!(x.format18(), "2.5");
    assert_eq!(x.format_with_scientific(true), "2.5e0");

    let min = parse("10");
    let max = parse("20");
    assert_eq!(x.format_with_range(&min, &max), "2.5e0");
    assert_eq!(parse("15").format_with_range(&min, &max), "15");
}

#[test]
fn error_reporting() {
    let err = Float::parse("1.2.3").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidSyntax);
    assert_eq!(err.kind().as_str(), "InvalidSyntax");

    let err = Float::from_hex("0x12").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::MalformedEncoding);

    let err = Float::max_positive_value()
        .add(&Float::max_positive_value())
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Overflow);
    let message = "arithmetic overflow: result is not representable";
    assert_eq!(err.to_string(), message);
}
