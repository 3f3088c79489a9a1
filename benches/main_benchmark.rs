use decfloat::{BigInt, Float};

fn test_parse_format() {
    for text in ["3.14", "-987654321.123456789", "1e-30", "0.00001"] {
        let x = Float::parse(text).unwrap();
        black_box(x.format());
    }
}

fn test_add_aligned() {
    let a = Float::parse("123456789.123456789").unwrap();
    let b = Float::parse("-0.000000000000000000000000000001").unwrap();
    for _ in 0..100 {
        black_box(a.add(&b).unwrap());
    }
}

fn test_mul() {
    let a = Float::parse("1.000000000000000000000000000001").unwrap();
    let mut x = Float::one();
    for _ in 0..2 {
        x = x.mul(&a).unwrap();
    }
    black_box(x);
}

fn test_div() {
    let three = Float::from(3u32);
    for i in 1..100u32 {
        black_box(Float::from(i).div(&three).unwrap());
    }
}

fn test_hex_round_trip() {
    let x = Float::max_positive_value();
    for _ in 0..100 {
        let hex = x.as_hex();
        black_box(Float::from_hex(&hex).unwrap());
    }
}

fn test_fixed_decimal() {
    let scaled = BigInt::from(123456789012345678u64);
    for _ in 0..100 {
        let x = Float::from_fixed_decimal(&scaled, 18).unwrap();
        black_box(x.to_fixed_decimal_lossy(6));
    }
}

fn test_sort() {
    let mut values: Vec<Float> = (0..200i64)
        .map(|i| {
            let mantissa = BigInt::from(i * 7919 % 211 - 100);
            Float::pack(&mantissa, -(i as i32 % 9)).unwrap()
        })
        .collect();
    values.sort();
    black_box(values);
}

use criterion::{black_box, criterion_group, criterion_main, Criterion};

pub fn criterion_benchmark(c: &mut Criterion) {
    c.bench_function("test_parse_format", |b| b.iter(test_parse_format));
    c.bench_function("test_add_aligned", |b| b.iter(test_add_aligned));
    c.bench_function("test_mul", |b| b.iter(test_mul));
    c.bench_function("test_div", |b| b.iter(test_div));
    c.bench_function("test_hex_round_trip", |b| b.iter(test_hex_round_trip));
    c.bench_function("test_fixed_decimal", |b| b.iter(test_fixed_decimal));
    c.bench_function("test_sort", |b| b.iter(test_sort));
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
