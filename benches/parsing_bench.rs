use criterion::{black_box, criterion_group, criterion_main, Criterion};

use phonecheck::PhoneNumberUtil;

/// (input, default region) pairs covering the main parsing paths.
fn setup_parsing_data() -> Vec<(&'static str, &'static str)> {
    vec![
        // IDD from a region with a complex international prefix and an extension
        ("0011 44 20 8366 1177 ext. 1234", "AU"),
        // National format
        ("(201) 555-0123", "US"),
        // International format with a plus sign
        ("+44 20 8366 1177", "GB"),
        // National prefix
        ("020 8366 1177", "GB"),
        // Carrier code and national prefix transform
        ("0 12 11 96123 4567", "BR"),
        // Significant leading zero
        ("02 1234 5678", "IT"),
        // Vanity number
        ("1-800-SIX-FLAG", "US"),
        // Local-only number
        ("12345", "DE"),
        // Region inferred from a global network calling code
        ("+800 1234 5678", "ZZ"),
    ]
}

fn parsing_benchmark(c: &mut Criterion) {
    let _ = env_logger::builder().is_test(true).try_init();
    let phone_util = PhoneNumberUtil::new().expect("compiled metadata should be valid");
    let numbers_to_parse = setup_parsing_data();

    let mut group = c.benchmark_group("Parsing");

    group.bench_function("parse()", |b| {
        b.iter(|| {
            for (number_str, region) in &numbers_to_parse {
                let _ = phone_util.parse(black_box(number_str), black_box(region));
            }
        })
    });

    group.bench_function("parse_and_keep_raw_input()", |b| {
        b.iter(|| {
            for (number_str, region) in &numbers_to_parse {
                let _ = phone_util.parse_and_keep_raw_input(black_box(number_str), black_box(region));
            }
        })
    });

    let parsed: Vec<_> = numbers_to_parse
        .iter()
        .filter_map(|(number_str, region)| phone_util.parse(number_str, region).ok())
        .collect();

    group.bench_function("is_valid_number()", |b| {
        b.iter(|| {
            for number in &parsed {
                black_box(phone_util.is_valid_number(black_box(number)));
            }
        })
    });

    group.bench_function("get_region_code_for_number()", |b| {
        b.iter(|| {
            for number in &parsed {
                let _ = black_box(phone_util.get_region_code_for_number(black_box(number)));
            }
        })
    });

    group.finish();
}

criterion_group!(benches, parsing_benchmark);
criterion_main!(benches);
