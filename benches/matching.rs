//! Compile and match benchmarks over representative pattern shapes.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use renfa::Regex;

/// (name, pattern, input that must be accepted)
const CASES: &[(&str, &str, &str)] = &[
    ("literal", "Hello, world!", "Hello, world!"),
    ("class_plus", "[abc]+", "aabbabc"),
    ("url", "https?://\\w+(\\.\\w+)+", "http://news.example.net"),
    (
        "octet",
        "[0-9]|[1-9][0-9]|1[0-9][0-9]|2[0-4][0-9]|25[0-5]",
        "209",
    ),
    (
        "email",
        "[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\\.[A-Za-z][A-Za-z]+",
        "charlie.brown@peanuts.com",
    ),
    (
        "ipv4",
        "(25[0-5]|2[0-4][0-9]|[01]?[0-9][0-9]?)(\\.(25[0-5]|2[0-4][0-9]|[01]?[0-9][0-9]?)){3}",
        "127.167.178.11",
    ),
];

fn bench_accept(c: &mut Criterion) {
    let mut group = c.benchmark_group("accept");
    for (name, pattern, input) in CASES {
        let regex = Regex::compile(pattern).unwrap();
        assert!(regex.accept(input), "{name} must accept its input");
        group.bench_function(*name, |b| b.iter(|| regex.accept(black_box(input))));
    }
    group.finish();
}

fn bench_compile(c: &mut Criterion) {
    let mut group = c.benchmark_group("compile");
    for (name, pattern, _) in CASES {
        group.bench_function(*name, |b| {
            b.iter(|| Regex::compile(black_box(pattern)).unwrap())
        });
    }
    group.finish();
}

fn bench_long_input(c: &mut Criterion) {
    let regex = Regex::compile("(ab)+").unwrap();
    let input = "ab".repeat(500);
    assert!(regex.accept(&input));
    c.bench_function("long_input_group_plus", |b| {
        b.iter(|| regex.accept(black_box(&input)))
    });
}

criterion_group!(benches, bench_accept, bench_compile, bench_long_input);
criterion_main!(benches);
