use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use jayson::{encode, EncodeConfig, EscapeMode, Key, Value};

// ---------------------------------------------------------------------------
// Test data
// ---------------------------------------------------------------------------

fn plain_ascii(len: usize) -> String {
    (0..len).map(|i| (b'a' + (i % 26) as u8) as char).collect()
}

fn needs_escaping(len: usize) -> String {
    let pattern = "hello \"world\"\nnew\tline\\slash";
    pattern.chars().cycle().take(len).collect()
}

fn html_unsafe(len: usize) -> String {
    let pattern = "<script>alert('xss');</script>&foo<bar>";
    pattern.chars().cycle().take(len).collect()
}

fn unicode_heavy(len: usize) -> String {
    let chars = ['a', '\u{00e9}', '\u{4e16}', '\u{1f600}', 'z'];
    (0..len).map(|i| chars[i % chars.len()]).collect()
}

fn wide_object(width: usize) -> Value {
    Value::object((0..width).map(|i| (Key::from(format!("key{i}")), Value::from(i as i64))))
}

// ---------------------------------------------------------------------------
// Benchmarks
// ---------------------------------------------------------------------------

fn bench_string_escaping(c: &mut Criterion) {
    let mut group = c.benchmark_group("string_escape");

    for size in [16, 64, 256, 1024, 4096] {
        let plain = plain_ascii(size);
        group.throughput(Throughput::Bytes(plain.len() as u64));
        group.bench_with_input(BenchmarkId::new("ascii_json", size), &plain, |b, data| {
            let cfg = EncodeConfig::new();
            let v = Value::str(data.as_str());
            b.iter(|| black_box(encode(&v, &cfg).unwrap()))
        });

        let escaped = needs_escaping(size);
        group.throughput(Throughput::Bytes(escaped.len() as u64));
        group.bench_with_input(BenchmarkId::new("escaped_json", size), &escaped, |b, data| {
            let cfg = EncodeConfig::new();
            let v = Value::str(data.as_str());
            b.iter(|| black_box(encode(&v, &cfg).unwrap()))
        });

        let html = html_unsafe(size);
        group.throughput(Throughput::Bytes(html.len() as u64));
        group.bench_with_input(BenchmarkId::new("html_safe", size), &html, |b, data| {
            let cfg = EncodeConfig::new().escape(EscapeMode::HtmlSafe);
            let v = Value::str(data.as_str());
            b.iter(|| black_box(encode(&v, &cfg).unwrap()))
        });

        let uni = unicode_heavy(size);
        group.throughput(Throughput::Bytes(uni.len() as u64));
        group.bench_with_input(BenchmarkId::new("unicode_profile", size), &uni, |b, data| {
            let cfg = EncodeConfig::new().escape(EscapeMode::Unicode);
            let v = Value::str(data.as_str());
            b.iter(|| black_box(encode(&v, &cfg).unwrap()))
        });
    }

    group.finish();
}

fn bench_containers(c: &mut Criterion) {
    let mut group = c.benchmark_group("containers");

    for width in [8, 64, 512] {
        let v = wide_object(width);
        group.throughput(Throughput::Elements(width as u64));
        group.bench_with_input(BenchmarkId::new("object", width), &v, |b, v| {
            let cfg = EncodeConfig::new();
            b.iter(|| black_box(encode(v, &cfg).unwrap()))
        });

        let arr = Value::array((0..width).map(|i| Value::from(i as i64)));
        group.bench_with_input(BenchmarkId::new("array", width), &arr, |b, v| {
            let cfg = EncodeConfig::new();
            b.iter(|| black_box(encode(v, &cfg).unwrap()))
        });
    }

    group.finish();
}

fn bench_integer_format(c: &mut Criterion) {
    let mut group = c.benchmark_group("integer_format");

    let cases: &[(&str, i64)] = &[
        ("zero", 0),
        ("small", 42),
        ("negative", -42),
        ("large", 1_234_567_890_123),
        ("max_i64", i64::MAX),
        ("min_i64", i64::MIN),
    ];

    for (name, n) in cases {
        group.bench_with_input(BenchmarkId::new("itoa", *name), n, |b, &n| {
            let cfg = EncodeConfig::new();
            let v = Value::from(n);
            b.iter(|| black_box(encode(&v, &cfg).unwrap()))
        });
    }

    group.finish();
}

fn bench_float_format(c: &mut Criterion) {
    let mut group = c.benchmark_group("float_format");

    let cases: &[(&str, f64)] = &[
        ("zero", 0.0),
        ("simple", 3.14159265),
        ("scientific", 6.022e23),
        ("tiny", 5e-324),
        ("max", 1.7976931348623157e308),
        ("negative", -273.15),
        ("precise", 1.23456789012345),
    ];

    for (name, value) in cases {
        group.bench_with_input(BenchmarkId::new("ryu", *name), value, |b, &val| {
            let cfg = EncodeConfig::new();
            let v = Value::Float(val);
            b.iter(|| black_box(encode(&v, &cfg).unwrap()))
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_string_escaping,
    bench_containers,
    bench_integer_format,
    bench_float_format,
);
criterion_main!(benches);
