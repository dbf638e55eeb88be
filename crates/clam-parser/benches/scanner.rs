use std::sync::Arc;

use clam_parser::{parse, scan_all, Source};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

const PROGRAM: &str = r#"
class Counter {
    fun init(start) {
        this.count = start;
    }

    fun increment() {
        this.count = this.count + 1;
        return this.count;
    }
}

fun fib(n) {
    if (n <= 1) return n;
    return fib(n - 2) + fib(n - 1);
}

var counter = Counter(0);
for (var i = 0; i < 10; i = i + 1) {
    counter.increment();
    print fib(i) * 2.5;
}
print "done";
"#;

fn bench_keywords(c: &mut Criterion) {
    let source = Arc::new(Source::new(
        "bench",
        "class fun var for if while print return and or true false nil this super",
    ));

    c.bench_function("scan_keywords", |b| {
        b.iter(|| scan_all(black_box(&source)).unwrap());
    });
}

fn bench_literals(c: &mut Criterion) {
    let mut group = c.benchmark_group("literals");

    let numbers = Arc::new(Source::new("bench", "42 123 0 999 3.14 2.718 1.414 0.5"));
    group.bench_with_input(BenchmarkId::new("numbers", "mixed"), &numbers, |b, source| {
        b.iter(|| scan_all(black_box(source)).unwrap());
    });

    let strings = Arc::new(Source::new("bench", r#""hello" "world" "multi
line""#));
    group.bench_with_input(BenchmarkId::new("strings", "3 strings"), &strings, |b, source| {
        b.iter(|| scan_all(black_box(source)).unwrap());
    });

    group.finish();
}

fn bench_program_sizes(c: &mut Criterion) {
    let mut group = c.benchmark_group("program");

    for copies in [1usize, 10, 100] {
        let text = PROGRAM.repeat(copies);
        group.throughput(Throughput::Bytes(text.len() as u64));

        let source = Arc::new(Source::new("bench", &text));
        group.bench_with_input(BenchmarkId::new("scan", copies), &source, |b, source| {
            b.iter(|| scan_all(black_box(source)).unwrap());
        });
        group.bench_with_input(BenchmarkId::new("parse", copies), &text, |b, text| {
            b.iter(|| parse("bench", black_box(text)).unwrap());
        });
    }

    group.finish();
}

criterion_group!(benches, bench_keywords, bench_literals, bench_program_sizes);
criterion_main!(benches);
