use criterion::{Criterion, black_box, criterion_group, criterion_main};

use stepctl_core::validate;
use stepctl_core::{format, Limits};

fn bench_check_value(c: &mut Criterion) {
    let limits = Limits::new(Some(0.0), Some(1_000_000.0));
    c.bench_function("check_value", |b| {
        b.iter(|| {
            validate::check_value(
                black_box(limits),
                black_box(0.25),
                black_box(123_456.75),
            )
        })
    });
}

fn bench_should_accept_edit(c: &mut Criterion) {
    let limits = Limits::new(Some(0.0), Some(1_000_000.0));
    c.bench_function("should_accept_edit", |b| {
        b.iter(|| {
            validate::should_accept_edit(
                black_box(limits),
                black_box("123456.7"),
                black_box(6..6),
                black_box("9"),
            )
        })
    });
}

fn bench_format(c: &mut Criterion) {
    c.bench_function("format_grouped", |b| {
        b.iter(|| format::format(black_box(1_234_567.89), 0, 2))
    });
}

criterion_group!(benches, bench_check_value, bench_should_accept_edit, bench_format);
criterion_main!(benches);
