use criterion::{Criterion, criterion_group, criterion_main};
use sc_segment::{render_digit, render_digit_sequential};
use std::hint::black_box;

fn bench_digit(c: &mut Criterion) {
    c.bench_function("render_digit_fork_join_s5", |b| {
        b.iter(|| {
            for value in 0..=9u8 {
                black_box(render_digit(black_box(value), 5));
            }
        });
    });

    c.bench_function("render_digit_sequential_s5", |b| {
        b.iter(|| {
            for value in 0..=9u8 {
                black_box(render_digit_sequential(black_box(value), 5));
            }
        });
    });
}

criterion_group!(benches, bench_digit);
criterion_main!(benches);
