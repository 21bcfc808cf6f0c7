use criterion::{criterion_group, criterion_main, Criterion};
use jgrad_codec::{aggregate, encode, MeasurementBatch};

fn build_batch(precision: usize, samples: usize) -> MeasurementBatch {
    let rows = (0..samples)
        .map(|trial| {
            (0..=precision)
                .map(|idx| (((idx * 7 + trial * 3) % 5) < 3) as u8)
                .collect()
        })
        .collect();
    MeasurementBatch::from_rows(rows).unwrap()
}

fn bench_aggregate(c: &mut Criterion) {
    let batch = build_batch(16, 1024);
    c.bench_function("aggregate_16x1024", |b| {
        b.iter(|| {
            let _ = aggregate(&batch).unwrap();
        })
    });
}

fn bench_encode(c: &mut Criterion) {
    c.bench_function("encode_48_bits", |b| {
        b.iter(|| {
            let _ = encode(0.318_309_886, 48).unwrap();
        })
    });
}

criterion_group!(benches, bench_aggregate, bench_encode);
criterion_main!(benches);
