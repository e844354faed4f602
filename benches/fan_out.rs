//! Benchmarks for serial vs concurrent fan-out
//!
//! Run with: cargo bench

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use streamable_rs::{
    receiver_fn, serial, ConcurrencyConfig, Flatten, Invocable, Producer, StreamGroup, Value,
};

fn double() -> Invocable {
    Invocable::receiver(receiver_fn("double", |v: Value| {
        Ok(Value::Int(v.as_int().unwrap_or_default() * 2))
    }))
}

fn inputs(n: usize) -> Vec<Producer> {
    (0..n as i64).map(Producer::value).collect()
}

fn bench_chained_stages(c: &mut Criterion) {
    let mut group = c.benchmark_group("chained_stages");

    for depth in [1usize, 8, 64].iter() {
        let mut stream = Producer::value(1).compose_with(Producer::yielding(double()));
        for _ in 1..*depth {
            stream = stream.compose_with(Producer::yielding(double()));
        }

        group.throughput(Throughput::Elements(*depth as u64));
        group.bench_with_input(BenchmarkId::new("evaluate", depth), depth, |b, _| {
            b.iter(|| black_box(stream.evaluate().unwrap()));
        });
    }

    group.finish();
}

fn bench_fan_out(c: &mut Criterion) {
    let mut group = c.benchmark_group("fan_out");

    for width in [4usize, 16, 64].iter() {
        let stage = Producer::yielding(serial([double(), double()]));
        let serial_stream = serial(inputs(*width))
            .broadcast(stage.clone())
            .pipe_into(Producer::receiver(Flatten));
        let concurrent_stream = serial(inputs(*width))
            .to_concurrent(stage.clone())
            .pipe_into(Producer::receiver(Flatten));
        let pooled_stream = serial(inputs(*width))
            .to_concurrent_with(stage, ConcurrencyConfig::bounded(4))
            .pipe_into(Producer::receiver(Flatten));

        group.throughput(Throughput::Elements(*width as u64));
        group.bench_with_input(BenchmarkId::new("serial", width), width, |b, _| {
            b.iter(|| black_box(serial_stream.evaluate().unwrap()));
        });
        group.bench_with_input(BenchmarkId::new("concurrent", width), width, |b, _| {
            b.iter(|| black_box(concurrent_stream.evaluate().unwrap()));
        });
        group.bench_with_input(BenchmarkId::new("pooled_4", width), width, |b, _| {
            b.iter(|| black_box(pooled_stream.evaluate().unwrap()));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_chained_stages, bench_fan_out);
criterion_main!(benches);
