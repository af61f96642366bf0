use criterion::{BatchSize, Criterion, criterion_group, criterion_main};
use crimesort::prelude::*;
use rand::Rng;
use std::hint::black_box;

const ALGORITHMS: [Algorithm; 4] = Algorithm::ALL;

fn bench_labels(c: &mut Criterion) {
    let mut group = c.benchmark_group("Region Labels");
    group.sample_size(10);

    // Dataset generation
    let mut rng = rand::rng();
    let count = 500;

    let labels: Vec<String> = (0..count)
        .map(|_| {
            let len = rng.random_range(5..20);
            (0..len).map(|_| rng.random_range('a'..='z')).collect()
        })
        .collect();

    for algorithm in ALGORITHMS {
        group.bench_function(algorithm.name(), |b| {
            b.iter_batched(
                || labels.clone(),
                |mut data| sort_slice(algorithm, black_box(&mut data), Direction::Ascending),
                BatchSize::SmallInput,
            )
        });
    }

    // Std Sort (Stable)
    group.bench_function("slice::sort (stable)", |b| {
        b.iter_batched(
            || labels.clone(),
            |mut data| data.sort(),
            BatchSize::SmallInput,
        )
    });

    group.finish();
}

fn bench_records(c: &mut Criterion) {
    let mut group = c.benchmark_group("Records By Count");
    group.sample_size(10);

    let mut rng = rand::rng();
    let count = 500;

    let records: Vec<Record> = (0..count)
        .map(|i| Record::crime(format!("region-{i}"), "Theft", rng.random_range(1..10_000)))
        .collect();
    let key = FieldKey::resolve(&records, "count").unwrap();

    for algorithm in ALGORITHMS {
        for direction in Direction::BOTH {
            group.bench_function(format!("{} ({direction})", algorithm.name()), |b| {
                b.iter_batched(
                    || records.clone(),
                    |mut data| algorithm.sort(black_box(&mut data), &key, direction),
                    BatchSize::SmallInput,
                )
            });
        }
    }

    group.finish();
}

criterion_group!(benches, bench_labels, bench_records);
criterion_main!(benches);
