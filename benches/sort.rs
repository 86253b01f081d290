use criterion::{criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion, Throughput};
use cubesort::test_utils::{run_group_sort, seeded_partitions};

fn bench_group_sort(c: &mut Criterion) {
    let mut group = c.benchmark_group("hypercube_sort");

    // (p, q, s): ranks, partition exponent, batch exponent. Total element
    // count is held at 2^20 while the rank count varies.
    for &(p, q, s) in &[(1u32, 19u32, 12u32), (2, 18, 12), (3, 17, 12), (4, 16, 12)] {
        let total = 1u64 << (p + q);
        group.throughput(Throughput::Elements(total));

        group.bench_with_input(
            BenchmarkId::from_parameter(format!("p{}_q{}_s{}", p, q, s)),
            &(p, q, s),
            |b, &(p, q, s)| {
                b.iter_batched(
                    || seeded_partitions(p, q),
                    |partitions| run_group_sort(partitions, 1 << s, 0),
                    BatchSize::LargeInput,
                );
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_group_sort);
criterion_main!(benches);
