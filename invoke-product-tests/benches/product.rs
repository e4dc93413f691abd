use criterion::{black_box, criterion_group, criterion_main, BenchmarkGroup, BenchmarkId, Criterion};
use criterion::measurement::WallTime;
use invoke_product::{invoke_over_product, IndexSet};
use invoke_product_tests::sweep::naive;
use pprof::criterion::{Output, PProfProfiler};

fn bench_cube<const N: usize>(group: &mut BenchmarkGroup<'_, WallTime>) {
    let set = IndexSet::<u32, N>::sequence().unwrap();
    let values = *set.values();
    let offset = 7u32;

    group.bench_with_input(
        BenchmarkId::new("hand-written loop nest", N * N * N),
        &values,
        |b, values| {
            b.iter(|| naive::nested3(values, values, values, |x, y, z| x * y + z + offset))
        },
    );

    group.bench_with_input(
        BenchmarkId::new("invoke_over_product", N * N * N),
        &set,
        |b, set| {
            b.iter(|| {
                invoke_over_product(
                    |x: u32, y: u32, offset: u32, z: u32| x * y + z + offset,
                    (*set, *set, black_box(offset), *set),
                )
            })
        },
    );
}

fn bench_product(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("cartesian product of three index sets");

    bench_cube::<4>(&mut group);
    bench_cube::<16>(&mut group);
    bench_cube::<64>(&mut group);

    group.finish();
}

criterion_group! {
    name = benches;
    config = Criterion::default()
        .with_profiler(
            PProfProfiler::new(100, Output::Flamegraph(None))
        );
    targets = bench_product
}
criterion_main!(benches);
