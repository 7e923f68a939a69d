use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use factorlib::{DisjointSet, Factor, FactorGraph};

fn chain_graph(n: usize) -> FactorGraph {
    let mut fg = FactorGraph::new(vec![2; n]);
    for i in 0..n - 1 {
        fg.add_factor(Factor::new(vec![i, i + 1], vec![2, 2], vec![0.0; 4]).unwrap());
    }
    fg
}

fn bench_connect_components(c: &mut Criterion) {
    let mut group = c.benchmark_group("connect_components");
    for n in [100usize, 1000, 10000] {
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, &n| {
            let mut fg = chain_graph(n);
            b.iter(|| fg.connect_components().unwrap());
        });
    }
    group.finish();
}

fn bench_union_find(c: &mut Criterion) {
    let mut group = c.benchmark_group("union_find");
    for n in [1000usize, 100000] {
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, &n| {
            b.iter(|| {
                let mut dset = DisjointSet::new(n);
                for i in 0..n - 1 {
                    dset.union_set(i, i + 1).unwrap();
                }
                dset.num_sets()
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_connect_components, bench_union_find);
criterion_main!(benches);
