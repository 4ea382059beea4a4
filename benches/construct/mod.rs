use criterion::{measurement::Measurement, BenchmarkGroup, BenchmarkId, Criterion, Throughput};
use itree::IntervalTree;

use crate::Lfsr;

#[derive(Debug, Clone, Copy)]
struct BenchName {
    n_values: usize,
}

impl From<BenchName> for BenchmarkId {
    fn from(v: BenchName) -> Self {
        Self::new("n_values", v.n_values)
    }
}

pub(super) fn bench(c: &mut Criterion) {
    let mut g = c.benchmark_group("construct");

    for n_values in [1, 100, 1_000, 10_000] {
        bench_param(&mut g, n_values)
    }
}

/// Measure the time needed to build a tree over `n_values` randomly generated
/// intervals.
fn bench_param<M>(g: &mut BenchmarkGroup<'_, M>, n_values: usize)
where
    M: Measurement,
{
    let mut rand = Lfsr::default();
    let values = (0..n_values)
        .map(|_| rand.next_interval())
        .collect::<Vec<_>>();

    let bench_name = BenchName { n_values };
    g.throughput(Throughput::Elements(n_values as _)); // Intervals indexed per second
    g.bench_function(BenchmarkId::from(bench_name), |b| {
        b.iter_batched(
            || IntervalTree::from(values.clone()),
            |mut t| {
                t.construct().unwrap();
                t
            },
            criterion::BatchSize::PerIteration,
        );
    });
}
