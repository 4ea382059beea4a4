use std::hint::black_box;

use criterion::{measurement::Measurement, BenchmarkGroup, BenchmarkId, Criterion, Throughput};
use itree::IntervalTree;

use crate::Lfsr;

/// The number of query points evaluated per iteration.
const N_QUERIES: usize = 100;

#[derive(Debug)]
struct BenchName {
    bench_name: &'static str,
    n_values: usize,
}

impl From<BenchName> for BenchmarkId {
    fn from(v: BenchName) -> Self {
        Self::new(format!("{}/n_values", v.bench_name), v.n_values)
    }
}

pub(super) fn bench(c: &mut Criterion) {
    let mut g = c.benchmark_group("query");

    for n_values in [1, 100, 1_000, 10_000] {
        bench_param(&mut g, n_values)
    }
}

fn bench_param<M>(g: &mut BenchmarkGroup<'_, M>, n_values: usize)
where
    M: Measurement,
{
    // Generate the tree.
    let mut rand = Lfsr::default();
    let mut t = IntervalTree::with_capacity(n_values);
    t.extend((0..n_values).map(|_| rand.next_interval())).unwrap();
    t.construct().unwrap();

    // Query points continue the LFSR sequence after the inserted intervals.
    bench_random(n_values, g, &t, || random_points(&mut rand));
    bench_lowest(n_values, g, &t, lowest_points);
    bench_highest(n_values, g, &t, highest_points);
}

/// Generate [`N_QUERIES`] points scattered across the value domain.
fn random_points(rand: &mut Lfsr) -> Vec<u16> {
    (0..N_QUERIES).map(|_| rand.next()).collect()
}

/// Points at the bottom of the value domain, stabbing few intervals.
fn lowest_points() -> Vec<u16> {
    (0..N_QUERIES as u16).collect()
}

/// Points at the top of the value domain, stabbing few intervals.
fn highest_points() -> Vec<u16> {
    (0..N_QUERIES as u16).map(|v| u16::MAX - v).collect()
}

macro_rules! query_bench {
    (
        $name:ident
    ) => {
        paste::paste! {
            fn [<bench_ $name>]<M, F>(
                n_values: usize,
                g: &mut BenchmarkGroup<M>,
                t: &IntervalTree<(u16, u16)>,
                points: F,
            ) where
                M: Measurement,
                F: FnOnce() -> Vec<u16>,
            {
                let bench_name = BenchName {
                    n_values,
                    bench_name: stringify!($name),
                };

                let points = points();

                g.throughput(Throughput::Elements(N_QUERIES as _));
                // Queries per second
                g.bench_function(BenchmarkId::from(bench_name), |b| {
                    b.iter(|| {
                        for &x in &points {
                            for v in t.query(x).unwrap() {
                                black_box(v);
                            }
                        }
                    })
                });
            }
        }
    }
}

query_bench!(random);
query_bench!(lowest);
query_bench!(highest);
