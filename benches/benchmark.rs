use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use mcis::config::{Config, Driver};
use mcis::graph::Graph;
use mcis::search::{self, AbortFlag};

/// A small dense graph, grown procedurally so the benchmark input doesn't
/// depend on any checked-in resource file: a cycle of `n` same-labelled
/// vertices plus every "skip-2" chord, which keeps the label-intersection
/// bidomain non-trivial without needing a complete graph.
fn cyclic_graph(n: usize) -> Graph {
    let mut edges = Vec::new();
    for i in 0..n {
        edges.push((i, (i + 1) % n));
        edges.push((i, (i + 2) % n));
    }

    let mut input = format!("{n} {}\n", edges.len());
    input.push_str(&vec!["0"; n].join(" "));
    input.push('\n');
    for (v, w) in edges {
        input.push_str(&format!("{v} {w}\n"));
    }
    input.parse().unwrap()
}

fn run_search(g0: &Graph, g1: &Graph, config: &Config) -> u64 {
    let abort = AbortFlag::new();
    let stats = search::run(g0, g1, config, &abort, |_| {});
    black_box(stats.solutions)
}

pub fn criterion_benchmark(c: &mut Criterion) {
    let g0 = cyclic_graph(9);
    let g1 = cyclic_graph(9);

    let mut group = c.benchmark_group("mcis");

    for connected in [false, true] {
        let config = Config {
            connected,
            ..Config::default()
        };
        group.bench_with_input(
            BenchmarkId::new("explicit", connected),
            &config,
            |b, config| b.iter(|| run_search(&g0, &g1, config)),
        );
    }

    let implicit_config = Config::new(Driver::Implicit, true, false, false, 0);
    group.bench_with_input(
        BenchmarkId::new("implicit", true),
        &implicit_config,
        |b, config| b.iter(|| run_search(&g0, &g1, config)),
    );

    group.finish();
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
