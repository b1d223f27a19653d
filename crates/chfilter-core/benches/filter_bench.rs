//! # Filter Benchmarks
//!
//! Performance benchmarks for registration and per-edge acceptance.
//!
//! Run with: `cargo bench -p chfilter-core`

use chfilter_core::{
    ChEdge, ChGraph, ContractedGraph, CoreEdgeFilter, CoreRegistry, FilterChain, FnFilter, Level,
    NodeId,
};
use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use std::hint::black_box;

/// Create a graph of `size` nodes where every tenth node is in the core,
/// with edges between consecutive nodes in both directions.
fn create_banded_graph(size: usize) -> ChGraph {
    let sentinel = size as u64 + 1;
    let levels = (0..size as u64)
        .map(|i| Level(if i % 10 == 0 { sentinel } else { i % 97 }))
        .collect();
    let edges = (1..size as u64).flat_map(|i| {
        let edge = ChEdge::new(NodeId(i - 1), NodeId(i));
        [edge, edge.reversed()]
    });
    ChGraph::with_edges(levels, edges).expect("graph")
}

// =============================================================================
// BENCHMARKS
// =============================================================================

fn bench_registration(c: &mut Criterion) {
    let mut group = c.benchmark_group("registration");

    for size in [1000, 10000, 100000].iter() {
        let graph = create_banded_graph(*size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &graph, |b, graph| {
            b.iter(|| {
                let mut registry = CoreRegistry::new();
                let slot = registry.register(graph).expect("register");
                black_box((registry, slot))
            });
        });
    }

    group.finish();
}

fn bench_accept(c: &mut Criterion) {
    let mut group = c.benchmark_group("accept");

    for size in [1000, 10000].iter() {
        let graph = create_banded_graph(*size);
        let mut registry = CoreRegistry::new();
        registry.register(&graph).expect("register");
        let edges: Vec<ChEdge> = graph.edges().collect();

        for in_core in [false, true] {
            let id = BenchmarkId::new(if in_core { "in_core" } else { "outward" }, size);
            group.bench_with_input(id, &edges, |b, edges| {
                let mut filter = CoreEdgeFilter::new(&graph, &registry).expect("filter");
                filter.set_in_core(in_core);
                b.iter(|| edges.iter().filter(|e| filter.accept(e)).count());
            });
        }
    }

    group.finish();
}

fn bench_chain(c: &mut Criterion) {
    let graph = create_banded_graph(10000);
    let mut registry = CoreRegistry::new();
    registry.register(&graph).expect("register");
    let edges: Vec<ChEdge> = graph.edges().collect();

    c.bench_function("chain_core_plus_two", |b| {
        let chain = FilterChain::new()
            .with(CoreEdgeFilter::new(&graph, &registry).expect("filter"))
            .with(FnFilter::new("odd", |e: &ChEdge| e.adjacent.0 % 2 == 1))
            .with(FnFilter::new("near", |e: &ChEdge| e.base.0 < 5000));
        b.iter(|| edges.iter().filter(|e| chain.accept(e)).count());
    });
}

criterion_group!(benches, bench_registration, bench_accept, bench_chain);
criterion_main!(benches);
