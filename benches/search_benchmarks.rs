use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use ramus::branching::AssumptionNode;
use ramus::problems::vertex_coloring::{graph_to_network, Graph};
use ramus::search::{engine::SearchEngine, event::NullSink, frontier::SearchMode};

fn ring_root(vertices: u32, colours: u32) -> AssumptionNode<u32> {
    let graph = Graph::ring(vertices);
    let network = graph_to_network(&graph, colours).unwrap();
    AssumptionNode::root(network.create_instance())
}

fn bench_ring_colouring(c: &mut Criterion) {
    let mut group = c.benchmark_group("ring_colouring");

    for vertices in [8u32, 16, 32] {
        group.bench_with_input(
            BenchmarkId::new("best", vertices),
            &vertices,
            |b, &vertices| {
                b.iter(|| {
                    let engine = SearchEngine::new(NullSink);
                    let (outcome, _) =
                        engine.search(black_box(ring_root(vertices, 3)), SearchMode::Best);
                    outcome.solved().unwrap()
                });
            },
        );
    }

    group.finish();
}

fn bench_search_modes(c: &mut Criterion) {
    let mut group = c.benchmark_group("search_modes");

    for (label, mode) in [
        ("best", SearchMode::Best),
        ("depth", SearchMode::Depth),
        ("breadth", SearchMode::Breadth),
    ] {
        group.bench_function(BenchmarkId::new(label, 12), |b| {
            b.iter(|| {
                let engine = SearchEngine::new(NullSink);
                let (outcome, _) = engine.search(black_box(ring_root(12, 3)), mode);
                outcome.solved().unwrap()
            });
        });
    }

    group.finish();
}

fn bench_root_propagation(c: &mut Criterion) {
    c.bench_function("root_propagation_32", |b| {
        b.iter(|| black_box(ring_root(32, 3)));
    });
}

criterion_group!(
    benches,
    bench_ring_colouring,
    bench_search_modes,
    bench_root_propagation
);
criterion_main!(benches);
