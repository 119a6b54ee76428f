//! Colours a randomly generated map. The generator is seeded, so a given
//! seed always produces the same graph and the same run.
//!
//! ```text
//! cargo run --example random_map -- --vertices 20 --edges 40 --seed 7
//! ```

use clap::Parser;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use ramus::branching::AssumptionNode;
use ramus::problems::vertex_coloring::{graph_to_network, render_colouring_table, Graph};
use ramus::search::{
    engine::{SearchEngine, SearchOutcome},
    event::NullSink,
    frontier::SearchMode,
    telemetry::render_telemetry_table,
};

#[derive(Debug, Parser)]
struct Args {
    #[arg(long, default_value_t = 20)]
    vertices: u32,

    /// Number of distinct random edges to draw.
    #[arg(long, default_value_t = 40)]
    edges: u32,

    #[arg(long, default_value_t = 4)]
    colours: u32,

    #[arg(long, default_value_t = 1)]
    seed: u64,
}

fn random_graph(vertices: u32, edges: u32, seed: u64) -> Graph {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut graph = Graph::new();
    for id in 0..vertices {
        graph.add_vertex(id);
    }

    let mut drawn = std::collections::HashSet::new();
    while (drawn.len() as u32) < edges.min(vertices * (vertices - 1) / 2) {
        let a = rng.gen_range(0..vertices);
        let b = rng.gen_range(0..vertices);
        if a == b {
            continue;
        }
        let edge = if a < b { (a, b) } else { (b, a) };
        if drawn.insert(edge) {
            graph.add_edge(edge.0, edge.1);
        }
    }
    graph
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();
    let args = Args::parse();

    let graph = random_graph(args.vertices, args.edges, args.seed);
    let network = graph_to_network(&graph, args.colours)?;
    let root = AssumptionNode::root(network.create_instance());

    let engine = SearchEngine::new(NullSink);
    let (outcome, telemetry) = engine.search(root, SearchMode::Best);

    match outcome {
        SearchOutcome::Solved(goal) => {
            println!("Solved in {} assumptions:", goal.depth);
            println!("{}", render_colouring_table(goal.state.instance()));
        }
        SearchOutcome::Exhausted => {
            println!(
                "The generated map admits no {}-colouring.",
                args.colours
            );
        }
        SearchOutcome::Cancelled => println!("Search cancelled."),
    }
    println!("{}", render_telemetry_table(&telemetry));

    Ok(())
}
