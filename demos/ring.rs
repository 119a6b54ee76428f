//! Colours a ring graph, streaming progress events as JSON lines the way a
//! rendering frontend would consume them.
//!
//! ```text
//! cargo run --example ring -- --vertices 8 --colours 3 --mode best
//! ```

use std::thread;

use clap::{Parser, ValueEnum};

use ramus::branching::AssumptionNode;
use ramus::problems::vertex_coloring::{graph_to_network, render_colouring_table, Graph};
use ramus::search::{
    engine::{SearchEngine, SearchOutcome},
    event::ChannelSink,
    frontier::SearchMode,
    telemetry::render_telemetry_table,
};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Mode {
    Best,
    Depth,
    Breadth,
}

impl From<Mode> for SearchMode {
    fn from(mode: Mode) -> Self {
        match mode {
            Mode::Best => SearchMode::Best,
            Mode::Depth => SearchMode::Depth,
            Mode::Breadth => SearchMode::Breadth,
        }
    }
}

#[derive(Debug, Parser)]
struct Args {
    /// Number of vertices in the ring.
    #[arg(long, default_value_t = 8)]
    vertices: u32,

    /// Number of candidate colours per vertex.
    #[arg(long, default_value_t = 3)]
    colours: u32,

    /// Exploration order.
    #[arg(long, value_enum, default_value_t = Mode::Best)]
    mode: Mode,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();
    let args = Args::parse();

    let graph = Graph::ring(args.vertices);
    let network = graph_to_network(&graph, args.colours)?;
    let root = AssumptionNode::root(network.create_instance());

    let (sender, receiver) = crossbeam_channel::unbounded();
    let mode = SearchMode::from(args.mode);
    let worker = thread::spawn(move || {
        let engine = SearchEngine::new(ChannelSink::new(sender));
        engine.search(root, mode)
    });

    for event in receiver {
        println!("{}", serde_json::to_string(&event)?);
    }

    let (outcome, telemetry) = worker.join().expect("search worker panicked");
    match outcome {
        SearchOutcome::Solved(goal) => {
            println!("\nSolved in {} assumptions:", goal.depth);
            println!("{}", render_colouring_table(goal.state.instance()));
        }
        SearchOutcome::Exhausted => {
            println!(
                "\nNo {}-colouring exists for a ring of {} vertices.",
                args.colours, args.vertices
            );
        }
        SearchOutcome::Cancelled => println!("\nSearch cancelled."),
    }
    println!("{}", render_telemetry_table(&telemetry));

    Ok(())
}
