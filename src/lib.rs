//! Ramus is a generic branch-and-infer constraint solver.
//!
//! It fuses two engines. The **propagation engine** keeps every variable's
//! domain arc-consistent: whenever a domain shrinks, a worklist of
//! `(variable, constraint)` revision requests carries the change through the
//! network until nothing more can be pruned. The **search engine** explores
//! the space of assumptions: at each step it forces one variable down to a
//! single candidate value, propagates, and keeps only the branches that
//! survive. Best-first, depth-first, and breadth-first exploration share one
//! driver with duplicate-state merging and path-cost relaxation.
//!
//! # Core Concepts
//!
//! - **[`ConstraintNetwork`]**: the static problem: variables, domains, and
//!   constraints built from [`Predicate`]s.
//! - **[`ConstraintInstance`]**: one point in the search space, owning its
//!   private copy of the domains and the worklist fixpoint.
//! - **[`AssumptionNode`]**: the adapter that turns an instance into
//!   something the search engine can expand.
//! - **[`SearchEngine`]**: the mode-polymorphic driver.
//!
//! # Example: A Simple 2-Variable Problem
//!
//! Solving `?A != ?B` where `?A` can be `1` or `2` and `?B` can only be `1`.
//! Propagation alone deduces that `?A` must be `2`, so the root node is
//! already the solution:
//!
//! ```
//! use ramus::branching::AssumptionNode;
//! use ramus::csp::network::ConstraintNetwork;
//! use ramus::csp::predicate::Predicate;
//! use ramus::search::engine::SearchEngine;
//! use ramus::search::event::NullSink;
//! use ramus::search::frontier::SearchMode;
//!
//! let mut network = ConstraintNetwork::new();
//! network.add_variable_with_domain(0, [1u32, 2]).unwrap();
//! network.add_variable_with_domain(1, [1u32]).unwrap();
//! network.add_constraint(vec![0, 1], Predicate::NotEqual).unwrap();
//!
//! let root = AssumptionNode::root(network.create_instance());
//! let engine = SearchEngine::new(NullSink);
//! let (outcome, _telemetry) = engine.search(root, SearchMode::Best);
//!
//! let goal = outcome.solved().unwrap();
//! assert_eq!(goal.state.instance().assignment(0), Some(&2));
//! ```
//!
//! [`ConstraintNetwork`]: crate::csp::network::ConstraintNetwork
//! [`ConstraintInstance`]: crate::csp::instance::ConstraintInstance
//! [`Predicate`]: crate::csp::predicate::Predicate
//! [`AssumptionNode`]: crate::branching::AssumptionNode
//! [`SearchEngine`]: crate::search::engine::SearchEngine

pub mod branching;
pub mod csp;
pub mod error;
pub mod problems;
pub mod search;

#[cfg(test)]
mod threaded_tests {
    use std::thread;

    use crate::branching::AssumptionNode;
    use crate::problems::vertex_coloring::{graph_to_network, Graph};
    use crate::search::{
        engine::SearchEngine,
        event::ChannelSink,
        frontier::SearchMode,
    };

    #[test]
    fn search_streams_events_from_a_worker_thread() {
        let graph = Graph::ring(6);
        let network = graph_to_network(&graph, 3).unwrap();
        let root = AssumptionNode::root(network.create_instance());

        let (sender, receiver) = crossbeam_channel::unbounded();
        let worker = thread::spawn(move || {
            let engine = SearchEngine::new(ChannelSink::new(sender));
            engine.search(root, SearchMode::Best)
        });

        let events: Vec<_> = receiver.iter().collect();
        let (outcome, telemetry) = worker.join().unwrap();

        assert!(outcome.solved().is_some());
        assert_eq!(events.len() as u64, telemetry.popped);
        // Popped counts are strictly monotone and the last event carries the
        // solution flag.
        for (i, event) in events.iter().enumerate() {
            assert_eq!(event.popped, i as u64 + 1);
        }
        assert!(events.last().unwrap().is_solution);
        assert_eq!(events.last().unwrap().report.unsatisfied, 0);
    }
}
