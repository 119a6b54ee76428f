use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tracing::debug;

use crate::search::{
    arena::{NodeArena, NodeId, NodeStatus},
    event::{EventSink, ProgressEvent},
    frontier::{Frontier, SearchMode},
    node::{SearchNode, StateKey},
    telemetry::SearchTelemetry,
};

/// A solution node lifted out of the arena at the end of a run.
#[derive(Debug)]
pub struct GoalNode<N> {
    pub state: N,
    /// Cheapest path cost from the root found by the time the node popped.
    pub cost: u64,
    /// Length of the best-parent chain back to the root.
    pub depth: u64,
}

/// Why a run ended.
#[derive(Debug)]
pub enum SearchOutcome<N> {
    /// A popped node satisfied the solution test.
    Solved(GoalNode<N>),
    /// The frontier emptied with no solution. A normal outcome, not an
    /// error.
    Exhausted,
    /// The host raised the injected cancel flag.
    Cancelled,
}

impl<N> SearchOutcome<N> {
    pub fn solved(self) -> Option<GoalNode<N>> {
        match self {
            SearchOutcome::Solved(goal) => Some(goal),
            _ => None,
        }
    }
}

/// The generalized graph-search driver.
///
/// The engine explores any [`SearchNode`] implementer in one of the three
/// [`SearchMode`]s, merging duplicate states through their identity keys and
/// re-propagating path-cost improvements when a cheaper route to a known
/// node appears. Every node lives in a per-run arena; the frontier, the
/// closed bookkeeping, and the unique-identity index hold handles into it.
pub struct SearchEngine<E> {
    sink: E,
    cancel: Option<Arc<AtomicBool>>,
}

impl<E> SearchEngine<E> {
    pub fn new(sink: E) -> Self {
        Self { sink, cancel: None }
    }

    /// Installs a flag the host may raise for early termination. The flag is
    /// polled once per popped node.
    pub fn with_cancel_flag(mut self, flag: Arc<AtomicBool>) -> Self {
        self.cancel = Some(flag);
        self
    }

    /// Runs the search to completion and reports how it ended, together with
    /// the run counters.
    pub fn search<N>(&self, start: N, mode: SearchMode) -> (SearchOutcome<N>, SearchTelemetry)
    where
        N: SearchNode,
        E: EventSink<N::Report>,
    {
        debug!(?mode, "search starting");
        let mut telemetry = SearchTelemetry::default();
        let mut arena: NodeArena<N> = NodeArena::new();
        let mut unique: HashMap<StateKey, NodeId> = HashMap::new();

        let root = arena.insert(start);
        if arena.state(root).is_solution() {
            // A solved root never enters the frontier and expands nothing.
            return (
                SearchOutcome::Solved(GoalNode {
                    cost: 0,
                    depth: 0,
                    state: arena.into_state(root),
                }),
                telemetry,
            );
        }

        let mut frontier = Frontier::new(mode);
        arena.set_path_cost(root, 0);
        unique.insert(arena.state(root).identity(), root);
        frontier.push(root, arena.total_estimate(root));
        arena.set_status(root, NodeStatus::Open);
        telemetry.generated += 1;
        telemetry.peak_frontier = 1;

        loop {
            if let Some(flag) = &self.cancel {
                if flag.load(Ordering::Relaxed) {
                    debug!("search cancelled by host");
                    return (SearchOutcome::Cancelled, telemetry);
                }
            }

            let Some(current) = frontier.pop() else {
                debug!(generated = telemetry.generated, "frontier exhausted");
                return (SearchOutcome::Exhausted, telemetry);
            };
            telemetry.popped += 1;
            arena.set_status(current, NodeStatus::Closed);
            self.emit(&arena, current, &telemetry);

            if arena.state(current).is_solution() {
                debug!(
                    cost = arena.path_cost(current),
                    popped = telemetry.popped,
                    "solution found"
                );
                return (
                    SearchOutcome::Solved(GoalNode {
                        cost: arena.path_cost(current),
                        depth: arena.depth(current),
                        state: arena.into_state(current),
                    }),
                    telemetry,
                );
            }

            let successors = arena.state(current).generate_successors();
            let mut needs_reheap = false;
            for successor in successors {
                let key = successor.identity();
                let id = match unique.get(&key) {
                    // An equal identity means the same search state; the
                    // canonical node stands in for the fresh copy.
                    Some(&existing) => {
                        telemetry.merged += 1;
                        existing
                    }
                    None => {
                        let id = arena.insert(successor);
                        unique.insert(key, id);
                        telemetry.generated += 1;
                        id
                    }
                };
                arena.record_child(current, id);

                if arena.status(id) == NodeStatus::Unvisited {
                    attach(&mut arena, id, current);
                    frontier.push(id, arena.total_estimate(id));
                    arena.set_status(id, NodeStatus::Open);
                } else {
                    let candidate = arena
                        .path_cost(current)
                        .saturating_add(arena.state(current).arc_cost(arena.state(id)));
                    if candidate < arena.path_cost(id) {
                        // A cheaper route to a known node: re-attach, and if
                        // the node was already expanded push the improvement
                        // down through its discovered children.
                        attach(&mut arena, id, current);
                        telemetry.relaxations += 1;
                        if arena.status(id) == NodeStatus::Closed {
                            propagate_path_improvements(&mut arena, id);
                        }
                        needs_reheap = true;
                    }
                }
            }
            if needs_reheap {
                frontier.reheap(|id| arena.total_estimate(id));
            }
            telemetry.peak_frontier = telemetry.peak_frontier.max(frontier.len());
        }
    }

    fn emit<N>(&self, arena: &NodeArena<N>, id: NodeId, telemetry: &SearchTelemetry)
    where
        N: SearchNode,
        E: EventSink<N::Report>,
    {
        self.sink.emit(ProgressEvent {
            report: arena.state(id).report(),
            generated: telemetry.generated,
            popped: telemetry.popped,
            depth: arena.depth(id),
            is_solution: arena.state(id).is_solution(),
        });
    }
}

/// Makes `parent` the best parent of `child` and refreshes the child's path
/// cost accordingly.
fn attach<N: SearchNode>(arena: &mut NodeArena<N>, child: NodeId, parent: NodeId) {
    let cost = arena
        .path_cost(parent)
        .saturating_add(arena.state(parent).arc_cost(arena.state(child)));
    arena.set_best_parent(child, parent);
    arena.set_path_cost(child, cost);
}

/// Depth-first relaxation over the discovered-children lists: whenever the
/// improved cost of `parent` lowers a child's cost, re-attach that child and
/// descend. Stops at children the improvement cannot reach.
fn propagate_path_improvements<N: SearchNode>(arena: &mut NodeArena<N>, parent: NodeId) {
    let children: Vec<NodeId> = arena.children(parent).to_vec();
    for child in children {
        let candidate = arena
            .path_cost(parent)
            .saturating_add(arena.state(parent).arc_cost(arena.state(child)));
        if candidate < arena.path_cost(child) {
            arena.set_best_parent(child, parent);
            arena.set_path_cost(child, candidate);
            propagate_path_improvements(arena, child);
        }
    }
}
