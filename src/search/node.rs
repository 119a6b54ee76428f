/// Canonical, comparable representation of a search state.
///
/// Two nodes with equal keys denote the same state regardless of object
/// identity; the engine keeps at most one live node per key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StateKey(String);

impl StateKey {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// The capability set the search engine depends on. Anything implementing
/// this trait can be explored by [`SearchEngine`](crate::search::engine::SearchEngine),
/// in any of the supported modes.
pub trait SearchNode: Sized {
    /// Snapshot payload delivered with every progress event.
    type Report: Clone + Send + 'static;

    /// Produces the next-level branch candidates. Must not mutate `self`;
    /// each call builds fresh successor states.
    fn generate_successors(&self) -> Vec<Self>;

    /// Estimate of the remaining cost to a solution. The estimate may
    /// overestimate; best-first ordering then prefers low-uncertainty states
    /// over provably cheap paths, and no optimality guarantee applies.
    fn heuristic(&self) -> u64;

    /// Canonical key used for duplicate detection.
    fn identity(&self) -> StateKey;

    /// Cost of the edge from `self` to `child`. Non-negative by type.
    fn arc_cost(&self, child: &Self) -> u64;

    fn is_solution(&self) -> bool;

    /// Builds the payload attached to progress events about this node.
    fn report(&self) -> Self::Report;
}
