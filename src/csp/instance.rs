use std::sync::Arc;

use im::{HashMap, Vector};
use tracing::debug;

use crate::csp::{
    network::{ConstraintId, ConstraintNetwork, VariableId},
    value::ValueEquality,
    work_list::WorkList,
};

/// One point in the search space: a private copy of every variable's domain,
/// a FIFO worklist of pending revisions, and a read-only handle to the
/// network that defines the problem.
///
/// Instances are never shared between search branches. Each branch gets its
/// own copy via [`copy`](ConstraintInstance::copy), so a contradiction found
/// while propagating one branch can never corrupt a sibling or an ancestor.
#[derive(Debug)]
pub struct ConstraintInstance<V: ValueEquality> {
    network: Arc<ConstraintNetwork<V>>,
    domains: HashMap<VariableId, Vector<V>>,
    work_list: WorkList,
}

impl<V: ValueEquality> ConstraintInstance<V> {
    /// Spawns the root instance for a network, copying its declared domains.
    pub fn root(network: Arc<ConstraintNetwork<V>>) -> Self {
        let domains = network.initial_domains();
        Self {
            network,
            domains,
            work_list: WorkList::new(),
        }
    }

    pub fn network(&self) -> &Arc<ConstraintNetwork<V>> {
        &self.network
    }

    /// The current domain of `id`, or `None` for a variable the network never
    /// declared.
    pub fn domain(&self, id: VariableId) -> Option<&Vector<V>> {
        self.domains.get(&id)
    }

    /// Produces an independent instance: the network stays shared read-only,
    /// the domains are copied, and the worklist starts out empty.
    pub fn copy(&self) -> Self {
        Self {
            network: Arc::clone(&self.network),
            domains: self.domains.clone(),
            work_list: WorkList::new(),
        }
    }

    /// Forces the domain of `id` down to the single chosen `value`. This is
    /// the branching decision; follow it with [`rerun`](Self::rerun) to
    /// propagate the consequence.
    pub fn assume(&mut self, id: VariableId, value: V) {
        self.domains.insert(id, Vector::unit(value));
    }

    /// Checks `id`'s domain against constraint `c`: a value survives only if
    /// some combination of values drawn from the current domains of `c`'s
    /// other bound variables satisfies the predicate with it. Returns whether
    /// any value was removed.
    pub fn revise(&mut self, id: VariableId, c: ConstraintId) -> bool {
        let network = Arc::clone(&self.network);
        let constraint = network.constraint(c);
        let current = self.domains.get(&id).unwrap().clone();

        let retained: Vector<V> = current
            .iter()
            .filter(|focal| {
                // One candidate slate per bound position, in declared order.
                // The focal variable contributes exactly the value under test.
                let slates: Vec<Vec<&V>> = constraint
                    .variables()
                    .iter()
                    .map(|&position| {
                        if position == id {
                            vec![*focal]
                        } else {
                            self.domains.get(&position).unwrap().iter().collect()
                        }
                    })
                    .collect();
                any_combination(&slates, |tuple| constraint.predicate().evaluate(tuple))
            })
            .cloned()
            .collect();

        let revised = retained.len() < current.len();
        if revised {
            self.domains.insert(id, retained);
        }
        revised
    }

    /// Seeds the worklist with every `(variable, constraint)` pair in the
    /// network. Used once, for the root instance, before the first
    /// [`domain_filtering`](Self::domain_filtering).
    pub fn initialize(&mut self) {
        let network = Arc::clone(&self.network);
        for &variable in network.variables() {
            for &constraint_id in network.constraints_on(variable) {
                self.work_list.push_back(variable, constraint_id);
            }
        }
    }

    /// Drains the worklist to the arc-consistency fixpoint.
    ///
    /// A revision that shrinks a domain schedules `(v, c')` for every other
    /// constraint touching `v` and `(v2, c)` for every other variable bound
    /// by `c`. A revision that empties a domain makes the instance
    /// contradictory; the remaining requests are irrelevant and the drain
    /// stops early. Returns `false` in that case.
    pub fn domain_filtering(&mut self) -> bool {
        let network = Arc::clone(&self.network);
        while let Some((variable, constraint_id)) = self.work_list.pop_front() {
            if !self.revise(variable, constraint_id) {
                continue;
            }
            if self.domains.get(&variable).unwrap().is_empty() {
                debug!(variable, "domain emptied, instance contradictory");
                self.work_list.clear();
                return false;
            }
            for &other in network.constraints_on(variable) {
                if other != constraint_id {
                    self.work_list.push_back(variable, other);
                }
            }
            for &neighbour in network.constraint(constraint_id).variables() {
                if neighbour != variable {
                    self.work_list.push_back(neighbour, constraint_id);
                }
            }
        }
        true
    }

    /// Propagates an assumption that fixed `assumption`'s domain to a single
    /// value: schedules revisions for every other variable sharing a
    /// constraint with it, then drains the worklist. The assumed variable
    /// itself needs no revision; its domain is already a singleton.
    pub fn rerun(&mut self, assumption: VariableId) -> bool {
        let network = Arc::clone(&self.network);
        for &constraint_id in network.constraints_on(assumption) {
            for &neighbour in network.constraint(constraint_id).variables() {
                if neighbour != assumption {
                    for &on_neighbour in network.constraints_on(neighbour) {
                        self.work_list.push_back(neighbour, on_neighbour);
                    }
                }
            }
        }
        self.domain_filtering()
    }

    /// True iff some domain is empty.
    pub fn is_contradictory(&self) -> bool {
        self.domains.values().any(|domain| domain.is_empty())
    }

    /// True iff every domain has been reduced to exactly one value.
    pub fn is_solved(&self) -> bool {
        self.domains.values().all(|domain| domain.len() == 1)
    }

    /// The decided value of `id`, or `None` while its domain is not a
    /// singleton.
    pub fn assignment(&self, id: VariableId) -> Option<&V> {
        let domain = self.domains.get(&id)?;
        if domain.len() == 1 {
            domain.front()
        } else {
            None
        }
    }

    /// Minimum-remaining-values choice of the next branch variable: among
    /// variables with more than one candidate left, the one with the smallest
    /// domain, ties broken by declaration order. `None` once every variable
    /// is decided or dead.
    pub fn select_branch_variable(&self) -> Option<VariableId> {
        let mut best: Option<(usize, VariableId)> = None;
        for &variable in self.network.variables() {
            let size = self.domains.get(&variable).unwrap().len();
            if size > 1 && best.map_or(true, |(smallest, _)| size < smallest) {
                best = Some((size, variable));
            }
        }
        best.map(|(_, variable)| variable)
    }

    /// Diagnostic: a constraint counts as satisfied only once every variable
    /// it binds is decided. Progress reporting only; no bearing on
    /// correctness.
    pub fn count_unsatisfied_constraints(&self) -> usize {
        self.network
            .constraints()
            .iter()
            .filter(|constraint| {
                constraint
                    .variables()
                    .iter()
                    .any(|variable| self.domains.get(variable).unwrap().len() != 1)
            })
            .count()
    }

    #[cfg(test)]
    pub(crate) fn pending_revisions(&self) -> usize {
        self.work_list.len()
    }
}

/// Walks the cross product of the candidate slates without materialising it,
/// stopping at the first combination that passes the test.
fn any_combination<V>(slates: &[Vec<&V>], test: impl Fn(&[&V]) -> bool) -> bool {
    if slates.iter().any(|slate| slate.is_empty()) {
        return false;
    }
    let mut cursor = vec![0usize; slates.len()];
    let mut tuple: Vec<&V> = Vec::with_capacity(slates.len());
    loop {
        tuple.clear();
        tuple.extend(cursor.iter().zip(slates).map(|(&i, slate)| slate[i]));
        if test(&tuple) {
            return true;
        }

        // Odometer advance over the slates, rightmost position fastest.
        let mut position = slates.len();
        loop {
            if position == 0 {
                return false;
            }
            position -= 1;
            cursor[position] += 1;
            if cursor[position] < slates[position].len() {
                break;
            }
            cursor[position] = 0;
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use crate::csp::network::ConstraintNetwork;
    use crate::csp::predicate::Predicate;

    fn ring_network() -> ConstraintNetwork<u32> {
        // A-B, B-C, C-D, D-A, three colours each.
        let mut network = ConstraintNetwork::new();
        for id in 0..4 {
            network.add_variable_with_domain(id, 0..3).unwrap();
        }
        for (a, b) in [(0, 1), (1, 2), (2, 3), (3, 0)] {
            network.add_constraint(vec![a, b], Predicate::NotEqual).unwrap();
        }
        network
    }

    #[test]
    fn revise_prunes_unsupported_values() {
        let mut network = ConstraintNetwork::new();
        network.add_variable_with_domain(0, [0u32, 1, 2]).unwrap();
        network.add_variable_with_domain(1, [2u32]).unwrap();
        let c = network.add_constraint(vec![0, 1], Predicate::NotEqual).unwrap();

        let mut instance = network.create_instance();
        assert!(instance.revise(0, c));
        assert_eq!(
            instance.domain(0).unwrap().iter().copied().collect::<Vec<_>>(),
            vec![0, 1]
        );
        // A second pass has nothing left to remove.
        assert!(!instance.revise(0, c));
    }

    #[test]
    fn revise_never_grows_a_domain() {
        let mut instance = ring_network().create_instance();
        let constraints: Vec<_> = instance.network().constraints_on(0).to_vec();
        for c in constraints {
            let before = instance.domain(0).unwrap().len();
            instance.revise(0, c);
            assert!(instance.domain(0).unwrap().len() <= before);
        }
    }

    #[test]
    fn domain_filtering_reaches_a_fixpoint() {
        let mut instance = ring_network().create_instance();
        instance.initialize();
        assert!(instance.domain_filtering());
        assert_eq!(instance.pending_revisions(), 0);

        let snapshot: Vec<Vec<u32>> = (0..4)
            .map(|v| instance.domain(v).unwrap().iter().copied().collect())
            .collect();

        // Re-running the whole drain must change nothing.
        instance.initialize();
        assert!(instance.domain_filtering());
        let after: Vec<Vec<u32>> = (0..4)
            .map(|v| instance.domain(v).unwrap().iter().copied().collect())
            .collect();
        assert_eq!(snapshot, after);
    }

    #[test]
    fn assumption_propagates_through_the_ring() {
        let mut instance = ring_network().create_instance();
        instance.initialize();
        assert!(instance.domain_filtering());

        instance.assume(0, 0);
        assert!(instance.rerun(0));
        // Both neighbours of vertex 0 lose colour 0.
        for neighbour in [1, 3] {
            assert_eq!(
                instance
                    .domain(neighbour)
                    .unwrap()
                    .iter()
                    .copied()
                    .collect::<Vec<_>>(),
                vec![1, 2]
            );
        }
        // The opposite vertex is unconstrained by the assumption.
        assert_eq!(instance.domain(2).unwrap().len(), 3);
    }

    #[test]
    fn contradiction_stops_the_drain_early() {
        // Two variables forced equal and unequal at once.
        let mut network = ConstraintNetwork::new();
        network.add_variable_with_domain(0, [0u32, 1]).unwrap();
        network.add_variable_with_domain(1, [0u32]).unwrap();
        network.add_constraint(vec![0, 1], Predicate::Equal).unwrap();
        network.add_constraint(vec![0, 1], Predicate::NotEqual).unwrap();

        let mut instance = network.create_instance();
        instance.initialize();
        assert!(!instance.domain_filtering());
        assert!(instance.is_contradictory());
        assert_eq!(instance.pending_revisions(), 0);
    }

    #[test]
    fn copies_do_not_share_domains() {
        let mut parent = ring_network().create_instance();
        parent.initialize();
        assert!(parent.domain_filtering());

        let mut child = parent.copy();
        child.assume(0, 1);
        assert!(child.rerun(0));

        assert_eq!(parent.domain(0).unwrap().len(), 3);
        assert_eq!(parent.domain(1).unwrap().len(), 3);
        assert_eq!(child.domain(0).unwrap().len(), 1);
    }

    #[test]
    fn unsatisfied_count_tracks_decided_variables() {
        let mut instance = ring_network().create_instance();
        assert_eq!(instance.count_unsatisfied_constraints(), 4);

        for (variable, colour) in [(0, 0), (1, 1), (2, 0), (3, 1)] {
            instance.assume(variable, colour);
        }
        assert!(instance.is_solved());
        assert_eq!(instance.count_unsatisfied_constraints(), 0);
    }

    #[test]
    fn ternary_constraint_uses_the_full_cross_product() {
        let mut network = ConstraintNetwork::new();
        for id in 0..3 {
            network.add_variable_with_domain(id, [0u32, 1]).unwrap();
        }
        // a + b + c == 2 has no support for any value once b and c are 0.
        let c = network
            .add_constraint(
                vec![0, 1, 2],
                Predicate::custom(|values| values.iter().map(|v| **v).sum::<u32>() == 2),
            )
            .unwrap();

        let mut instance = network.create_instance();
        instance.assume(1, 0);
        instance.assume(2, 0);
        assert!(instance.revise(0, c));
        assert!(instance.is_contradictory());
    }
}
