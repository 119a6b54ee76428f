//! Binds a [`ConstraintInstance`] to the search engine's node contract.
//!
//! Each branching decision is an assumption: one variable's domain is forced
//! down to a single candidate value, and the consequence is propagated
//! through the constraint network before the child ever reaches the
//! frontier. Children whose propagation ends in a contradiction are pruned
//! on the spot and never surface as successors.

use std::fmt::Write as _;

use serde::Serialize;

use crate::csp::{instance::ConstraintInstance, network::VariableId, value::ValueEquality};
use crate::search::node::{SearchNode, StateKey};

/// A search node wrapping one [`ConstraintInstance`].
#[derive(Debug)]
pub struct AssumptionNode<V: ValueEquality> {
    instance: ConstraintInstance<V>,
}

impl<V: ValueEquality> AssumptionNode<V> {
    /// Builds the search root. The instance is filtered to arc-consistency
    /// before the first branching decision, so the root itself already
    /// reflects every inference the constraints allow.
    pub fn root(mut instance: ConstraintInstance<V>) -> Self {
        instance.initialize();
        instance.domain_filtering();
        Self { instance }
    }

    fn from_instance(instance: ConstraintInstance<V>) -> Self {
        Self { instance }
    }

    pub fn instance(&self) -> &ConstraintInstance<V> {
        &self.instance
    }
}

/// Snapshot of an instance for progress reporting: the current value of
/// every decided variable (`None` while undecided) and how many constraints
/// still wait on an undecided variable.
#[derive(Debug, Clone, Serialize)]
pub struct AssignmentReport {
    pub assignments: Vec<(VariableId, Option<String>)>,
    pub unsatisfied: usize,
}

impl<V: ValueEquality> SearchNode for AssumptionNode<V> {
    type Report = AssignmentReport;

    fn generate_successors(&self) -> Vec<Self> {
        let Some(variable) = self.instance.select_branch_variable() else {
            return Vec::new();
        };
        let domain = self.instance.domain(variable).unwrap().clone();

        let mut successors = Vec::new();
        for value in domain.iter() {
            let mut candidate = self.instance.copy();
            candidate.assume(variable, value.clone());
            candidate.rerun(variable);
            if !candidate.is_contradictory() {
                successors.push(Self::from_instance(candidate));
            }
        }
        successors
    }

    /// Aggregate remaining uncertainty: the number of undecided candidate
    /// values summed over all variables. Zero exactly when every variable is
    /// decided. Deliberately not a lower bound on the remaining assumptions,
    /// so best-first mode steers towards small domains rather than cheap
    /// paths.
    fn heuristic(&self) -> u64 {
        self.instance
            .network()
            .variables()
            .iter()
            .map(|&variable| (self.instance.domain(variable).unwrap().len() as u64).saturating_sub(1))
            .sum()
    }

    /// Serializes the domain contents in ascending variable order. Instances
    /// that decided the same values through different assumption orders
    /// produce the same key and merge in the search graph.
    fn identity(&self) -> StateKey {
        let mut variables: Vec<VariableId> = self.instance.network().variables().to_vec();
        variables.sort_unstable();

        let mut key = String::new();
        for variable in variables {
            let _ = write!(key, "{variable}:");
            for value in self.instance.domain(variable).unwrap().iter() {
                let _ = write!(key, "{value:?},");
            }
            key.push(';');
        }
        StateKey::new(key)
    }

    /// One assumption, one unit of work.
    fn arc_cost(&self, _child: &Self) -> u64 {
        1
    }

    fn is_solution(&self) -> bool {
        self.instance.is_solved()
    }

    fn report(&self) -> AssignmentReport {
        let mut variables: Vec<VariableId> = self.instance.network().variables().to_vec();
        variables.sort_unstable();
        AssignmentReport {
            assignments: variables
                .into_iter()
                .map(|variable| {
                    let value = self
                        .instance
                        .assignment(variable)
                        .map(|value| format!("{value:?}"));
                    (variable, value)
                })
                .collect(),
            unsatisfied: self.instance.count_unsatisfied_constraints(),
        }
    }
}
