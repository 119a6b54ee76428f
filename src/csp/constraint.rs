use crate::csp::{network::VariableId, predicate::Predicate, value::ValueEquality};

/// Human-readable identification for a constraint, used in diagnostics.
#[derive(Debug, Clone)]
pub struct ConstraintDescriptor {
    pub name: String,
    pub description: String,
}

/// A rule over an ordered tuple of variables.
///
/// Constraints are immutable after construction and shared read-only by
/// every [`ConstraintInstance`](crate::csp::instance::ConstraintInstance)
/// spawned from one network. The variable order is significant: it is the
/// order in which values are handed to the predicate.
#[derive(Debug, Clone)]
pub struct Constraint<V: ValueEquality> {
    variables: Vec<VariableId>,
    predicate: Predicate<V>,
}

impl<V: ValueEquality> Constraint<V> {
    pub(crate) fn new(variables: Vec<VariableId>, predicate: Predicate<V>) -> Self {
        Self {
            variables,
            predicate,
        }
    }

    /// The ordered list of variables the constraint binds.
    pub fn variables(&self) -> &[VariableId] {
        &self.variables
    }

    pub fn predicate(&self) -> &Predicate<V> {
        &self.predicate
    }

    pub fn descriptor(&self) -> ConstraintDescriptor {
        let bound = self
            .variables
            .iter()
            .map(|v| format!("?{v}"))
            .collect::<Vec<_>>()
            .join(", ");
        ConstraintDescriptor {
            name: self.predicate.name().to_string(),
            description: format!("{}({bound})", self.predicate.name()),
        }
    }
}
