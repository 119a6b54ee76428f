use std::sync::Arc;

use im::{HashMap, Vector};

use crate::{
    csp::{
        constraint::Constraint, instance::ConstraintInstance, predicate::Predicate,
        value::ValueEquality,
    },
    error::{NetworkError, Result},
};

pub type VariableId = u32;
pub type ConstraintId = usize;

/// The static definition of a problem: the set of variables, each variable's
/// declared domain, and the variable-to-constraints index.
///
/// A network is built once per problem and never mutated after setup. Every
/// [`ConstraintInstance`] derived from it shares the network read-only and
/// owns only its private copy of the domains.
#[derive(Debug, Clone, Default)]
pub struct ConstraintNetwork<V: ValueEquality> {
    variables: Vec<VariableId>,
    domains: HashMap<VariableId, Vector<V>>,
    constraints: Vec<Constraint<V>>,
    by_variable: HashMap<VariableId, Vec<ConstraintId>>,
}

impl<V: ValueEquality> ConstraintNetwork<V> {
    pub fn new() -> Self {
        Self {
            variables: Vec::new(),
            domains: HashMap::new(),
            constraints: Vec::new(),
            by_variable: HashMap::new(),
        }
    }

    /// Declares a new variable with an empty domain. Until [`set_domain`]
    /// runs, any instance spawned from the network is contradictory.
    ///
    /// [`set_domain`]: ConstraintNetwork::set_domain
    pub fn add_variable(&mut self, id: VariableId) -> Result<()> {
        if self.variables.contains(&id) {
            return Err(NetworkError::DuplicateVariable(id).into());
        }
        self.variables.push(id);
        self.domains.insert(id, Vector::new());
        self.by_variable.insert(id, Vec::new());
        Ok(())
    }

    /// Replaces the declared domain of `id` with `values`, kept in the order
    /// given.
    pub fn set_domain(&mut self, id: VariableId, values: impl IntoIterator<Item = V>) -> Result<()> {
        self.check_variable(id)?;
        self.domains.insert(id, values.into_iter().collect());
        Ok(())
    }

    /// Convenience for the common declare-then-set sequence.
    pub fn add_variable_with_domain(
        &mut self,
        id: VariableId,
        values: impl IntoIterator<Item = V>,
    ) -> Result<()> {
        self.add_variable(id)?;
        self.set_domain(id, values)
    }

    /// Registers a constraint binding `variables` in the given order. The
    /// constraint is indexed against every variable it binds.
    pub fn add_constraint(
        &mut self,
        variables: Vec<VariableId>,
        predicate: Predicate<V>,
    ) -> Result<ConstraintId> {
        if variables.is_empty() {
            return Err(NetworkError::EmptyConstraint.into());
        }
        for &id in &variables {
            self.check_variable(id)?;
        }

        let constraint_id = self.constraints.len();
        for &id in &variables {
            self.by_variable.get_mut(&id).unwrap().push(constraint_id);
        }
        self.constraints.push(Constraint::new(variables, predicate));
        Ok(constraint_id)
    }

    fn check_variable(&self, id: VariableId) -> Result<()> {
        if self.by_variable.contains_key(&id) {
            Ok(())
        } else {
            Err(NetworkError::UnknownVariable(id).into())
        }
    }

    /// Variables in declaration order. This order is the tie-break used by
    /// branch-variable selection.
    pub fn variables(&self) -> &[VariableId] {
        &self.variables
    }

    pub fn constraint(&self, id: ConstraintId) -> &Constraint<V> {
        &self.constraints[id]
    }

    pub fn constraints(&self) -> &[Constraint<V>] {
        &self.constraints
    }

    /// Ids of every constraint that binds `id`.
    pub fn constraints_on(&self, id: VariableId) -> &[ConstraintId] {
        self.by_variable.get(&id).map_or(&[], |ids| ids.as_slice())
    }

    pub(crate) fn initial_domains(&self) -> HashMap<VariableId, Vector<V>> {
        self.domains.clone()
    }

    /// Wraps the finished network in a shared handle and spawns the root
    /// instance with a copy of the declared domains.
    pub fn create_instance(self) -> ConstraintInstance<V> {
        ConstraintInstance::root(Arc::new(self))
    }
}

#[cfg(test)]
mod tests {
    use super::ConstraintNetwork;
    use crate::csp::predicate::Predicate;
    use crate::error::{Error, NetworkError};

    fn inner(error: Error) -> NetworkError {
        let Error::Inner { inner, .. } = error;
        *inner
    }

    #[test]
    fn domain_for_unknown_variable_is_rejected() {
        let mut network: ConstraintNetwork<u32> = ConstraintNetwork::new();
        let error = network.set_domain(7, [1, 2]).unwrap_err();
        assert!(matches!(inner(error), NetworkError::UnknownVariable(7)));
    }

    #[test]
    fn constraint_on_unknown_variable_is_rejected() {
        let mut network: ConstraintNetwork<u32> = ConstraintNetwork::new();
        network.add_variable_with_domain(0, [1, 2]).unwrap();
        let error = network
            .add_constraint(vec![0, 9], Predicate::NotEqual)
            .unwrap_err();
        assert!(matches!(inner(error), NetworkError::UnknownVariable(9)));
    }

    #[test]
    fn duplicate_variable_is_rejected() {
        let mut network: ConstraintNetwork<u32> = ConstraintNetwork::new();
        network.add_variable(0).unwrap();
        let error = network.add_variable(0).unwrap_err();
        assert!(matches!(inner(error), NetworkError::DuplicateVariable(0)));
    }

    #[test]
    fn empty_constraint_is_rejected() {
        let mut network: ConstraintNetwork<u32> = ConstraintNetwork::new();
        let error = network
            .add_constraint(Vec::new(), Predicate::NotEqual)
            .unwrap_err();
        assert!(matches!(inner(error), NetworkError::EmptyConstraint));
    }

    #[test]
    fn constraints_are_indexed_against_every_bound_variable() {
        let mut network: ConstraintNetwork<u32> = ConstraintNetwork::new();
        for id in 0..3 {
            network.add_variable_with_domain(id, [0, 1]).unwrap();
        }
        let c0 = network.add_constraint(vec![0, 1], Predicate::NotEqual).unwrap();
        let c1 = network.add_constraint(vec![1, 2], Predicate::NotEqual).unwrap();

        assert_eq!(network.constraints_on(0), &[c0]);
        assert_eq!(network.constraints_on(1), &[c0, c1]);
        assert_eq!(network.constraints_on(2), &[c1]);
    }
}
