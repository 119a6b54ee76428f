use std::fmt;
use std::sync::Arc;

use crate::csp::value::ValueEquality;

/// A statically-typed test over an ordered tuple of candidate values.
///
/// A predicate on its own is meaningless; it gains meaning when a
/// [`Constraint`](crate::csp::constraint::Constraint) pairs it with the
/// ordered list of variables it binds. `evaluate` receives exactly one value
/// per bound variable, in the order the variables were listed when the
/// constraint was registered.
#[derive(Clone)]
pub enum Predicate<V: ValueEquality> {
    /// Satisfied when no two of the bound values are equal. For the common
    /// binary case this is plain `a != b`.
    NotEqual,
    /// Satisfied when every bound value is equal.
    Equal,
    /// An arbitrary test supplied by the caller.
    Custom(Arc<dyn Fn(&[&V]) -> bool + Send + Sync>),
}

impl<V: ValueEquality> Predicate<V> {
    /// Wraps a closure as a [`Predicate::Custom`].
    pub fn custom(test: impl Fn(&[&V]) -> bool + Send + Sync + 'static) -> Self {
        Predicate::Custom(Arc::new(test))
    }

    /// Applies the predicate to one candidate value per bound variable.
    pub fn evaluate(&self, values: &[&V]) -> bool {
        match self {
            Predicate::NotEqual => values
                .iter()
                .enumerate()
                .all(|(i, a)| values[i + 1..].iter().all(|b| a != b)),
            Predicate::Equal => values.windows(2).all(|pair| pair[0] == pair[1]),
            Predicate::Custom(test) => test(values),
        }
    }

    /// A short name for diagnostics.
    pub fn name(&self) -> &'static str {
        match self {
            Predicate::NotEqual => "NotEqual",
            Predicate::Equal => "Equal",
            Predicate::Custom(_) => "Custom",
        }
    }
}

impl<V: ValueEquality> fmt::Debug for Predicate<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Predicate::NotEqual => f.write_str("NotEqual"),
            Predicate::Equal => f.write_str("Equal"),
            Predicate::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}
