//! The constraint propagation layer: the static problem definition
//! ([`network::ConstraintNetwork`]) and the per-branch mutable state that
//! runs the arc-consistency fixpoint ([`instance::ConstraintInstance`]).

pub mod constraint;
pub mod instance;
pub mod network;
pub mod predicate;
pub mod value;
pub mod work_list;
