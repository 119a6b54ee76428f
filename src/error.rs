use std::backtrace::Backtrace;

use crate::csp::network::VariableId;

pub type Result<T, E = Error> = core::result::Result<T, E>;

/// Failures raised while assembling a constraint network.
///
/// These are all fail-fast construction errors: a problem that references a
/// variable it never declared is malformed and must be rejected before any
/// propagation or search state exists.
#[derive(Debug, thiserror::Error)]
pub enum NetworkError {
    #[error("variable {0} not found in network")]
    UnknownVariable(VariableId),
    #[error("variable {0} is already declared")]
    DuplicateVariable(VariableId),
    #[error("constraint binds no variables")]
    EmptyConstraint,
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Inner: {inner}\n{backtrace}")]
    Inner {
        inner: Box<NetworkError>,
        backtrace: Box<Backtrace>,
    },
}

impl From<NetworkError> for Error {
    fn from(inner: NetworkError) -> Self {
        Error::Inner {
            inner: Box::new(inner),
            backtrace: Box::new(std::backtrace::Backtrace::capture()),
        }
    }
}
