use crate::outcome::ExecutionStatus;

/// Errors from mapping an outcome to a wire result.
#[derive(Debug, thiserror::Error)]
pub enum MapError {
    #[error("invalid argument: `{name}` must be present")]
    InvalidArgument { name: &'static str },

    #[error("execution status '{0}' has no terminal result")]
    UnsupportedStatus(ExecutionStatus),
}
