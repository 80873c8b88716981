pub mod diagnostics;
pub mod error;
pub mod mapper;
pub mod outcome;
pub mod provider;

pub use error::MapError;
pub use mapper::ResultMapper;
pub use outcome::{ErrorKind, ExecutionStatus, OutcomeContext, TestError, TestOutcome};
pub use provider::{DefaultErrorProvider, ErrorProvider};
