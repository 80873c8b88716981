use crate::outcome::{ErrorKind, TestError};

pub const PENDING_STEP_DEFINITION_MESSAGE: &str =
    "One or more step definitions are not implemented yet.";

pub const MISSING_STEP_DEFINITION_MESSAGE: &str =
    "No matching step definition found for one or more steps.";

/// Supplies the canonical errors for failure kinds the runner reports
/// without an attached error.
pub trait ErrorProvider: Send + Sync {
    fn pending_step_definition_error(&self) -> TestError;

    fn missing_step_definition_error(&self) -> TestError;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultErrorProvider;

impl ErrorProvider for DefaultErrorProvider {
    fn pending_step_definition_error(&self) -> TestError {
        TestError::new(ErrorKind::PendingStep, PENDING_STEP_DEFINITION_MESSAGE)
    }

    fn missing_step_definition_error(&self) -> TestError {
        TestError::new(
            ErrorKind::MissingStepDefinition,
            MISSING_STEP_DEFINITION_MESSAGE,
        )
    }
}
