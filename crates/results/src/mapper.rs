use std::sync::Arc;

use cukelog_messages::{Status, TestResult};

use crate::diagnostics;
use crate::error::MapError;
use crate::outcome::{ErrorKind, ExecutionStatus, OutcomeContext, TestOutcome};
use crate::provider::ErrorProvider;

/// Converts finished-test outcomes into wire `TestResult`s.
///
/// Every mapping carries exactly one status and always sets duration and
/// message, using zero and the empty string rather than leaving them out.
pub struct ResultMapper {
    error_provider: Arc<dyn ErrorProvider>,
}

impl ResultMapper {
    pub fn new(error_provider: Arc<dyn ErrorProvider>) -> Self {
        Self { error_provider }
    }

    pub fn error_provider(&self) -> &Arc<dyn ErrorProvider> {
        &self.error_provider
    }

    /// # Errors
    /// Never fails; the `Result` keeps every mapping composable with
    /// [`ResultMapper::map_from_context`].
    pub fn map_passed(&self, duration_nanoseconds: u64) -> Result<TestResult, MapError> {
        Ok(TestResult::new(Status::Passed, duration_nanoseconds, ""))
    }

    /// # Errors
    /// Never fails.
    pub fn map_failed(
        &self,
        duration_nanoseconds: u64,
        message: impl Into<String>,
    ) -> Result<TestResult, MapError> {
        Ok(TestResult::new(Status::Failed, duration_nanoseconds, message))
    }

    /// # Errors
    /// Never fails.
    pub fn map_pending(
        &self,
        duration_nanoseconds: u64,
        message: impl Into<String>,
    ) -> Result<TestResult, MapError> {
        Ok(TestResult::new(Status::Pending, duration_nanoseconds, message))
    }

    /// # Errors
    /// Never fails.
    pub fn map_ambiguous(
        &self,
        duration_nanoseconds: u64,
        message: impl Into<String>,
    ) -> Result<TestResult, MapError> {
        Ok(TestResult::new(
            Status::Ambiguous,
            duration_nanoseconds,
            message,
        ))
    }

    /// # Errors
    /// Never fails.
    pub fn map_undefined(
        &self,
        duration_nanoseconds: u64,
        message: impl Into<String>,
    ) -> Result<TestResult, MapError> {
        Ok(TestResult::new(
            Status::Undefined,
            duration_nanoseconds,
            message,
        ))
    }

    /// Map an outcome whose status is already one of the five terminal kinds.
    ///
    /// A pending outcome with neither message nor cause gets the provider's
    /// canonical pending-step message.
    ///
    /// # Errors
    /// Never fails for a well-formed `TestOutcome`.
    pub fn map_outcome(&self, outcome: &TestOutcome) -> Result<TestResult, MapError> {
        let duration = outcome.duration_nanoseconds;
        let message = outcome.message.clone();
        match outcome.status {
            Status::Passed => self.map_passed(duration),
            Status::Failed => self.map_failed(duration, message),
            Status::Pending if message.is_empty() => self.map_pending(
                duration,
                diagnostics::pending_message(
                    outcome.cause.as_ref(),
                    self.error_provider.as_ref(),
                ),
            ),
            Status::Pending => self.map_pending(duration, message),
            Status::Ambiguous => self.map_ambiguous(duration, message),
            Status::Undefined => self.map_undefined(duration, message),
        }
    }

    /// Map the current scenario context.
    ///
    /// # Errors
    /// - `MapError::InvalidArgument` when `context` is `None`.
    /// - `MapError::UnsupportedStatus` when the scenario did not reach a
    ///   terminal state (skipped).
    pub fn map_from_context(
        &self,
        context: Option<&OutcomeContext>,
    ) -> Result<TestResult, MapError> {
        let Some(context) = context else {
            return Err(MapError::InvalidArgument { name: "context" });
        };

        let duration = context.duration_nanoseconds();
        let error = context.test_error.as_ref();
        let provider = self.error_provider.as_ref();

        match context.execution_status {
            ExecutionStatus::Ok => self.map_passed(duration),
            ExecutionStatus::TestError => {
                self.map_failed(duration, diagnostics::failure_message(error))
            }
            ExecutionStatus::StepDefinitionPending => {
                self.map_pending(duration, diagnostics::pending_message(error, provider))
            }
            ExecutionStatus::BindingError => match error {
                Some(e) if e.kind == ErrorKind::AmbiguousBinding => {
                    self.map_ambiguous(duration, diagnostics::ambiguous_message(error))
                }
                _ => self.map_failed(duration, diagnostics::failure_message(error)),
            },
            ExecutionStatus::UndefinedStep => {
                self.map_undefined(duration, diagnostics::undefined_message(error, provider))
            }
            status @ ExecutionStatus::Skipped => {
                tracing::error!(%status, "scenario has no terminal result");
                Err(MapError::UnsupportedStatus(status))
            }
        }
    }
}
