use std::time::Duration;

use cukelog_messages::Status;

/// How a scenario ended, as reported by the runner.
///
/// Wider than [`Status`]: `Skipped` is an execution state with no terminal
/// result and is rejected by the mapper.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExecutionStatus {
    Ok,
    StepDefinitionPending,
    UndefinedStep,
    BindingError,
    TestError,
    Skipped,
}

impl ExecutionStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Ok => "ok",
            Self::StepDefinitionPending => "step_definition_pending",
            Self::UndefinedStep => "undefined_step",
            Self::BindingError => "binding_error",
            Self::TestError => "test_error",
            Self::Skipped => "skipped",
        }
    }
}

impl std::fmt::Display for ExecutionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classification of the error that ended a scenario.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    #[default]
    Generic,
    PendingStep,
    AmbiguousBinding,
    MissingStepDefinition,
}

/// Error captured while running a scenario.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct TestError {
    #[serde(default)]
    pub kind: ErrorKind,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stack_trace: Option<String>,
}

impl TestError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            stack_trace: None,
        }
    }

    #[must_use]
    pub fn with_stack_trace(mut self, stack_trace: impl Into<String>) -> Self {
        self.stack_trace = Some(stack_trace.into());
        self
    }
}

impl std::fmt::Display for TestError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

/// Finished test with its terminal status already decided.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestOutcome {
    pub status: Status,
    pub duration_nanoseconds: u64,
    pub message: String,
    pub cause: Option<TestError>,
}

impl TestOutcome {
    pub fn new(status: Status, duration_nanoseconds: u64, message: impl Into<String>) -> Self {
        Self {
            status,
            duration_nanoseconds,
            message: message.into(),
            cause: None,
        }
    }

    #[must_use]
    pub fn with_cause(mut self, cause: TestError) -> Self {
        self.cause = Some(cause);
        self
    }
}

/// State of the current scenario at the moment it finished.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct OutcomeContext {
    pub execution_status: ExecutionStatus,
    pub duration: Duration,
    #[serde(default)]
    pub test_error: Option<TestError>,
}

impl OutcomeContext {
    pub fn new(execution_status: ExecutionStatus, duration: Duration) -> Self {
        Self {
            execution_status,
            duration,
            test_error: None,
        }
    }

    #[must_use]
    pub fn with_error(mut self, error: TestError) -> Self {
        self.test_error = Some(error);
        self
    }

    pub fn duration_nanoseconds(&self) -> u64 {
        duration_nanoseconds(self.duration)
    }
}

/// Whole nanoseconds in `duration`, saturating at `u64::MAX` (about 584 years).
pub fn duration_nanoseconds(duration: Duration) -> u64 {
    u64::try_from(duration.as_nanos()).unwrap_or(u64::MAX)
}
