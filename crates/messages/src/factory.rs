use std::time::SystemTime;

use crate::schema::{TestCaseFinished, TestCaseStarted, TestResult, TestRunFinished, TestRunStarted};
use crate::timestamp::Timestamp;

/// Builds the run and test-case messages written to the log.
///
/// Stateless; the caller supplies the clock reading so runs can be replayed
/// with fixed timestamps. Every message converts into an `Envelope`.
#[derive(Debug, Clone, Copy, Default)]
pub struct MessageFactory;

impl MessageFactory {
    pub fn new() -> Self {
        Self
    }

    pub fn test_run_started(&self, at: SystemTime) -> TestRunStarted {
        TestRunStarted {
            timestamp: Some(Timestamp::from(at)),
        }
    }

    /// Start a test case for `pickle_id`. A fresh ULID becomes the started id.
    pub fn test_case_started(&self, at: SystemTime, pickle_id: impl Into<String>) -> TestCaseStarted {
        TestCaseStarted {
            timestamp: Some(Timestamp::from(at)),
            pickle_id: pickle_id.into(),
            id: ulid::Ulid::new().to_string(),
        }
    }

    pub fn test_case_finished(
        &self,
        at: SystemTime,
        pickle_id: impl Into<String>,
        test_case_started_id: impl Into<String>,
        result: TestResult,
    ) -> TestCaseFinished {
        TestCaseFinished {
            timestamp: Some(Timestamp::from(at)),
            pickle_id: pickle_id.into(),
            test_result: Some(result),
            test_case_started_id: test_case_started_id.into(),
        }
    }

    pub fn test_run_finished(&self, at: SystemTime, success: bool) -> TestRunFinished {
        TestRunFinished {
            timestamp: Some(Timestamp::from(at)),
            success,
        }
    }
}
