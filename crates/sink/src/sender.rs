use std::time::SystemTime;

use cukelog_messages::{Envelope, MessageFactory, Status, TestResult};
use cukelog_results::{OutcomeContext, ResultMapper, TestOutcome};

use crate::error::SendError;
use crate::sink::ProtobufFileSink;

/// Convenience wrapper for recording a test run through a sink.
///
/// Builds each message with [`MessageFactory`], maps outcomes with the
/// [`ResultMapper`], wraps everything in an [`Envelope`] and initializes the
/// sink on first use.
pub struct MessageSender {
    sink: ProtobufFileSink,
    mapper: ResultMapper,
    factory: MessageFactory,
}

impl MessageSender {
    pub fn new(sink: ProtobufFileSink, mapper: ResultMapper) -> Self {
        Self {
            sink,
            mapper,
            factory: MessageFactory::new(),
        }
    }

    pub fn sink(&self) -> &ProtobufFileSink {
        &self.sink
    }

    /// # Errors
    /// Returns `SendError` if the sink cannot be opened or written.
    pub fn send_test_run_started(&mut self, at: SystemTime) -> Result<(), SendError> {
        let msg = self.factory.test_run_started(at);
        self.send(msg.into())
    }

    /// Record the start of a test case and return its started id, which the
    /// matching finish must carry.
    ///
    /// # Errors
    /// Returns `SendError` if the sink cannot be opened or written.
    pub fn send_test_case_started(
        &mut self,
        at: SystemTime,
        pickle_id: &str,
    ) -> Result<String, SendError> {
        let msg = self.factory.test_case_started(at, pickle_id);
        let id = msg.id.clone();
        self.send(msg.into())?;
        Ok(id)
    }

    /// Map the scenario context and record the finished test case.
    ///
    /// # Errors
    /// - `SendError::Map` when the context is absent or not terminal; nothing
    ///   is written.
    /// - `SendError::SinkUnavailable` / `SendError::Write` from the sink.
    pub fn send_test_case_finished(
        &mut self,
        at: SystemTime,
        pickle_id: &str,
        test_case_started_id: &str,
        context: Option<&OutcomeContext>,
    ) -> Result<Status, SendError> {
        let result = self.mapper.map_from_context(context)?;
        self.send_result(at, pickle_id, test_case_started_id, result)
    }

    /// Record a finished test case whose outcome is already classified.
    ///
    /// # Errors
    /// Returns `SendError` if the sink cannot be opened or written.
    pub fn send_outcome(
        &mut self,
        at: SystemTime,
        pickle_id: &str,
        test_case_started_id: &str,
        outcome: &TestOutcome,
    ) -> Result<Status, SendError> {
        let result = self.mapper.map_outcome(outcome)?;
        self.send_result(at, pickle_id, test_case_started_id, result)
    }

    /// # Errors
    /// Returns `SendError` if the sink cannot be opened or written.
    pub fn send_test_run_finished(&mut self, at: SystemTime, success: bool) -> Result<(), SendError> {
        let msg = self.factory.test_run_finished(at, success);
        self.send(msg.into())
    }

    pub fn dispose(&mut self) {
        self.sink.dispose();
    }

    fn send_result(
        &mut self,
        at: SystemTime,
        pickle_id: &str,
        test_case_started_id: &str,
        result: TestResult,
    ) -> Result<Status, SendError> {
        let status = result.checked_status()?;
        let msg = self
            .factory
            .test_case_finished(at, pickle_id, test_case_started_id, result);
        self.send(msg.into())?;
        Ok(status)
    }

    fn send(&mut self, envelope: Envelope) -> Result<(), SendError> {
        if !self.sink.ensure_is_initialized() {
            return Err(SendError::SinkUnavailable {
                path: self.sink.channel().path().to_path_buf(),
            });
        }
        self.sink.try_write_message(&envelope)?;
        tracing::debug!(kind = envelope.kind(), "message sent");
        Ok(())
    }
}
