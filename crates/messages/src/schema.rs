//! Messages written to the test-run log.
//!
//! Field tags are the on-disk contract with reporting tools. Retire a field
//! by reserving its tag, never by renumbering.

use crate::error::MessageError;
use crate::status::Status;
use crate::timestamp::Timestamp;

/// Emitted once, before any test case runs.
#[derive(Clone, PartialEq, prost::Message)]
pub struct TestRunStarted {
    #[prost(message, optional, tag = "1")]
    pub timestamp: Option<Timestamp>,
}

/// Emitted when a test case (one pickle execution) begins.
#[derive(Clone, PartialEq, prost::Message)]
pub struct TestCaseStarted {
    #[prost(message, optional, tag = "1")]
    pub timestamp: Option<Timestamp>,

    #[prost(string, tag = "2")]
    pub pickle_id: String,

    /// Unique per started test case; `TestCaseFinished` refers back to it.
    #[prost(string, tag = "3")]
    pub id: String,
}

/// Outcome of a single test case.
///
/// `status` holds a [`Status`] wire value. Use [`TestResult::checked_status`]
/// to read it; out-of-range values are an error, not a default.
#[derive(Clone, PartialEq, prost::Message)]
pub struct TestResult {
    #[prost(enumeration = "Status", tag = "1")]
    pub status: i32,

    #[prost(string, tag = "2")]
    pub message: String,

    #[prost(uint64, tag = "3")]
    pub duration_nanoseconds: u64,
}

impl TestResult {
    pub fn new(status: Status, duration_nanoseconds: u64, message: impl Into<String>) -> Self {
        Self {
            status: status as i32,
            message: message.into(),
            duration_nanoseconds,
        }
    }

    /// Decode the status field.
    ///
    /// # Errors
    /// Returns `MessageError::UnknownStatus` if the wire value is not one of
    /// the five terminal statuses.
    pub fn checked_status(&self) -> Result<Status, MessageError> {
        Status::try_from(self.status).map_err(|_| MessageError::UnknownStatus(self.status))
    }
}

/// Emitted when a test case completes, carrying its result.
#[derive(Clone, PartialEq, prost::Message)]
pub struct TestCaseFinished {
    #[prost(message, optional, tag = "1")]
    pub timestamp: Option<Timestamp>,

    #[prost(string, tag = "2")]
    pub pickle_id: String,

    #[prost(message, optional, tag = "3")]
    pub test_result: Option<TestResult>,

    #[prost(string, tag = "4")]
    pub test_case_started_id: String,
}

/// Emitted once, after the last test case.
#[derive(Clone, PartialEq, prost::Message)]
pub struct TestRunFinished {
    #[prost(message, optional, tag = "1")]
    pub timestamp: Option<Timestamp>,

    #[prost(bool, tag = "2")]
    pub success: bool,
}

/// One record of the log. Every framed record on disk is an `Envelope`.
#[derive(Clone, PartialEq, prost::Message)]
pub struct Envelope {
    #[prost(oneof = "envelope::Message", tags = "12, 13, 14, 15")]
    pub message: Option<envelope::Message>,
}

pub mod envelope {
    #[derive(Clone, PartialEq, prost::Oneof)]
    pub enum Message {
        #[prost(message, tag = "12")]
        TestRunStarted(super::TestRunStarted),

        #[prost(message, tag = "13")]
        TestCaseStarted(super::TestCaseStarted),

        #[prost(message, tag = "14")]
        TestCaseFinished(super::TestCaseFinished),

        #[prost(message, tag = "15")]
        TestRunFinished(super::TestRunFinished),
    }

    impl Message {
        /// Short name used in log fields.
        pub fn kind(&self) -> &'static str {
            match self {
                Self::TestRunStarted(_) => "test_run_started",
                Self::TestCaseStarted(_) => "test_case_started",
                Self::TestCaseFinished(_) => "test_case_finished",
                Self::TestRunFinished(_) => "test_run_finished",
            }
        }
    }
}

impl Envelope {
    /// The wrapped message.
    ///
    /// # Errors
    /// Returns `MessageError::MissingMessage` for an empty envelope, which
    /// only appears when decoding a record written by a newer schema.
    pub fn payload(&self) -> Result<&envelope::Message, MessageError> {
        self.message.as_ref().ok_or(MessageError::MissingMessage)
    }

    pub fn kind(&self) -> &'static str {
        self.message.as_ref().map_or("empty", envelope::Message::kind)
    }
}

macro_rules! envelope_from {
    ($($variant:ident),+ $(,)?) => {
        $(
            impl From<$variant> for Envelope {
                fn from(message: $variant) -> Self {
                    Self {
                        message: Some(envelope::Message::$variant(message)),
                    }
                }
            }
        )+
    };
}

envelope_from!(
    TestRunStarted,
    TestCaseStarted,
    TestCaseFinished,
    TestRunFinished
);
