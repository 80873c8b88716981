mod error;
mod factory;
pub mod framing;
mod schema;
mod status;
mod timestamp;

pub use error::MessageError;
pub use factory::MessageFactory;
pub use schema::{
    Envelope, TestCaseFinished, TestCaseStarted, TestResult, TestRunFinished, TestRunStarted,
    envelope,
};
pub use status::Status;
pub use timestamp::Timestamp;
