//! Human-readable result messages, one builder per non-passing status.

use crate::outcome::TestError;
use crate::provider::ErrorProvider;

/// Message for a failed scenario: the error text, then its stack trace.
pub fn failure_message(error: Option<&TestError>) -> String {
    match error {
        Some(TestError {
            message,
            stack_trace: Some(trace),
            ..
        }) if !trace.is_empty() => format!("{message}\n{trace}"),
        Some(error) => error.message.clone(),
        None => String::new(),
    }
}

/// Message for a pending scenario. Without an attached error the provider's
/// canonical pending-step error is used.
pub fn pending_message(error: Option<&TestError>, provider: &dyn ErrorProvider) -> String {
    match error {
        Some(error) => error.message.clone(),
        None => provider.pending_step_definition_error().message,
    }
}

pub fn ambiguous_message(error: Option<&TestError>) -> String {
    error.map(|e| e.message.clone()).unwrap_or_default()
}

/// Message for a scenario with unbound steps.
pub fn undefined_message(error: Option<&TestError>, provider: &dyn ErrorProvider) -> String {
    match error {
        Some(error) => error.message.clone(),
        None => provider.missing_step_definition_error().message,
    }
}
