//! Faults and the per-request translation state machine
//!
//! A [`Fault`] is the single catch-all failure value produced when the rest of
//! the chain does not complete normally. Whatever went wrong (a returned error,
//! a panic inside a handler, a service that never became ready) collapses into
//! one description string.
//!
//! ```text
//!             ┌──────────────► PASSED_THROUGH
//! DELEGATED ──┤
//!             └──────────────► TRANSLATED
//! ```

use crate::interceptor::InterceptorError;
use std::any::Any;
use strum_macros::Display;

/// Description used when a panic payload is neither `&str` nor `String`
pub const OPAQUE_PANIC_DESCRIPTION: &str = "request handler panicked";

/// Where a fault came from. Only used for logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "snake_case")]
pub enum FaultOrigin {
    Error,
    Panic,
}

/// State of a single request as it moves through the translation step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum Outcome {
    /// The continuation is running
    Delegated,
    /// The continuation succeeded and its response was returned untouched
    PassedThrough,
    /// The continuation failed and the error response was written
    Translated,
}

/// An unhandled failure raised while processing a request
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{description}")]
pub struct Fault {
    description: String,
    origin: FaultOrigin,
}

impl Fault {
    /// Create a fault with the given description
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            origin: FaultOrigin::Error,
        }
    }

    /// Build a fault from an error returned by the chain.
    ///
    /// Only the top-level `Display` output is kept; source chains are not walked.
    pub fn from_error(error: InterceptorError) -> Self {
        Self::new(error.to_string())
    }

    /// Build a fault from a caught panic payload
    pub fn from_panic(payload: Box<dyn Any + Send>) -> Self {
        let description = if let Some(message) = payload.downcast_ref::<&str>() {
            (*message).to_string()
        } else if let Some(message) = payload.downcast_ref::<String>() {
            message.clone()
        } else {
            OPAQUE_PANIC_DESCRIPTION.to_string()
        };

        Self {
            description,
            origin: FaultOrigin::Panic,
        }
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn origin(&self) -> FaultOrigin {
        self.origin
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_from_error_keeps_display_output() {
        let error: InterceptorError = Box::new(io::Error::other("Resource not found"));
        let fault = Fault::from_error(error);

        assert_eq!(fault.description(), "Resource not found");
        assert_eq!(fault.origin(), FaultOrigin::Error);
        assert_eq!(fault.to_string(), "Resource not found");
    }

    #[test]
    fn test_from_panic_payloads() {
        let fault = Fault::from_panic(Box::new("static message"));
        assert_eq!(fault.description(), "static message");
        assert_eq!(fault.origin(), FaultOrigin::Panic);

        let fault = Fault::from_panic(Box::new(String::from("formatted 42")));
        assert_eq!(fault.description(), "formatted 42");

        let fault = Fault::from_panic(Box::new(42_u32));
        assert_eq!(fault.description(), OPAQUE_PANIC_DESCRIPTION);
    }

    #[test]
    fn test_outcome_display() {
        assert_eq!(Outcome::Delegated.to_string(), "DELEGATED");
        assert_eq!(Outcome::PassedThrough.to_string(), "PASSED_THROUGH");
        assert_eq!(Outcome::Translated.to_string(), "TRANSLATED");
        assert_eq!(FaultOrigin::Panic.to_string(), "panic");
    }
}
