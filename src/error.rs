//! Dispatch error taxonomy.
//!
//! Every failure the engine can surface is one of a small set of typed
//! variants, so callers can pattern-match on the failure kind instead of
//! inspecting a generic error. Failures raised inside an invoked method body
//! travel through the engine unchanged.

use std::fmt;

/// Errors during method resolution and invocation.
#[derive(Debug, Clone)]
pub enum DispatchError {
    /// No candidate matched under any resolution phase or name.
    MethodNotFound { name: String },

    /// The resolved method is not invocable under the access rules.
    AccessDenied { method: String },

    /// The invoked method body itself raised.
    Invocation { message: String },

    /// A method name pattern failed to compile.
    InvalidPattern(regex::Error),
}

impl DispatchError {
    /// Failure raised from inside a method body.
    pub fn invocation(message: impl Into<String>) -> Self {
        Self::Invocation {
            message: message.into(),
        }
    }

    /// True for the recoverable "no match" failure kind.
    #[inline]
    pub fn is_method_not_found(&self) -> bool {
        matches!(self, Self::MethodNotFound { .. })
    }
}

impl fmt::Display for DispatchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MethodNotFound { name } => {
                write!(f, "no matching method: {}", name)
            }
            Self::AccessDenied { method } => {
                write!(f, "access denied to method '{}'", method)
            }
            Self::Invocation { message } => write!(f, "{}", message),
            Self::InvalidPattern(err) => {
                write!(f, "invalid method name pattern: {}", err)
            }
        }
    }
}

impl std::error::Error for DispatchError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::InvalidPattern(err) => Some(err),
            _ => None,
        }
    }
}

/// Result type for dispatch operations.
pub type DispatchResult<T> = Result<T, DispatchError>;
