//! Error handling for streamable-rs
//!
//! This module defines the error taxonomy shared by pipeline construction,
//! evaluation and configuration, plus a Result alias used across the crate.

use crate::stream::id::UnitId;
use thiserror::Error;

/// Main error type for streamable-rs operations
#[derive(Error, Debug)]
pub enum StreamError {
    /// A producer yielded something that cannot be called where a callable was required
    #[error("Contract violation: expected a callable, found {found}")]
    NotInvocable { found: &'static str },

    /// An invocable was called with the wrong number of arguments
    #[error("Contract violation: {callee} takes {expected} argument(s), called with {got}")]
    Arity {
        callee: String,
        expected: usize,
        got: usize,
    },

    /// A value had the wrong kind for the operation applied to it
    #[error("Contract violation: expected {expected}, found {found}")]
    TypeMismatch {
        expected: &'static str,
        found: &'static str,
    },

    /// A user-supplied receiver failed
    #[error("Receiver '{receiver}' failed: {source}")]
    Receiver {
        receiver: String,
        #[source]
        source: anyhow::Error,
    },

    /// A concurrent unit panicked before producing its result
    #[error("Concurrent unit {unit} panicked: {message}")]
    Panicked { unit: UnitId, message: String },

    /// A concurrent unit finished without reporting a result
    #[error("Concurrent unit {unit} reported no result")]
    MissingResult { unit: UnitId },

    /// A worker thread could not be started
    #[error("Failed to spawn worker thread: {0}")]
    Spawn(#[source] std::io::Error),

    /// Errors related to configuration loading/saving
    #[error("Configuration error: {0}")]
    Config(String),

    /// Errors related to installing the tracing subscriber
    #[error("Logging error: {0}")]
    Logging(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic errors with context
    #[error("{context}: {source}")]
    WithContext {
        context: String,
        #[source]
        source: Box<StreamError>,
    },
}

impl StreamError {
    /// Add context to an error
    pub fn with_context(self, context: impl Into<String>) -> Self {
        StreamError::WithContext {
            context: context.into(),
            source: Box::new(self),
        }
    }

    /// Wrap an arbitrary receiver error.
    ///
    /// A `StreamError` travelling inside the `anyhow::Error` (for example from a
    /// nested pipeline evaluated by the receiver) is returned as-is.
    pub fn receiver(receiver: impl Into<String>, source: anyhow::Error) -> Self {
        match source.downcast::<StreamError>() {
            Ok(inner) => inner,
            Err(source) => StreamError::Receiver {
                receiver: receiver.into(),
                source,
            },
        }
    }

    /// Whether this error is a misuse of the composition contract rather
    /// than a failure raised while running user code.
    pub fn is_contract_violation(&self) -> bool {
        match self {
            StreamError::NotInvocable { .. }
            | StreamError::Arity { .. }
            | StreamError::TypeMismatch { .. } => true,
            StreamError::WithContext { source, .. } => source.is_contract_violation(),
            _ => false,
        }
    }

    /// Strip any context layers and return the underlying error.
    pub fn root(&self) -> &StreamError {
        match self {
            StreamError::WithContext { source, .. } => source.root(),
            other => other,
        }
    }
}

/// Result type alias for streamable-rs operations
pub type Result<T> = std::result::Result<T, StreamError>;

/// Extension trait for adding context to Results
pub trait ResultExt<T> {
    /// Add context to an error result
    fn context(self, context: impl Into<String>) -> Result<T>;

    /// Add context lazily to an error result
    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String;
}

impl<T> ResultExt<T> for Result<T> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| e.with_context(context))
    }

    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| e.with_context(f()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = StreamError::Arity {
            callee: "doubler".to_string(),
            expected: 1,
            got: 0,
        };
        assert_eq!(
            err.to_string(),
            "Contract violation: doubler takes 1 argument(s), called with 0"
        );
    }

    #[test]
    fn test_error_with_context() {
        let err = StreamError::NotInvocable { found: "int" };
        let with_ctx = err.with_context("Failed to apply stage");
        assert!(with_ctx.to_string().contains("Failed to apply stage"));
        assert!(with_ctx.is_contract_violation());
        assert!(matches!(with_ctx.root(), StreamError::NotInvocable { .. }));
    }

    #[test]
    fn test_receiver_error_passthrough() {
        let inner = StreamError::TypeMismatch {
            expected: "list",
            found: "int",
        };
        let err = StreamError::receiver("flatten", anyhow::Error::new(inner));
        assert!(matches!(err, StreamError::TypeMismatch { .. }));

        let err = StreamError::receiver("pinger", anyhow::anyhow!("connection refused"));
        assert!(!err.is_contract_violation());
        assert!(err.to_string().contains("pinger"));
        assert!(err.to_string().contains("connection refused"));
    }

    #[test]
    fn test_panicked_error_names_unit() {
        let err = StreamError::Panicked {
            unit: UnitId::with_argument(1, 2),
            message: "boom".to_string(),
        };
        assert!(err.to_string().contains("arg 1"));
        assert!(err.to_string().contains("boom"));
    }
}
