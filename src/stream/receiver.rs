//! Receiver abstraction — the user-supplied leaves of a pipeline.
//!
//! A receiver is anything callable with exactly one value. Implement the
//! `Receiver` trait directly for stateful receivers, or wrap a closure with
//! [`receiver_fn`].

use crate::error::{Result, StreamError};
use crate::stream::value::Value;
use std::fmt;

/// Trait for unary pipeline stages.
pub trait Receiver: Send + Sync {
    /// Human-readable name used in diagnostics.
    fn name(&self) -> &str {
        "receiver"
    }

    /// Consume one value and produce the next.
    fn receive(&self, input: Value) -> Result<Value>;
}

/// Closure-backed receiver. Built by [`receiver_fn`].
pub struct FnReceiver<F> {
    name: String,
    f: F,
}

impl<F> Receiver for FnReceiver<F>
where
    F: Fn(Value) -> anyhow::Result<Value> + Send + Sync,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn receive(&self, input: Value) -> Result<Value> {
        (self.f)(input).map_err(|e| StreamError::receiver(self.name.as_str(), e))
    }
}

impl<F> fmt::Debug for FnReceiver<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnReceiver").field("name", &self.name).finish()
    }
}

/// Wrap a fallible closure as a named receiver.
///
/// Errors returned by the closure surface as `StreamError::Receiver`, except
/// a `StreamError` itself, which is passed through unchanged.
pub fn receiver_fn<F>(name: impl Into<String>, f: F) -> FnReceiver<F>
where
    F: Fn(Value) -> anyhow::Result<Value> + Send + Sync,
{
    FnReceiver {
        name: name.into(),
        f,
    }
}

/// Fan-in receiver: flattens arbitrarily nested lists into one ordered list.
#[derive(Debug, Clone, Copy, Default)]
pub struct Flatten;

impl Receiver for Flatten {
    fn name(&self) -> &str {
        "flatten"
    }

    fn receive(&self, input: Value) -> Result<Value> {
        match input {
            Value::List(_) => Ok(Value::List(input.flatten())),
            other => Err(StreamError::TypeMismatch {
                expected: "list",
                found: other.kind(),
            }),
        }
    }
}
