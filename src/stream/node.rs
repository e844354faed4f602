//! Composition node — the minimal unit of a pipeline.
//!
//! A `Stream` pairs an "own" producer, which must yield a callable, with an
//! argument side whose value is fed to it. Evaluation order is fixed: own
//! first, argument second, then apply.

use crate::error::{Result, StreamError};
use crate::stream::invocable::Invocable;
use crate::stream::producer::Producer;
use crate::stream::value::Value;
use std::fmt;
use std::sync::Arc;

struct Pair {
    own: Producer,
    arg: Invocable,
}

/// Immutable composition of a stage producer with its argument.
#[derive(Clone)]
pub struct Stream {
    inner: Arc<Pair>,
}

impl Stream {
    pub fn new(own: Producer, arg: impl Into<Invocable>) -> Self {
        Self {
            inner: Arc::new(Pair {
                own,
                arg: arg.into(),
            }),
        }
    }

    pub fn own(&self) -> &Producer {
        &self.inner.own
    }

    pub fn arg(&self) -> &Invocable {
        &self.inner.arg
    }

    /// Evaluate: call the own side's callable with the argument side's value.
    pub fn evaluate(&self) -> Result<Value> {
        let own = self.inner.own.produce()?;
        let arg = self.inner.arg.call(&[])?;
        match own {
            Value::Callable(callable) => {
                tracing::trace!("applying {} to {:?}", callable.name(), arg);
                callable.call(std::slice::from_ref(&arg))
            }
            other => Err(StreamError::NotInvocable {
                found: other.kind(),
            }),
        }
    }

    /// Chain another stage after this node.
    pub fn compose_with(&self, stage: Producer) -> Stream {
        Stream::new(stage, self.clone())
    }

    /// Fan-in into a single-input stage. For a single node this is the same
    /// as [`Stream::compose_with`].
    pub fn pipe_into(&self, stage: Producer) -> Stream {
        self.compose_with(stage)
    }

    pub(crate) fn ptr_eq(&self, other: &Stream) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl fmt::Debug for Stream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Stream")
            .field("own", &self.inner.own.name())
            .field("arg", &self.inner.arg)
            .finish()
    }
}
