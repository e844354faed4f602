//! Producers — zero-argument deferred computations.
//!
//! A producer yields either data (a pipeline input) or a callable (a stage to
//! apply). Producers are shared and cheap to clone; nothing runs until a
//! pipeline is evaluated.

use crate::error::Result;
use crate::stream::invocable::Invocable;
use crate::stream::node::Stream;
use crate::stream::receiver::Receiver;
use crate::stream::value::Value;
use std::fmt;
use std::sync::Arc;

type Thunk = dyn Fn() -> Result<Value> + Send + Sync;

/// A named nullary computation yielding a `Value`.
#[derive(Clone)]
pub struct Producer {
    name: Arc<str>,
    thunk: Arc<Thunk>,
}

impl Producer {
    /// Create a producer from a fallible thunk.
    pub fn new<F>(name: impl Into<String>, f: F) -> Self
    where
        F: Fn() -> Result<Value> + Send + Sync + 'static,
    {
        let name: String = name.into();
        Self {
            name: Arc::from(name),
            thunk: Arc::new(f),
        }
    }

    /// Create a producer from an infallible thunk.
    pub fn from_fn<F, V>(name: impl Into<String>, f: F) -> Self
    where
        F: Fn() -> V + Send + Sync + 'static,
        V: Into<Value>,
    {
        Self::new(name, move || Ok(f().into()))
    }

    /// A producer that always yields a clone of `value`.
    pub fn value(value: impl Into<Value>) -> Self {
        let value = value.into();
        let name = format!("value {:?}", value);
        Self::new(name, move || Ok(value.clone()))
    }

    /// A producer yielding `receiver` as a callable stage.
    pub fn receiver<R: Receiver + 'static>(receiver: R) -> Self {
        Self::yielding(Invocable::receiver(receiver))
    }

    /// A producer yielding any invocable, e.g. a group of receivers.
    pub fn yielding(invocable: impl Into<Invocable>) -> Self {
        let invocable = invocable.into();
        let name = invocable.name();
        Self::new(name, move || Ok(Value::Callable(invocable.clone())))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Run the thunk.
    pub fn produce(&self) -> Result<Value> {
        (self.thunk)()
    }

    /// Feed this producer's value into `stage`.
    pub fn compose_with(&self, stage: Producer) -> Stream {
        Stream::new(stage, self.clone())
    }

    pub(crate) fn ptr_eq(&self, other: &Producer) -> bool {
        Arc::ptr_eq(&self.thunk, &other.thunk)
    }
}

impl fmt::Debug for Producer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Producer").field("name", &self.name).finish()
    }
}
