//! The closed set of things a pipeline can call.
//!
//! Groups hold `Invocable`s and producers may yield them, so arrayed
//! receivers, nested groups and composed nodes all go through one `call`
//! entry point. Arity is checked here: producers and nodes take no
//! arguments, receivers exactly one, groups any number.

use crate::error::{Result, StreamError};
use crate::stream::concurrent::ConcurrentGroup;
use crate::stream::group::StreamGroup;
use crate::stream::node::Stream;
use crate::stream::producer::Producer;
use crate::stream::receiver::Receiver;
use crate::stream::serial::SerialGroup;
use crate::stream::value::Value;
use std::fmt;
use std::sync::Arc;

/// Anything a pipeline can invoke.
#[derive(Clone)]
pub enum Invocable {
    Producer(Producer),
    Stream(Stream),
    Receiver(Arc<dyn Receiver>),
    Serial(SerialGroup),
    Concurrent(ConcurrentGroup),
}

impl Invocable {
    /// Wrap a receiver.
    pub fn receiver<R: Receiver + 'static>(receiver: R) -> Self {
        Invocable::Receiver(Arc::new(receiver))
    }

    /// Invoke with the given external arguments.
    pub fn call(&self, args: &[Value]) -> Result<Value> {
        match self {
            Invocable::Producer(p) => {
                expect_arity(p.name(), 0, args)?;
                p.produce()
            }
            Invocable::Stream(s) => {
                expect_arity("stream", 0, args)?;
                s.evaluate()
            }
            Invocable::Receiver(r) => {
                expect_arity(r.name(), 1, args)?;
                r.receive(args[0].clone())
            }
            Invocable::Serial(g) => g.call(args),
            Invocable::Concurrent(g) => g.call(args),
        }
    }

    pub fn name(&self) -> String {
        match self {
            Invocable::Producer(p) => p.name().to_string(),
            Invocable::Stream(_) => "stream".to_string(),
            Invocable::Receiver(r) => r.name().to_string(),
            Invocable::Serial(g) => format!("serial[{}]", g.len()),
            Invocable::Concurrent(g) => format!("concurrent[{}]", g.len()),
        }
    }

    /// Identity comparison: true when both refer to the same shared structure.
    pub fn ptr_eq(&self, other: &Invocable) -> bool {
        match (self, other) {
            (Invocable::Producer(a), Invocable::Producer(b)) => a.ptr_eq(b),
            (Invocable::Stream(a), Invocable::Stream(b)) => a.ptr_eq(b),
            (Invocable::Receiver(a), Invocable::Receiver(b)) => Arc::ptr_eq(a, b),
            (Invocable::Serial(a), Invocable::Serial(b)) => a.ptr_eq(b),
            (Invocable::Concurrent(a), Invocable::Concurrent(b)) => a.ptr_eq(b),
            _ => false,
        }
    }
}

fn expect_arity(callee: &str, expected: usize, args: &[Value]) -> Result<()> {
    if args.len() == expected {
        Ok(())
    } else {
        Err(StreamError::Arity {
            callee: callee.to_string(),
            expected,
            got: args.len(),
        })
    }
}

impl fmt::Debug for Invocable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Invocable({})", self.name())
    }
}

impl From<Producer> for Invocable {
    fn from(p: Producer) -> Self {
        Invocable::Producer(p)
    }
}

impl From<Stream> for Invocable {
    fn from(s: Stream) -> Self {
        Invocable::Stream(s)
    }
}

impl From<Arc<dyn Receiver>> for Invocable {
    fn from(r: Arc<dyn Receiver>) -> Self {
        Invocable::Receiver(r)
    }
}

impl From<SerialGroup> for Invocable {
    fn from(g: SerialGroup) -> Self {
        Invocable::Serial(g)
    }
}

impl From<ConcurrentGroup> for Invocable {
    fn from(g: ConcurrentGroup) -> Self {
        Invocable::Concurrent(g)
    }
}
