//! Behaviour shared by serial and concurrent groups.
//!
//! Both group kinds pair a following stage with each of their elements the
//! same way; they differ only in how `evaluate` schedules the elements.

use crate::config::ConcurrencyConfig;
use crate::error::Result;
use crate::stream::concurrent::ConcurrentGroup;
use crate::stream::invocable::Invocable;
use crate::stream::node::Stream;
use crate::stream::producer::Producer;
use crate::stream::serial::SerialGroup;
use crate::stream::value::Value;

/// An ordered collection of invocables that can be broadcast, piped and
/// evaluated.
pub trait StreamGroup: Clone + Into<Invocable> {
    /// Elements in authoritative index order.
    fn elements(&self) -> &[Invocable];

    /// Evaluate every element.
    ///
    /// With no arguments each element is called with none; otherwise each
    /// argument is broadcast across every element, argument-major.
    fn evaluate(&self, args: &[Value]) -> Result<Vec<Value>>;

    /// [`StreamGroup::evaluate`] with the results wrapped in a list value.
    fn call(&self, args: &[Value]) -> Result<Value> {
        self.evaluate(args).map(Value::List)
    }

    fn len(&self) -> usize {
        self.elements().len()
    }

    fn is_empty(&self) -> bool {
        self.elements().is_empty()
    }

    /// Pair `stage` with every element, keeping order. The result is always
    /// serial; concurrency has to be requested again per stage.
    fn broadcast(&self, stage: Producer) -> SerialGroup {
        SerialGroup::new(pair_with(self.elements(), &stage))
    }

    /// Pair `stage` with every element and evaluate the pairs concurrently.
    fn to_concurrent(&self, stage: Producer) -> ConcurrentGroup {
        self.to_concurrent_with(stage, ConcurrencyConfig::default())
    }

    /// [`StreamGroup::to_concurrent`] with an explicit concurrency config.
    fn to_concurrent_with(&self, stage: Producer, config: ConcurrencyConfig) -> ConcurrentGroup {
        ConcurrentGroup::with_config(pair_with(self.elements(), &stage), config)
    }

    /// Fan-in: feed the whole group's ordered results to a single stage.
    fn pipe_into(&self, stage: Producer) -> Stream {
        Stream::new(stage, self.clone())
    }
}

pub(crate) fn pair_with(elements: &[Invocable], stage: &Producer) -> Vec<Invocable> {
    elements
        .iter()
        .map(|element| Invocable::Stream(Stream::new(stage.clone(), element.clone())))
        .collect()
}
