//! Construction-time combinators.
//!
//! Free-function forms of the builder methods, usable in any composition
//! order. None of these evaluate anything.

use crate::config::ConcurrencyConfig;
use crate::stream::concurrent::ConcurrentGroup;
use crate::stream::group::StreamGroup;
use crate::stream::invocable::Invocable;
use crate::stream::node::Stream;
use crate::stream::producer::Producer;
use crate::stream::serial::SerialGroup;

/// Wrap an ordered collection as a serial group.
pub fn serial<I, T>(elements: I) -> SerialGroup
where
    I: IntoIterator<Item = T>,
    T: Into<Invocable>,
{
    SerialGroup::new(elements)
}

/// Wrap an ordered collection as a concurrent group (unbounded).
pub fn concurrent<I, T>(elements: I) -> ConcurrentGroup
where
    I: IntoIterator<Item = T>,
    T: Into<Invocable>,
{
    ConcurrentGroup::new(elements)
}

/// Wrap an ordered collection as a concurrent group with an explicit config.
pub fn concurrent_with<I, T>(elements: I, config: ConcurrencyConfig) -> ConcurrentGroup
where
    I: IntoIterator<Item = T>,
    T: Into<Invocable>,
{
    ConcurrentGroup::with_config(elements, config)
}

/// Build a node applying `own`'s callable to `arg`'s value.
pub fn compose(own: Producer, arg: impl Into<Invocable>) -> Stream {
    Stream::new(own, arg)
}

/// Pair `stage` with every element of `group`, serially.
pub fn broadcast<G: StreamGroup>(group: &G, stage: Producer) -> SerialGroup {
    group.broadcast(stage)
}

/// Pair `stage` with every element of `group`, concurrently.
pub fn broadcast_concurrent<G: StreamGroup>(group: &G, stage: Producer) -> ConcurrentGroup {
    group.to_concurrent(stage)
}

/// Fan-in: feed the full evaluation of `left` to a single-input stage.
pub fn pipe(left: impl Into<Invocable>, stage: Producer) -> Stream {
    Stream::new(stage, left)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stream::receiver::{receiver_fn, Flatten};
    use crate::stream::value::Value;

    fn double() -> Producer {
        Producer::receiver(receiver_fn("double", |v: Value| {
            Ok(Value::Int(v.as_int().unwrap_or_default() * 2))
        }))
    }

    #[test]
    fn test_compose_law() {
        let node = compose(double(), Producer::value(21));
        assert_eq!(node.evaluate().unwrap(), Value::Int(42));
    }

    #[test]
    fn test_free_functions_match_methods() {
        let inputs = serial([Producer::value(4), Producer::value(8)]);
        assert_eq!(
            broadcast(&inputs, double()).call(&[]).unwrap(),
            inputs.broadcast(double()).call(&[]).unwrap()
        );
        assert_eq!(
            broadcast_concurrent(&inputs, double()).call(&[]).unwrap(),
            Value::from(vec![8, 16])
        );
    }

    #[test]
    fn test_pipe_flattens_nested_groups() {
        let arrayed = Producer::yielding(serial([
            Invocable::receiver(receiver_fn("a", |v| Ok(v))),
            Invocable::receiver(receiver_fn("b", |v| Ok(v))),
        ]));
        let nested = broadcast(&concurrent([Producer::value(1), Producer::value(2)]), arrayed);
        let flat = pipe(nested, Producer::receiver(Flatten));
        assert_eq!(flat.evaluate().unwrap(), Value::from(vec![1, 1, 2, 2]));
    }
}
