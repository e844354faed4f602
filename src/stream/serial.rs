//! Serial group — ordered, synchronous evaluation on the calling thread.

use crate::error::Result;
use crate::stream::group::StreamGroup;
use crate::stream::invocable::Invocable;
use crate::stream::value::Value;
use std::fmt;
use std::sync::Arc;

/// Ordered sequence of invocables evaluated one after another.
#[derive(Clone)]
pub struct SerialGroup {
    elements: Arc<[Invocable]>,
}

impl SerialGroup {
    pub fn new<I, T>(elements: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<Invocable>,
    {
        Self {
            elements: elements.into_iter().map(Into::into).collect(),
        }
    }

    pub(crate) fn ptr_eq(&self, other: &SerialGroup) -> bool {
        Arc::ptr_eq(&self.elements, &other.elements)
    }
}

impl StreamGroup for SerialGroup {
    fn elements(&self) -> &[Invocable] {
        &self.elements
    }

    fn evaluate(&self, args: &[Value]) -> Result<Vec<Value>> {
        tracing::debug!(
            "Evaluating serial group: {} elements x {} arguments",
            self.elements.len(),
            args.len()
        );

        if args.is_empty() {
            return self.elements.iter().map(|e| e.call(&[])).collect();
        }

        let mut results = Vec::with_capacity(args.len() * self.elements.len());
        for arg in args {
            for element in self.elements.iter() {
                results.push(element.call(std::slice::from_ref(arg))?);
            }
        }
        Ok(results)
    }
}

impl fmt::Debug for SerialGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("SerialGroup").field(&self.elements).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StreamError;
    use crate::stream::producer::Producer;
    use crate::stream::receiver::receiver_fn;

    fn add(n: i64) -> Invocable {
        Invocable::receiver(receiver_fn(format!("add{}", n), move |v: Value| {
            Ok(Value::Int(v.as_int().unwrap_or_default() + n))
        }))
    }

    #[test]
    fn test_evaluate_without_arguments_keeps_order() {
        let group = SerialGroup::new([Producer::value(1), Producer::value(2), Producer::value(3)]);
        assert_eq!(
            group.evaluate(&[]).unwrap(),
            vec![Value::Int(1), Value::Int(2), Value::Int(3)]
        );
    }

    #[test]
    fn test_arguments_broadcast_argument_major() {
        let group = SerialGroup::new([add(10), add(20)]);
        let results = group.evaluate(&[Value::Int(1), Value::Int(2)]).unwrap();
        assert_eq!(
            results,
            vec![Value::Int(11), Value::Int(21), Value::Int(12), Value::Int(22)]
        );
    }

    #[test]
    fn test_empty_group() {
        let group = SerialGroup::new(Vec::<Invocable>::new());
        assert!(group.is_empty());
        assert_eq!(group.evaluate(&[]).unwrap(), Vec::<Value>::new());
        assert_eq!(group.evaluate(&[Value::Int(1)]).unwrap(), Vec::<Value>::new());
    }

    #[test]
    fn test_broadcast_pairs_each_element() {
        let inputs = SerialGroup::new([Producer::value(4), Producer::value(8)]);
        let doubled = inputs.broadcast(Producer::receiver(receiver_fn("double", |v: Value| {
            Ok(Value::Int(v.as_int().unwrap_or_default() * 2))
        })));
        assert_eq!(doubled.len(), 2);
        assert!(doubled
            .elements()
            .iter()
            .all(|e| matches!(e, Invocable::Stream(_))));
        assert_eq!(doubled.call(&[]).unwrap(), Value::from(vec![8, 16]));
    }

    #[test]
    fn test_stops_at_first_failure() {
        let calls = Arc::new(std::sync::atomic::AtomicUsize::new(0));
        let counter = calls.clone();
        let counting = Invocable::receiver(receiver_fn("counting", move |v| {
            counter.fetch_add(1, std::sync::atomic::Ordering::SeqCst);
            Ok(v)
        }));
        let failing = Invocable::receiver(receiver_fn("failing", |_| {
            Err(anyhow::anyhow!("boom"))
        }));
        let group = SerialGroup::new([failing, counting]);

        let err = group.evaluate(&[Value::Int(1)]).unwrap_err();
        assert!(matches!(err, StreamError::Receiver { .. }));
        assert_eq!(calls.load(std::sync::atomic::Ordering::SeqCst), 0);
    }

    #[test]
    fn test_producer_elements_reject_arguments() {
        let group = SerialGroup::new([Producer::value(1)]);
        let err = group.evaluate(&[Value::Int(1)]).unwrap_err();
        assert!(matches!(err, StreamError::Arity { expected: 0, got: 1, .. }));
    }
}
