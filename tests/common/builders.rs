//! Test receivers and input builders

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;
use streamable_rs::{Invocable, Producer, Receiver, Result, StreamError, Value};

/// Doubles integers and floats
#[derive(Debug, Clone, Copy, Default)]
pub struct Doubler;

impl Receiver for Doubler {
    fn name(&self) -> &str {
        "doubler"
    }

    fn receive(&self, input: Value) -> Result<Value> {
        match input {
            Value::Int(n) => Ok(Value::Int(n * 2)),
            Value::Float(f) => Ok(Value::Float(f * 2.0)),
            other => Err(StreamError::TypeMismatch {
                expected: "number",
                found: other.kind(),
            }),
        }
    }
}

/// Always fails with a receiver error
#[derive(Debug, Clone)]
pub struct Failing {
    pub name: String,
}

impl Failing {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
        }
    }
}

impl Receiver for Failing {
    fn name(&self) -> &str {
        &self.name
    }

    fn receive(&self, _input: Value) -> Result<Value> {
        Err(StreamError::receiver(
            self.name.as_str(),
            anyhow::anyhow!("{} refused its input", self.name),
        ))
    }
}

/// Passes its input through after a delay, counting invocations
#[derive(Debug, Clone)]
pub struct Slow {
    pub delay: Duration,
    pub calls: Arc<AtomicUsize>,
}

impl Slow {
    pub fn new(delay_ms: u64) -> Self {
        Self {
            delay: Duration::from_millis(delay_ms),
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Receiver for Slow {
    fn name(&self) -> &str {
        "slow"
    }

    fn receive(&self, input: Value) -> Result<Value> {
        thread::sleep(self.delay);
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(input)
    }
}

/// Producer yielding a doubling stage
pub fn doubler() -> Producer {
    Producer::receiver(Doubler)
}

/// Constant producers for each input, in order
pub fn inputs(values: &[i64]) -> Vec<Producer> {
    values.iter().map(|&v| Producer::value(v)).collect()
}

/// `n` doubling receivers as group elements
pub fn doublers(n: usize) -> Vec<Invocable> {
    (0..n).map(|_| Invocable::receiver(Doubler)).collect()
}
