//! # streamable-rs: composable function pipelines
//!
//! Builds pipelines ("streams") out of plain callables with declarative
//! combinators for serial chaining, fan-out across groups, optional
//! concurrent evaluation of fanned-out branches, and fan-in flattening.
//!
//! ## Architecture
//!
//! - **Producers**: zero-argument deferred computations yielding inputs or stages
//! - **Receivers**: user-supplied unary callables (the pipeline leaves)
//! - **Streams**: composition nodes applying a stage to an argument
//! - **Groups**: serial or concurrent ordered collections with broadcast/pipe
//!
//! There is no scheduler and no I/O. Concurrency exists only inside
//! `ConcurrentGroup` evaluation, which joins all its units before returning.
//!
//! ## Example
//!
//! ```ignore
//! use streamable_rs::{receiver_fn, serial, Flatten, Producer, StreamGroup, Value};
//!
//! let double = || {
//!     receiver_fn("double", |v: Value| Ok(Value::Int(v.as_int().unwrap_or(0) * 2)))
//! };
//!
//! let pipeline = serial([Producer::value(4), Producer::value(8)])
//!     .broadcast(Producer::yielding(serial([
//!         streamable_rs::Invocable::receiver(double()),
//!         streamable_rs::Invocable::receiver(double()),
//!     ])))
//!     .pipe_into(Producer::receiver(Flatten));
//!
//! assert_eq!(pipeline.evaluate()?, Value::from(vec![8, 8, 16, 16]));
//! ```

pub mod config;
pub mod error;
pub mod logging;
pub mod stream;

// Re-export commonly used types
pub use config::{ConcurrencyConfig, StreamConfig};
pub use error::{Result, ResultExt, StreamError};
pub use stream::{
    broadcast, broadcast_concurrent, compose, concurrent, concurrent_with, pipe, receiver_fn,
    serial, ConcurrentGroup, Flatten, FnReceiver, Invocable, Producer, Receiver, SerialGroup,
    Stream, StreamGroup, UnitId, Value,
};
