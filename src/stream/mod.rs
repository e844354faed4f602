//! Function-composition pipelines.
//!
//! A pipeline is an immutable tree of invocables built from producers and
//! receivers, then evaluated top-down by a single `call`.
//!
//! # Architecture
//!
//! ```text
//! serial[4, 8] ──broadcast(double)──► serial[double(4), double(8)]
//!              ──broadcast(arrayed)─► [[8, 8], [16, 16]]
//!              ──pipe_into(flatten)─► [8, 8, 16, 16]
//! ```
//!
//! # Design
//!
//! - **Stream** — pairs a stage producer with its argument; own side first.
//! - **SerialGroup** — synchronous, ordered, argument-major broadcast.
//! - **ConcurrentGroup** — one unit per (argument × element), join barrier,
//!   index-assigned result slots so order matches the serial result.
//! - **Immutable** — every combinator returns a new node; elements are shared
//!   via `Arc`, so a pipeline can be evaluated any number of times.

pub mod combinators;
pub mod concurrent;
pub mod group;
pub mod id;
pub mod invocable;
pub mod node;
pub mod producer;
pub mod receiver;
pub mod serial;
pub mod value;

pub use combinators::{
    broadcast, broadcast_concurrent, compose, concurrent, concurrent_with, pipe, serial,
};
pub use concurrent::ConcurrentGroup;
pub use group::StreamGroup;
pub use id::UnitId;
pub use invocable::Invocable;
pub use node::Stream;
pub use producer::Producer;
pub use receiver::{receiver_fn, Flatten, FnReceiver, Receiver};
pub use serial::SerialGroup;
pub use value::Value;
