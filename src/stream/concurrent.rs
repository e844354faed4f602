//! Concurrent group — fan-out across threads with a join barrier.
//!
//! Each evaluation dispatches one unit of work per element, or per
//! (argument × element) pair when external arguments are given. Every unit
//! owns exactly one pre-assigned result slot, so the returned sequence is
//! identical to what a `SerialGroup` with the same elements would produce,
//! whatever order the units finish in.
//!
//! # Execution
//!
//! - **Unbounded (default)** — one scoped thread per unit. Fine for the small
//!   fan-outs this crate targets; thread count grows with `args × elements`.
//! - **Bounded** — with `ConcurrencyConfig::max_threads` set, a fixed set of
//!   workers pulls unit slots from a shared job queue.
//!
//! Units report `(unit, result)` over a channel. The scope end is the join
//! barrier: nothing is returned until every unit has finished.
//!
//! # Failures
//!
//! All units always run to completion. If any failed, the failure of the
//! lowest-indexed unit is returned and the rest are logged. A panicking unit
//! is caught and reported as `StreamError::Panicked`.

use crate::config::ConcurrencyConfig;
use crate::error::{Result, StreamError};
use crate::stream::group::StreamGroup;
use crate::stream::id::UnitId;
use crate::stream::invocable::Invocable;
use crate::stream::producer::Producer;
use crate::stream::value::Value;
use crossbeam_channel::{unbounded, Sender};
use std::any::Any;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::thread;

/// Ordered sequence of invocables evaluated concurrently.
#[derive(Clone)]
pub struct ConcurrentGroup {
    elements: Arc<[Invocable]>,
    config: Arc<ConcurrencyConfig>,
}

impl ConcurrentGroup {
    /// Create a group with the default (unbounded) concurrency config.
    pub fn new<I, T>(elements: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<Invocable>,
    {
        Self::with_config(elements, ConcurrencyConfig::default())
    }

    /// Create a group with an explicit config. The config is validated on
    /// every evaluation.
    pub fn with_config<I, T>(elements: I, config: ConcurrencyConfig) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<Invocable>,
    {
        Self {
            elements: elements.into_iter().map(Into::into).collect(),
            config: Arc::new(config),
        }
    }

    pub fn config(&self) -> &ConcurrencyConfig {
        &self.config
    }

    pub(crate) fn ptr_eq(&self, other: &ConcurrentGroup) -> bool {
        Arc::ptr_eq(&self.elements, &other.elements)
    }

    /// Run a single unit, converting a panic into an error.
    fn run_unit(&self, unit: UnitId, args: &[Value]) -> Result<Value> {
        let element = &self.elements[unit.element as usize];
        tracing::trace!("Dispatching {} ({})", unit, element.name());

        let outcome = panic::catch_unwind(AssertUnwindSafe(|| match unit.argument {
            Some(arg) => element.call(std::slice::from_ref(&args[arg as usize])),
            None => element.call(&[]),
        }));

        outcome.unwrap_or_else(|payload| {
            Err(StreamError::Panicked {
                unit,
                message: panic_message(payload.as_ref()),
            })
        })
    }

    /// Dispatch every slot and wait for all of them. Results arrive on `tx`.
    fn dispatch(
        &self,
        args: &[Value],
        units: usize,
        tx: &Sender<(UnitId, Result<Value>)>,
    ) -> Result<()> {
        let width = self.elements.len();
        let has_arguments = !args.is_empty();
        let workers = self.config.worker_count(units);

        let run = |slot: usize| {
            let unit = UnitId::from_slot(slot, width, has_arguments);
            (unit, self.run_unit(unit, args))
        };
        let run = &run;

        thread::scope(|scope| -> Result<()> {
            if workers >= units {
                for slot in 0..units {
                    let tx = tx.clone();
                    self.config
                        .thread_builder(slot)
                        .spawn_scoped(scope, move || {
                            let _ = tx.send(run(slot));
                        })
                        .map_err(StreamError::Spawn)?;
                }
            } else {
                let (job_tx, job_rx) = unbounded::<usize>();
                for slot in 0..units {
                    let _ = job_tx.send(slot);
                }
                drop(job_tx);

                for worker in 0..workers {
                    let tx = tx.clone();
                    let jobs = job_rx.clone();
                    self.config
                        .thread_builder(worker)
                        .spawn_scoped(scope, move || {
                            for slot in jobs.iter() {
                                if tx.send(run(slot)).is_err() {
                                    break;
                                }
                            }
                        })
                        .map_err(StreamError::Spawn)?;
                }
            }
            Ok(())
        })
    }
}

impl StreamGroup for ConcurrentGroup {
    fn elements(&self) -> &[Invocable] {
        &self.elements
    }

    fn evaluate(&self, args: &[Value]) -> Result<Vec<Value>> {
        self.config.validate()?;

        let width = self.elements.len();
        let has_arguments = !args.is_empty();
        let units = if has_arguments {
            width * args.len()
        } else {
            width
        };
        if units == 0 {
            return Ok(Vec::new());
        }

        tracing::debug!(
            "Evaluating concurrent group: {} units on {} threads",
            units,
            self.config.worker_count(units)
        );

        let (tx, rx) = unbounded();
        self.dispatch(args, units, &tx)?;
        drop(tx);

        // Join barrier passed; merge into index-assigned slots.
        let mut slots: Vec<Option<Result<Value>>> = (0..units).map(|_| None).collect();
        for (unit, result) in rx.try_iter() {
            slots[unit.slot(width)] = Some(result);
        }

        let mut values = Vec::with_capacity(units);
        let mut first_error = None;
        let mut failures = 0usize;
        for (slot, entry) in slots.into_iter().enumerate() {
            let unit = UnitId::from_slot(slot, width, has_arguments);
            match entry.unwrap_or(Err(StreamError::MissingResult { unit })) {
                Ok(value) => values.push(value),
                Err(err) => {
                    failures += 1;
                    if first_error.is_none() {
                        first_error = Some(err);
                    } else {
                        tracing::warn!("Discarding failure of {}: {}", unit, err);
                    }
                }
            }
        }

        match first_error {
            Some(err) => {
                tracing::debug!("Concurrent group failed: {} of {} units", failures, units);
                Err(err)
            }
            None => Ok(values),
        }
    }

    /// Stays concurrent with this group's config.
    fn to_concurrent(&self, stage: Producer) -> ConcurrentGroup {
        self.to_concurrent_with(stage, (*self.config).clone())
    }
}

impl fmt::Debug for ConcurrentGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConcurrentGroup")
            .field("elements", &self.elements)
            .field("config", &self.config)
            .finish()
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic payload".to_string()
    }
}
