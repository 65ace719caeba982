//! # perf_log
//!
//! Parses the interval log written by `perf stat` around a benchmark and
//! computes the page walk latency of every benchmark run in it.
//!
//! A log holds one or more runs back to back. Each run starts its counter
//! timestamps from zero again, so a run ends at the first sample whose
//! timestamp drops below the largest one seen so far. The benchmark's own
//! `Took: <runtime>` line is picked up as the run's runtime.
//!
//! The entry point is [`analyze`], which writes a per-run report plus the
//! cross-run averages and returns them as a [`Summary`].

mod accumulator;
mod classifier;
mod counter;
mod driver;
mod latency;
mod number;

pub use accumulator::*;
pub use classifier::*;
pub use counter::*;
pub use driver::*;
pub use latency::*;
pub use number::*;

use thiserror::Error;

/// Reasons a log line is not recognized as a sample or a runtime marker
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseError {
    /// The line ran out of tokens before timestamp, count and counter name
    #[error("expected 3 fields, found {0}")]
    MissingFields(usize),

    #[error("invalid timestamp: {0:?}")]
    InvalidTimestamp(String),

    #[error("invalid count: {0:?}")]
    InvalidCount(String),

    #[error("unknown counter: {0:?}")]
    UnknownCounter(String),

    /// A `Took:` marker with nothing after it
    #[error("runtime marker without a value")]
    MissingDuration,

    #[error("invalid runtime: {0:?}")]
    InvalidDuration(String),
}
