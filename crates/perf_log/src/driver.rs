use std::fmt;
use std::io::{self, Write};

use crate::accumulator::{read_run, RunResult};
use crate::number::{exact_mean, ReportFloat};

/// Runtime and latency of every run in a log
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Summary {
    runtimes: Vec<f64>,
    latencies: Vec<f64>,
}

impl Summary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the runtime and latency of a finished run
    pub fn record(&mut self, run: &RunResult) {
        self.runtimes.push(run.runtime);
        self.latencies.push(run.latency.value());
    }

    /// Number of recorded runs
    pub fn runs(&self) -> usize {
        self.runtimes.len()
    }

    pub fn runtimes(&self) -> &[f64] {
        &self.runtimes
    }

    pub fn latencies(&self) -> &[f64] {
        &self.latencies
    }

    pub fn mean_runtime(&self) -> f64 {
        exact_mean(&self.runtimes)
    }

    pub fn mean_latency(&self) -> f64 {
        exact_mean(&self.latencies)
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Average runtime: {}", ReportFloat(self.mean_runtime()))?;
        writeln!(f, "Average page walk latency: {}", ReportFloat(self.mean_latency()))
    }
}

/// Splits `lines` into runs, writing each run's report followed by the
/// cross-run averages to `out`.
///
/// Every log yields at least one run, even an empty one.
pub fn analyze<S, W>(lines: &[S], out: &mut W) -> io::Result<Summary>
where
    S: AsRef<str>,
    W: Write,
{
    let mut summary = Summary::new();
    let mut line = 0;
    let mut run = 1;

    loop {
        writeln!(out, "Run {}", run)?;
        let result = read_run(lines, line, out)?;
        summary.record(&result);
        writeln!(out)?;

        match result.next_line {
            Some(next) => {
                line = next;
                run += 1;
            }
            None => break,
        }
    }

    write!(out, "{}", summary)?;
    Ok(summary)
}
