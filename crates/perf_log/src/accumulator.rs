use std::fmt;
use std::io::{self, Write};

use log::{debug, trace};

use crate::classifier::{classify_line, LineRecord, Sample};
use crate::counter::CounterTotals;
use crate::latency::{page_walk_latency, Latency};
use crate::number::ReportFloat;

/// Everything learned from one benchmark run
#[derive(Debug, Clone, PartialEq)]
pub struct RunResult {
    /// Index of the line that starts the next run, `None` at end of input
    pub next_line: Option<usize>,
    /// Runtime from the run's `Took:` line, 0.0 if it had none
    pub runtime: f64,
    pub latency: Latency,
    pub totals: CounterTotals,
    /// Index the scan started from
    pub start_line: usize,
    /// Index of the last sample accumulated into this run
    pub end_line: usize,
    /// Largest timestamp seen in this run
    pub end_time: f64,
}

#[derive(Debug)]
struct RunState {
    end_time: f64,
    end_line: usize,
    runtime: f64,
    totals: CounterTotals,
}

impl RunState {
    fn new() -> Self {
        Self {
            end_time: 0.0,
            end_line: 0,
            runtime: 0.0,
            totals: CounterTotals::new(),
        }
    }

    /// Folds a sample into the run. Returns false if the sample's timestamp
    /// went backwards, which means it belongs to the next run.
    fn accumulate(&mut self, index: usize, sample: &Sample) -> bool {
        if sample.timestamp < self.end_time {
            return false;
        }

        self.end_time = sample.timestamp;
        self.end_line = index;
        self.totals.add(sample.counter, sample.count);
        true
    }
}

/// Scans a single run starting at line `start`.
///
/// The run ends at the first sample whose timestamp is lower than the
/// largest one seen so far; that line is returned as
/// [`RunResult::next_line`] and left for the next scan. The last line of
/// `lines` is never evaluated.
pub fn scan_run<S: AsRef<str>>(lines: &[S], start: usize) -> RunResult {
    let mut state = RunState::new();
    let mut next_line = None;
    let last = lines.len().saturating_sub(1);

    for (index, line) in lines.iter().enumerate().take(last).skip(start) {
        match classify_line(line.as_ref()) {
            LineRecord::Sample(sample) => {
                if !state.accumulate(index, &sample) {
                    debug!(
                        "Run boundary at line {}: timestamp {} after {}",
                        index + 1,
                        sample.timestamp,
                        state.end_time
                    );
                    next_line = Some(index);
                    break;
                }
            }
            LineRecord::Duration(runtime) => state.runtime = runtime,
            LineRecord::Unrecognized(reason) => {
                trace!("Skipping line {}: {}", index + 1, reason);
            }
        }
    }

    if next_line.is_none() {
        debug!("End of input reached in run starting at line {}", start + 1);
    }

    RunResult {
        next_line,
        runtime: state.runtime,
        latency: page_walk_latency(&state.totals),
        totals: state.totals,
        start_line: start,
        end_line: state.end_line,
        end_time: state.end_time,
    }
}

/// Scans the run starting at line `start` and writes its report to `out`
pub fn read_run<S, W>(lines: &[S], start: usize, out: &mut W) -> io::Result<RunResult>
where
    S: AsRef<str>,
    W: Write,
{
    let result = scan_run(lines, start);
    write!(out, "{}", result)?;
    Ok(result)
}

impl fmt::Display for RunResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.latency.is_degraded() {
            writeln!(f, "Warning: divide by zero")?;
        }
        writeln!(f, "Runtime: {}", ReportFloat(self.runtime))?;
        writeln!(f, "Page walk latency: {}", ReportFloat(self.latency.value()))?;
        writeln!(
            f,
            "Evaluation duration: {}, {} -> {}",
            ReportFloat(self.end_time),
            self.start_line + 1,
            self.end_line + 1
        )?;
        for (counter, total) in self.totals.iter() {
            writeln!(f, "{}: {}", counter, total)?;
        }
        Ok(())
    }
}
