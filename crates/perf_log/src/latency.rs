use log::warn;

use crate::counter::CounterTotals;

/// Page walk latency of one run
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Latency {
    /// Pending walks per completed walk
    Ratio(f64),
    /// The run completed no page walks; reported as 0.0
    Undefined,
}

impl Latency {
    /// The reported value, 0.0 when undefined
    pub fn value(&self) -> f64 {
        match self {
            Latency::Ratio(ratio) => *ratio,
            Latency::Undefined => 0.0,
        }
    }

    /// True if the divide-by-zero guard fired
    pub fn is_degraded(&self) -> bool {
        matches!(self, Latency::Undefined)
    }
}

/// Average number of outstanding page walks per completed walk.
///
/// Returns [`Latency::Undefined`], with a warning, when a run completed no
/// page walks at all.
pub fn page_walk_latency(totals: &CounterTotals) -> Latency {
    let pending = totals.pending_walks();
    let completed = totals.completed_walks();

    if completed == 0 {
        warn!("divide by zero: no completed page walks ({} pending)", pending);
        return Latency::Undefined;
    }

    Latency::Ratio(pending as f64 / completed as f64)
}
