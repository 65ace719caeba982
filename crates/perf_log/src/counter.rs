use std::fmt;
use std::str::FromStr;

use crate::ParseError;

/// Hardware counters recognized in a perf log.
///
/// The declaration order is the order counters are reported in, and each
/// variant's discriminant is its slot in [`CounterTotals`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CounterName {
    DtlbLoadWalkCompleted,
    DtlbLoadWalkPending,
    DtlbLoadWalkActive,
    DtlbStoreWalkCompleted,
    DtlbStoreWalkPending,
    DtlbStoreWalkActive,
    ItlbWalkCompleted,
    ItlbWalkPending,
    ItlbWalkActive,
    Cycles,
}

impl CounterName {
    /// Number of recognized counters
    pub const COUNT: usize = 10;

    /// Every counter, in report order
    pub const ALL: [CounterName; CounterName::COUNT] = [
        CounterName::DtlbLoadWalkCompleted,
        CounterName::DtlbLoadWalkPending,
        CounterName::DtlbLoadWalkActive,
        CounterName::DtlbStoreWalkCompleted,
        CounterName::DtlbStoreWalkPending,
        CounterName::DtlbStoreWalkActive,
        CounterName::ItlbWalkCompleted,
        CounterName::ItlbWalkPending,
        CounterName::ItlbWalkActive,
        CounterName::Cycles,
    ];

    /// Counters summed into the pending side of the latency ratio
    pub const WALK_PENDING: [CounterName; 3] = [
        CounterName::DtlbLoadWalkPending,
        CounterName::DtlbStoreWalkPending,
        CounterName::ItlbWalkPending,
    ];

    /// Counters summed into the completed side of the latency ratio
    pub const WALK_COMPLETED: [CounterName; 3] = [
        CounterName::DtlbLoadWalkCompleted,
        CounterName::DtlbStoreWalkCompleted,
        CounterName::ItlbWalkCompleted,
    ];

    /// The event name as perf prints it
    pub fn as_str(&self) -> &'static str {
        match self {
            CounterName::DtlbLoadWalkCompleted => "dtlb_load_misses.walk_completed",
            CounterName::DtlbLoadWalkPending => "dtlb_load_misses.walk_pending",
            CounterName::DtlbLoadWalkActive => "dtlb_load_misses.walk_active",
            CounterName::DtlbStoreWalkCompleted => "dtlb_store_misses.walk_completed",
            CounterName::DtlbStoreWalkPending => "dtlb_store_misses.walk_pending",
            CounterName::DtlbStoreWalkActive => "dtlb_store_misses.walk_active",
            CounterName::ItlbWalkCompleted => "itlb_misses.walk_completed",
            CounterName::ItlbWalkPending => "itlb_misses.walk_pending",
            CounterName::ItlbWalkActive => "itlb_misses.walk_active",
            CounterName::Cycles => "cycles:ukhHG",
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

impl FromStr for CounterName {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CounterName::ALL
            .iter()
            .copied()
            .find(|counter| counter.as_str() == s)
            .ok_or_else(|| ParseError::UnknownCounter(s.to_string()))
    }
}

impl fmt::Display for CounterName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-run sums of every recognized counter
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CounterTotals {
    counts: [u64; CounterName::COUNT],
}

impl CounterTotals {
    /// Creates zeroed totals
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `count` to the total for `counter`, saturating at `u64::MAX`
    pub fn add(&mut self, counter: CounterName, count: u64) {
        let slot = &mut self.counts[counter.index()];
        *slot = slot.saturating_add(count);
    }

    pub fn get(&self, counter: CounterName) -> u64 {
        self.counts[counter.index()]
    }

    /// Sum of the three walk_pending counters
    pub fn pending_walks(&self) -> u64 {
        self.sum(&CounterName::WALK_PENDING)
    }

    /// Sum of the three walk_completed counters
    pub fn completed_walks(&self) -> u64 {
        self.sum(&CounterName::WALK_COMPLETED)
    }

    /// Iterates over every counter and its total, in report order
    pub fn iter(&self) -> impl Iterator<Item = (CounterName, u64)> + '_ {
        CounterName::ALL
            .iter()
            .map(move |&counter| (counter, self.get(counter)))
    }

    fn sum(&self, counters: &[CounterName]) -> u64 {
        counters
            .iter()
            .fold(0u64, |acc, &counter| acc.saturating_add(self.get(counter)))
    }
}
