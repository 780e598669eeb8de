//! Scan metrics.
//!
//! Every scanner run counts what it did; the counters are cheap enough to be
//! collected unconditionally, so there is no separate "metrics mode".
//!
//! - `ScanStats` belongs to one recognizer run (one call to `execute`).
//! - `RecognizerMetrics` pairs those counters with wall-clock timing.
//! - `RunMetrics` aggregates a whole annotation run.
//!
//! Machine hit counts are keyed by machine name in a `BTreeMap` so reports
//! print in a stable order.

use crate::recognizers::RecognizerKind;
use std::collections::BTreeMap;
use std::time::Duration;

/// Counters for one scanner run.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ScanStats {
    /// Positions handed to the machines (raw tokens plus spliced overrides).
    pub tokens_fed: usize,
    /// Raw tokens hidden behind an override.
    pub tokens_skipped: usize,
    /// Override tokens substituted into the stream.
    pub overrides_spliced: usize,
    /// End-state hits, before set de-duplication.
    pub matches: usize,
    /// End-state hits per machine.
    pub hits_by_machine: BTreeMap<&'static str, usize>,
}

impl ScanStats {
    pub(crate) fn record_match(&mut self, machine: &'static str) {
        self.matches += 1;
        *self.hits_by_machine.entry(machine).or_default() += 1;
    }
}

/// Timing and counters for one recognizer inside an annotation run.
#[derive(Debug, Clone)]
pub struct RecognizerMetrics {
    pub kind: RecognizerKind,
    pub duration: Duration,
    /// Distinct spans produced.
    pub spans: usize,
    pub stats: ScanStats,
}

/// Metrics for a whole annotation run.
#[derive(Debug, Default, Clone)]
pub struct RunMetrics {
    pub total: Duration,
    pub tokenize: Duration,
    pub tokens: usize,
    pub recognizers: Vec<RecognizerMetrics>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_match_counts_per_machine() {
        let mut stats = ScanStats::default();
        stats.record_match("history");
        stats.record_match("probable");
        stats.record_match("history");
        assert_eq!(stats.matches, 3);
        assert_eq!(stats.hits_by_machine.get("history"), Some(&2));
        assert_eq!(stats.hits_by_machine.keys().copied().collect::<Vec<_>>(), ["history", "probable"]);
    }
}
