//! The scanner loop shared by every recognizer.
//!
//! All machines of a recognizer are driven in lock-step over one token stream.
//! The scanner keeps, per machine, the position where its current match
//! begins, and turns end-state hits into spans:
//!
//! ```text
//! tokens:   the   10   /   15   report
//! state:    S     M    /   D    NT_END
//!           ^ start flag seen at index 0
//!                 ^ match begins one position later
//!                              ^ non-terminal end: "report" is excluded,
//!                                the span ends at the previous token ("15")
//! ```
//!
//! ## Start bookkeeping
//!
//! A machine sitting in START self-loops on every token that cannot begin a
//! pattern. Each time it lands in START the scanner records the index *after*
//! that token: the token that leaves START is the first one of the match. A
//! machine that has never been in START matches from index 0.
//!
//! The record is only refreshed on start-state entry. After a match the
//! machine is reset without touching the record, so a pattern that starts
//! immediately after a previous match (without passing through START) inherits
//! the older start. `StartTracking::ReseedAfterMatch` instead seeds the record
//! with the position following the match.
//!
//! ## Ending a match
//!
//! - plain end state: the triggering token is the last token of the span
//! - non-terminal end: the triggering token is consumed but excluded; the span
//!   ends at the previously fed token, and the excluded token is not replayed
//!
//! Output is a set: identical spans from different machines collapse.

use super::machine::Machine;
use super::metrics::ScanStats;
use super::splice::{OverrideSet, Splicer};
use super::state::StateFlags;
use crate::{Span, Token};
use std::collections::HashSet;
use std::fmt::Debug;
use std::hash::Hash;
use tracing::trace;

/// How the match-start record evolves after a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StartTracking {
    /// Refresh only when a machine enters its start state.
    #[default]
    OnStartEntry,
    /// Also seed the record with the position after each match.
    ReseedAfterMatch,
}

/// Result of one scanner run.
#[derive(Debug, Clone)]
pub struct Scan<S> {
    pub spans: HashSet<S>,
    pub stats: ScanStats,
}

/// Machines plus the policy that drives them.
#[derive(Debug)]
pub struct Scanner<'m, R> {
    machines: &'m mut [Machine<R>],
    tracking: StartTracking,
}

impl<'m, R> Scanner<'m, R>
where
    R: Copy + Debug,
{
    pub fn new(machines: &'m mut [Machine<R>]) -> Self {
        Scanner { machines, tracking: StartTracking::default() }
    }

    pub fn tracking(mut self, tracking: StartTracking) -> Self {
        self.tracking = tracking;
        self
    }

    /// Run all machines over `tokens`, substituting `overrides` where they
    /// line up with a raw token, and build one output value per match with
    /// `make_span(role, span)`.
    pub fn run<S, F>(self, tokens: &[Token], overrides: Option<&OverrideSet>, mut make_span: F) -> Scan<S>
    where
        S: Eq + Hash,
        F: FnMut(R, Span) -> S,
    {
        let Scanner { machines, tracking } = self;
        let mut spans = HashSet::new();
        let mut stats = ScanStats::default();
        let mut match_start: Vec<Option<usize>> = vec![None; machines.len()];

        for machine in machines.iter_mut() {
            machine.reset();
        }

        let mut splicer = Splicer::new(tokens, overrides);
        let mut previous: Option<&Token> = None;

        for fed in splicer.by_ref() {
            stats.tokens_fed += 1;

            for (slot, machine) in machines.iter_mut().enumerate() {
                let flags = machine.step(fed.token).flags();

                if flags.contains(StateFlags::START) {
                    match_start[slot] = Some(fed.resume);
                }
                if !flags.contains(StateFlags::END) {
                    continue;
                }

                let start_index = match_start[slot].unwrap_or(0);
                let end_token = if flags.contains(StateFlags::NON_TERMINAL_END) {
                    previous.unwrap_or(fed.token)
                } else {
                    fed.token
                };

                match tokens.get(start_index) {
                    Some(start_token) if start_token.begin <= end_token.end => {
                        let span = Span::new(start_token.begin, end_token.end);
                        trace!(
                            machine = machine.name(),
                            role = ?machine.role(),
                            begin = span.begin,
                            end = span.end,
                            at = fed.index,
                            spliced = fed.spliced,
                            "match"
                        );
                        stats.record_match(machine.name());
                        spans.insert(make_span(machine.role(), span));
                    }
                    _ => trace!(machine = machine.name(), start_index, at = fed.index, "discarding empty match"),
                }

                machine.reset();
                if tracking == StartTracking::ReseedAfterMatch {
                    match_start[slot] = Some(fed.resume);
                }
            }

            previous = Some(fed.token);
        }

        stats.tokens_skipped = splicer.skipped();
        stats.overrides_spliced = splicer.spliced();

        for machine in machines.iter_mut() {
            machine.reset();
        }

        Scan { spans, stats }
    }
}
