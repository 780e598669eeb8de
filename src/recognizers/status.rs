//! Status indicators: history, probable, family history.
//!
//! One machine per status. Each machine is tagged with the `Status` it reports,
//! so the span factory reads the status straight off the role.

use super::{Recognizer, RecognizerKind};
use crate::engine::{Condition, Machine, MachineBuilder, Scan, Scanner};
use crate::{Status, StatusSpan, Token};
use once_cell::sync::Lazy;
use std::collections::HashSet;

static PROBABLE: Lazy<HashSet<&'static str>> = word_set!["possible", "possibly", "probable", "likely"];
static HISTORY: Lazy<HashSet<&'static str>> = word_set!["history", "hx"];
static FAMILY_HISTORY: Lazy<HashSet<&'static str>> = word_set!["fh", "fx"];

#[derive(Debug, Clone)]
pub struct StatusIndicatorRecognizer {
    machines: [Machine<Status>; 3],
}

impl StatusIndicatorRecognizer {
    pub fn new() -> Self {
        StatusIndicatorRecognizer { machines: [history_machine(), probable_machine(), family_history_machine()] }
    }
}

impl Default for StatusIndicatorRecognizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Recognizer for StatusIndicatorRecognizer {
    type Output = StatusSpan;

    fn kind(&self) -> RecognizerKind {
        RecognizerKind::StatusIndicator
    }

    fn run(&mut self, tokens: &[Token]) -> Scan<StatusSpan> {
        Scanner::new(&mut self.machines)
            .run(tokens, None, |status, span| StatusSpan { begin: span.begin, end: span.end, status })
    }
}

/// `history`, `hx`, `h / o`
fn history_machine() -> Machine<Status> {
    let mut b = MachineBuilder::new("history");
    let start = b.start();
    let h_abbr = b.state("HISTORY_ABBR");
    let fslash = b.state("FORWARD_SLASH");
    let end = b.end("END");

    transitions!(b, start => [
        Condition::word_set(&HISTORY) => end,
        Condition::text("h") => h_abbr,
        Condition::Any => start,
    ]);
    transitions!(b, h_abbr => [Condition::text("/") => fslash]);
    transitions!(b, fslash => [Condition::text("o") => end]);

    b.build(Status::History)
}

fn probable_machine() -> Machine<Status> {
    let mut b = MachineBuilder::new("probable");
    let start = b.start();
    let end = b.end("END");
    transitions!(b, start => [Condition::word_set(&PROBABLE) => end, Condition::Any => start]);
    b.build(Status::Probable)
}

/// `fh`, `fx`, `family history`
fn family_history_machine() -> Machine<Status> {
    let mut b = MachineBuilder::new("family history");
    let start = b.start();
    let family = b.state("FAMILY");
    let end = b.end("END");

    transitions!(b, start => [
        Condition::word_set(&FAMILY_HISTORY) => end,
        Condition::text("family") => family,
        Condition::Any => start,
    ]);
    transitions!(b, family => [Condition::text("history") => end]);

    b.build(Status::FamilyHistory)
}
