use super::{Recognizer, RecognizerKind};
use crate::engine::{Condition, Machine, MachineBuilder, Scan, Scanner};
use crate::{Span, Token};
use once_cell::sync::Lazy;
use std::collections::HashSet;
use std::slice;

static TITLES: Lazy<HashSet<&'static str>> = word_set!["mr", "ms", "mrs", "dr"];

/// Abbreviated person titles followed by a period: `Dr.`, `Mrs.`.
#[derive(Debug, Clone)]
pub struct PersonTitleRecognizer {
    machine: Machine,
}

impl PersonTitleRecognizer {
    pub fn new() -> Self {
        let mut b = MachineBuilder::new("person title");
        let start = b.start();
        let title = b.state("TITLE");
        let end = b.end("END");
        transitions!(b, start => [Condition::word_set(&TITLES) => title, Condition::Any => start]);
        transitions!(b, title => [Condition::punct('.') => end]);
        PersonTitleRecognizer { machine: b.build(()) }
    }
}

impl Default for PersonTitleRecognizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Recognizer for PersonTitleRecognizer {
    type Output = Span;

    fn kind(&self) -> RecognizerKind {
        RecognizerKind::PersonTitle
    }

    fn run(&mut self, tokens: &[Token]) -> Scan<Span> {
        Scanner::new(slice::from_mut(&mut self.machine)).run(tokens, None, |_, span| span)
    }
}
