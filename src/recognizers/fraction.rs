//! Fractions: `1/2`, `0.25`, `one-half`, `three quarters`.
//!
//! A decimal on its own is a complete match.
//!
//! Start tracking defaults to the same policy as every other recognizer.
//! [`FractionRecognizer::legacy`] instead re-seeds the match start right after
//! each hit, which changes the span of a fraction that immediately follows
//! another one:
//!
//! ```text
//! tokens     1 / 2 3 / 4
//! new()      "1/2", "1/2 3/4"
//! legacy()   "1/2", "3/4"
//! ```

use super::vocab::WORD_NUMBERS;
use super::{Recognizer, RecognizerKind};
use crate::engine::{Condition, Machine, MachineBuilder, Scan, Scanner, StartTracking};
use crate::{Span, Token};
use once_cell::sync::Lazy;
use std::collections::HashSet;
use std::slice;

static DENOMINATORS: Lazy<HashSet<&'static str>> = word_set![
    "half", "halves", "third", "thirds", "quarter", "quarters", "fourth", "fourths", "fifth", "fifths", "sixth",
    "sixths", "seventh", "sevenths", "eighth", "eighths", "ninth", "ninths", "tenth", "tenths",
];

#[derive(Debug, Clone)]
pub struct FractionRecognizer {
    machine: Machine,
    tracking: StartTracking,
}

impl FractionRecognizer {
    pub fn new() -> Self {
        FractionRecognizer { machine: fraction_machine(), tracking: StartTracking::OnStartEntry }
    }

    /// Re-seed the match start after every hit.
    pub fn legacy() -> Self {
        FractionRecognizer { machine: fraction_machine(), tracking: StartTracking::ReseedAfterMatch }
    }

    pub fn tracking(&self) -> StartTracking {
        self.tracking
    }
}

impl Default for FractionRecognizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Recognizer for FractionRecognizer {
    type Output = Span;

    fn kind(&self) -> RecognizerKind {
        RecognizerKind::Fraction
    }

    fn run(&mut self, tokens: &[Token]) -> Scan<Span> {
        Scanner::new(slice::from_mut(&mut self.machine))
            .tracking(self.tracking)
            .run(tokens, None, |_, span| span)
    }
}

fn fraction_machine() -> Machine {
    let mut b = MachineBuilder::new("fraction");
    let start = b.start();
    let numerator = b.state("NUM");
    let fslash = b.state("FSLASH");
    let text_num = b.state("TEXT_NUM");
    let text_dash = b.state("TEXT_DASH");
    let end = b.end("END");

    transitions!(b, start => [
        Condition::DecimalValue => end,
        Condition::Integer => numerator,
        Condition::word_set(&WORD_NUMBERS) => text_num,
        Condition::Any => start,
    ]);
    transitions!(b, numerator => [Condition::punct('/') => fslash]);
    transitions!(b, fslash => [Condition::Integer => end]);
    transitions!(b, text_num => [
        Condition::punct('-') => text_dash,
        Condition::word_set(&DENOMINATORS) => end,
    ]);
    transitions!(b, text_dash => [Condition::word_set(&DENOMINATORS) => end]);

    b.build(())
}
