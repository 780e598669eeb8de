use super::{Recognizer, RecognizerKind};
use crate::engine::{Condition, Machine, MachineBuilder, Scan, Scanner};
use crate::{Span, Token};
use std::slice;

/// Single tokens made of roman numeral letters, any case: `III`, `iv`.
#[derive(Debug, Clone)]
pub struct RomanNumeralRecognizer {
    machine: Machine,
}

impl RomanNumeralRecognizer {
    pub fn new() -> Self {
        let mut b = MachineBuilder::new("roman numeral");
        let start = b.start();
        let end = b.end("END");
        transitions!(b, start => [Condition::RomanNumeral => end, Condition::Any => start]);
        RomanNumeralRecognizer { machine: b.build(()) }
    }
}

impl Default for RomanNumeralRecognizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Recognizer for RomanNumeralRecognizer {
    type Output = Span;

    fn kind(&self) -> RecognizerKind {
        RecognizerKind::RomanNumeral
    }

    fn run(&mut self, tokens: &[Token]) -> Scan<Span> {
        Scanner::new(slice::from_mut(&mut self.machine)).run(tokens, None, |_, span| span)
    }
}
