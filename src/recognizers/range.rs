//! Numeric ranges: `1 - 5`, `II-IV`, `two - three`.
//!
//! Operands are integers, roman numerals or spelled-out numbers, and the dash
//! must directly follow the left operand. Range spans feed the measurement
//! recognizer as override tokens (see `OverrideSet::from_spans`).

use super::vocab::WORD_NUMBERS;
use super::{Recognizer, RecognizerKind};
use crate::engine::{Condition, Machine, MachineBuilder, OverrideSet, Scan, Scanner};
use crate::{Span, Token};
use std::collections::HashSet;
use std::slice;

#[derive(Debug, Clone)]
pub struct RangeRecognizer {
    machine: Machine,
}

impl RangeRecognizer {
    pub fn new() -> Self {
        RangeRecognizer { machine: range_machine() }
    }

    /// Scan with composite tokens spliced in where they line up.
    pub fn run_with_overrides(&mut self, tokens: &[Token], overrides: &OverrideSet) -> Scan<Span> {
        Scanner::new(slice::from_mut(&mut self.machine)).run(tokens, Some(overrides), |_, span| span)
    }

    pub fn execute_with_overrides(&mut self, tokens: &[Token], overrides: &OverrideSet) -> HashSet<Span> {
        self.run_with_overrides(tokens, overrides).spans
    }
}

impl Default for RangeRecognizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Recognizer for RangeRecognizer {
    type Output = Span;

    fn kind(&self) -> RecognizerKind {
        RecognizerKind::Range
    }

    fn run(&mut self, tokens: &[Token]) -> Scan<Span> {
        Scanner::new(slice::from_mut(&mut self.machine)).run(tokens, None, |_, span| span)
    }
}

fn operand() -> Condition {
    Condition::Integer | Condition::RomanNumeral | Condition::word_set(&WORD_NUMBERS)
}

fn range_machine() -> Machine {
    let mut b = MachineBuilder::new("range");
    let start = b.start();
    let left_int = b.state("LEFT_NUM_INTEGER");
    let left_roman = b.state("LEFT_NUM_ROMAN");
    let left_text = b.state("LEFT_NUM_TEXT");
    let dash = b.state("DASH");
    let end = b.end("END");

    transitions!(b, start => [
        Condition::Integer => left_int,
        Condition::RomanNumeral => left_roman,
        Condition::word_set(&WORD_NUMBERS) => left_text,
        Condition::Any => start,
    ]);
    for left in [left_int, left_roman, left_text] {
        transitions!(b, left => [Condition::punct('-') => dash]);
    }
    transitions!(b, dash => [operand() => end]);

    b.build(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::TokenKind;

    #[test]
    fn left_operand_kinds_get_their_own_states() {
        let rec = RangeRecognizer::new();
        let names: Vec<&str> = rec.machine.states().iter().map(|s| s.name()).collect();
        assert_eq!(names, ["START", "LEFT_NUM_INTEGER", "LEFT_NUM_ROMAN", "LEFT_NUM_TEXT", "DASH", "END"]);
    }

    #[test]
    fn an_override_hides_the_operands_it_covers() {
        let tokens = vec![
            Token::new(0, 1, "1", TokenKind::Number),
            Token::new(2, 3, "-", TokenKind::Punctuation),
            Token::new(4, 5, "5", TokenKind::Number),
        ];
        let overrides: OverrideSet = [Token::new(0, 3, "1 -", TokenKind::Symbol)].into_iter().collect();
        let mut rec = RangeRecognizer::new();
        assert_eq!(rec.execute(&tokens).len(), 1);
        assert!(rec.execute_with_overrides(&tokens, &overrides).is_empty());
    }
}
