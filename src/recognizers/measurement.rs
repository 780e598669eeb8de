//! Measurements.
//!
//! ```text
//! blood pressure:      INT(80..=200) / INT(60..=160)       110/80
//! substance quantity:  (number | range | word-number) UNIT  2 mg, 1 - 5 teaspoons
//! ```
//!
//! Ranges recognized upstream should be passed in as overrides, so that the
//! whole `1 - 5 teaspoons` matches instead of the partial `5 teaspoons`.

use super::vocab::WORD_NUMBERS;
use super::{Recognizer, RecognizerKind};
use crate::engine::{Condition, Machine, MachineBuilder, OverrideSet, Scan, Scanner};
use crate::{Span, Token};
use once_cell::sync::Lazy;
use std::collections::HashSet;

const SYSTOLIC: (i64, i64) = (80, 200);
const DIASTOLIC: (i64, i64) = (60, 160);

static UNITS_FULL: Lazy<HashSet<&'static str>> = word_set![
    "gallon", "gallons", "pint", "pints", "ounce", "ounces", "pound", "pounds", "drop", "drops", "hour", "hours",
    "minute", "minutes", "second", "seconds", "foot", "feet", "grain", "grains", "teaspoon", "teaspoons",
    "tablespoon", "tablespoons", "kilogram", "kilograms", "gram", "grams", "centigram", "centigrams", "milligram",
    "milligrams", "liter", "liters", "centiliter", "centiliters", "milliliter", "milliliters", "meter", "meters",
    "centimeter", "centimeters", "millimeter", "millimeters",
];

static UNITS_SHORT: Lazy<HashSet<&'static str>> = word_set![
    "gal", "gals", "pt", "pts", "oz", "ozs", "lb", "lbs", "gtts", "hr", "min", "sec", "ft", "gr", "tsp", "tbsp", "g",
    "kg", "mg", "l", "cl", "ml", "m", "cm", "mm", "cc",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MeasurementMachine {
    BloodPressure,
    SubstanceQuantity,
}

#[derive(Debug, Clone)]
pub struct MeasurementRecognizer {
    machines: [Machine<MeasurementMachine>; 2],
}

impl MeasurementRecognizer {
    pub fn new() -> Self {
        MeasurementRecognizer { machines: [blood_pressure_machine(), substance_quantity_machine()] }
    }

    /// Scan with composite tokens spliced in where they line up.
    pub fn run_with_overrides(&mut self, tokens: &[Token], overrides: &OverrideSet) -> Scan<Span> {
        Scanner::new(&mut self.machines).run(tokens, Some(overrides), |_, span| span)
    }

    pub fn execute_with_overrides(&mut self, tokens: &[Token], overrides: &OverrideSet) -> HashSet<Span> {
        self.run_with_overrides(tokens, overrides).spans
    }
}

impl Default for MeasurementRecognizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Recognizer for MeasurementRecognizer {
    type Output = Span;

    fn kind(&self) -> RecognizerKind {
        RecognizerKind::Measurement
    }

    fn run(&mut self, tokens: &[Token]) -> Scan<Span> {
        Scanner::new(&mut self.machines).run(tokens, None, |_, span| span)
    }
}

fn blood_pressure_machine() -> Machine<MeasurementMachine> {
    let mut b = MachineBuilder::new("blood pressure");
    let start = b.start();
    let systolic = b.state("SYSTOLIC");
    let fslash = b.state("FSLASH");
    let end = b.end("END");

    transitions!(b, start => [Condition::int_range(SYSTOLIC.0, SYSTOLIC.1) => systolic, Condition::Any => start]);
    transitions!(b, systolic => [Condition::punct('/') => fslash]);
    transitions!(b, fslash => [Condition::int_range(DIASTOLIC.0, DIASTOLIC.1) => end]);

    b.build(MeasurementMachine::BloodPressure)
}

fn substance_quantity_machine() -> Machine<MeasurementMachine> {
    let mut b = MachineBuilder::new("substance quantity");
    let start = b.start();
    let quantity = b.state("QUANTITY");
    let end = b.end("END");

    transitions!(b, start => [
        Condition::NumberValue => quantity,
        Condition::RangeValue => quantity,
        Condition::word_set(&WORD_NUMBERS) => quantity,
        Condition::Any => start,
    ]);
    transitions!(b, quantity => [
        Condition::word_set(&UNITS_FULL) => end,
        Condition::word_set(&UNITS_SHORT) => end,
    ]);

    b.build(MeasurementMachine::SubstanceQuantity)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::TokenKind;

    fn raw_range_phrase() -> Vec<Token> {
        vec![
            Token::new(0, 1, "1", TokenKind::Number),
            Token::new(2, 3, "-", TokenKind::Punctuation),
            Token::new(4, 5, "5", TokenKind::Number),
            Token::new(6, 15, "teaspoons", TokenKind::Word),
        ]
    }

    #[test]
    fn without_overrides_only_the_tail_matches() {
        let spans = MeasurementRecognizer::new().execute(&raw_range_phrase());
        assert_eq!(spans.into_iter().collect::<Vec<_>>(), [Span::new(4, 15)]);
    }

    #[test]
    fn a_spliced_range_is_one_quantity() {
        let tokens = raw_range_phrase();
        let overrides = OverrideSet::from_spans(&tokens, [Span::new(0, 5)], TokenKind::Range);
        let scan = MeasurementRecognizer::new().run_with_overrides(&tokens, &overrides);

        assert_eq!(scan.spans.into_iter().collect::<Vec<_>>(), [Span::new(0, 15)]);
        assert_eq!(scan.stats.tokens_fed, 2);
        assert_eq!(scan.stats.tokens_skipped, 2);
        assert_eq!(scan.stats.hits_by_machine.get("substance quantity"), Some(&1));
    }
}
