//! Lexical recognizers.
//!
//! Each recognizer is configuration over the engine: static vocabularies plus
//! one or more machines built from them at construction. `execute` runs the
//! shared scanner over a token slice and returns the set of recognized spans.
//!
//! | Recognizer | Machines | Output |
//! |---|---|---|
//! | `DateRecognizer` | numeric, textual | `Span` |
//! | `TimeRecognizer` | time | `Span` |
//! | `FractionRecognizer` | fraction | `Span` |
//! | `RomanNumeralRecognizer` | roman numeral | `Span` |
//! | `PersonTitleRecognizer` | person title | `Span` |
//! | `MeasurementRecognizer` | blood pressure, substance quantity | `Span` (override-aware) |
//! | `RangeRecognizer` | range | `Span` (override-aware) |
//! | `StatusIndicatorRecognizer` | history, probable, family history | `StatusSpan` |
//! | `NegationRecognizer` | aspectual, nominal, adjectival | `Span` |
//!
//! Recognizers are reusable but not reentrant: `execute` takes `&mut self`
//! because it moves the machines. They are cheap to `Clone` (vocabularies are
//! shared statics), so concurrent callers keep one instance per worker.

mod date;
mod fraction;
mod measurement;
mod negation;
mod person_title;
mod range;
mod roman_numeral;
mod status;
mod time;
mod vocab;


pub use date::{DateMachine, DateRecognizer};
pub use fraction::FractionRecognizer;
pub use measurement::{MeasurementMachine, MeasurementRecognizer};
pub use negation::{NegationMachine, NegationRecognizer};
pub use person_title::PersonTitleRecognizer;
pub use range::RangeRecognizer;
pub use roman_numeral::RomanNumeralRecognizer;
pub use status::StatusIndicatorRecognizer;
pub use time::TimeRecognizer;

use crate::Token;
use crate::engine::Scan;
use std::collections::HashSet;
use std::fmt;
use std::hash::Hash;

/// Identifies one of the nine recognizers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RecognizerKind {
    Date,
    Time,
    Fraction,
    RomanNumeral,
    PersonTitle,
    Measurement,
    Range,
    StatusIndicator,
    Negation,
}

impl RecognizerKind {
    /// Every kind, in the order an annotation run executes them. Roman
    /// numerals run before ranges and ranges before measurements, because each
    /// feeds the next as override tokens.
    pub const ALL: [RecognizerKind; 9] = [
        RecognizerKind::Date,
        RecognizerKind::Time,
        RecognizerKind::RomanNumeral,
        RecognizerKind::Fraction,
        RecognizerKind::Range,
        RecognizerKind::Measurement,
        RecognizerKind::PersonTitle,
        RecognizerKind::StatusIndicator,
        RecognizerKind::Negation,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            RecognizerKind::Date => "date",
            RecognizerKind::Time => "time",
            RecognizerKind::Fraction => "fraction",
            RecognizerKind::RomanNumeral => "roman_numeral",
            RecognizerKind::PersonTitle => "person_title",
            RecognizerKind::Measurement => "measurement",
            RecognizerKind::Range => "range",
            RecognizerKind::StatusIndicator => "status_indicator",
            RecognizerKind::Negation => "negation",
        }
    }
}

impl fmt::Display for RecognizerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A named lexical pattern detector.
pub trait Recognizer {
    type Output: Eq + Hash;

    fn kind(&self) -> RecognizerKind;

    /// Scan `tokens`, returning spans together with run counters.
    fn run(&mut self, tokens: &[Token]) -> Scan<Self::Output>;

    /// Scan `tokens` and return the recognized spans.
    fn execute(&mut self, tokens: &[Token]) -> HashSet<Self::Output> {
        self.run(tokens).spans
    }
}
