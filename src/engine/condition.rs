//! Token predicates.
//!
//! A `Condition` guards one transition of a `State`. Conditions only ever look
//! at a single token: all sequencing lives in which state a machine occupies.
//!
//! The set of condition kinds is closed, so it is an enum with one exhaustive
//! `satisfies` match rather than a trait object per kind. Composites nest via
//! `Box` and can be written with the `&`, `|` and `!` operators:
//!
//! ```text
//! Condition::punct('/') | Condition::punct('-')     (either separator)
//! !Condition::punct(',') & !year                     (neither comma nor year)
//! ```
//!
//! ## Contract
//!
//! - Pure and total: every kind answers for every token, degenerate ones
//!   included. Numeric kinds parse the covered text and answer `false` when it
//!   is not a number.
//! - Vocabulary kinds (`WordSet`, `TextValue`) are case-insensitive unless built
//!   with the `_exact` constructors. Vocabularies are stored lowercase.

use crate::{Token, TokenKind};
use std::collections::HashSet;
use std::ops::{BitAnd, BitOr, Not};

/// Words accepted by [`Condition::DayNightWord`].
const DAY_NIGHT_WORDS: &[&str] = &["am", "pm", "a.m.", "p.m.", "a.m", "p.m"];

#[derive(Debug, Clone)]
pub enum Condition {
    /// Always true. Closes every transition table.
    Any,
    WordSet { words: &'static HashSet<&'static str>, case_sensitive: bool },
    TextValue { text: &'static str, case_sensitive: bool },
    /// Covered text is exactly this one character.
    Punctuation(char),
    /// Integer within `min..=max`.
    IntegerRange { min: i64, max: i64 },
    /// Any unsigned integer.
    Integer,
    /// Digits with a fractional part, e.g. `0.5` or `.25`.
    DecimalValue,
    /// Integer, decimal, or a pre-merged range token.
    NumberValue,
    /// A pre-merged range token (see `OverrideSet`).
    RangeValue,
    /// One token made only of `IVXLCDM`, any case, or a pre-merged roman numeral token.
    RomanNumeral,
    /// A single `HH:MM` token with both parts inside the given bounds.
    HourMinute { hour_min: u32, hour_max: u32, minute_min: u32, minute_max: u32 },
    /// `am`, `pm` and their dotted spellings.
    DayNightWord,
    And(Box<Condition>, Box<Condition>),
    Or(Box<Condition>, Box<Condition>),
    Not(Box<Condition>),
}

impl Condition {
    pub fn any() -> Self {
        Condition::Any
    }

    /// Case-insensitive membership in `words` (which must be lowercase).
    pub fn word_set(words: &'static HashSet<&'static str>) -> Self {
        Condition::WordSet { words, case_sensitive: false }
    }

    pub fn word_set_exact(words: &'static HashSet<&'static str>) -> Self {
        Condition::WordSet { words, case_sensitive: true }
    }

    /// Case-insensitive equality with `text`.
    pub fn text(text: &'static str) -> Self {
        Condition::TextValue { text, case_sensitive: false }
    }

    pub fn text_exact(text: &'static str) -> Self {
        Condition::TextValue { text, case_sensitive: true }
    }

    pub fn punct(c: char) -> Self {
        Condition::Punctuation(c)
    }

    pub fn int_range(min: i64, max: i64) -> Self {
        Condition::IntegerRange { min, max }
    }

    pub fn hour_minute(hour_min: u32, hour_max: u32, minute_min: u32, minute_max: u32) -> Self {
        Condition::HourMinute { hour_min, hour_max, minute_min, minute_max }
    }

    /// Returns true for the unconditional fallback.
    pub fn is_any(&self) -> bool {
        matches!(self, Condition::Any)
    }

    /// Evaluate the condition against `token`.
    pub fn satisfies(&self, token: &Token) -> bool {
        let text = token.text.as_str();
        match self {
            Condition::Any => true,
            Condition::WordSet { words, case_sensitive: true } => words.contains(text),
            Condition::WordSet { words, case_sensitive: false } => words.contains(text.to_lowercase().as_str()),
            Condition::TextValue { text: expected, case_sensitive: true } => text == *expected,
            Condition::TextValue { text: expected, case_sensitive: false } => text.eq_ignore_ascii_case(expected),
            Condition::Punctuation(c) => {
                let mut chars = text.chars();
                chars.next() == Some(*c) && chars.next().is_none()
            }
            Condition::IntegerRange { min, max } => parse_integer(text).is_some_and(|n| n >= *min && n <= *max),
            Condition::Integer => parse_integer(text).is_some(),
            Condition::DecimalValue => is_decimal(text),
            Condition::NumberValue => {
                token.kind == TokenKind::Range || parse_integer(text).is_some() || is_decimal(text)
            }
            Condition::RangeValue => token.kind == TokenKind::Range,
            Condition::RomanNumeral => {
                token.kind == TokenKind::RomanNumeral || regex!(r"(?i)^[ivxlcdm]+$").is_match(text)
            }
            Condition::HourMinute { hour_min, hour_max, minute_min, minute_max } => {
                parse_hour_minute(text).is_some_and(|(h, m)| {
                    (*hour_min..=*hour_max).contains(&h) && (*minute_min..=*minute_max).contains(&m)
                })
            }
            Condition::DayNightWord => DAY_NIGHT_WORDS.iter().any(|w| text.eq_ignore_ascii_case(w)),
            Condition::And(a, b) => a.satisfies(token) && b.satisfies(token),
            Condition::Or(a, b) => a.satisfies(token) || b.satisfies(token),
            Condition::Not(a) => !a.satisfies(token),
        }
    }
}

impl BitAnd for Condition {
    type Output = Condition;

    fn bitand(self, rhs: Condition) -> Condition {
        Condition::And(Box::new(self), Box::new(rhs))
    }
}

impl BitOr for Condition {
    type Output = Condition;

    fn bitor(self, rhs: Condition) -> Condition {
        Condition::Or(Box::new(self), Box::new(rhs))
    }
}

impl Not for Condition {
    type Output = Condition;

    fn not(self) -> Condition {
        Condition::Not(Box::new(self))
    }
}

/// Parse an unsigned run of ASCII digits. Signs, separators and overflow all
/// yield `None`.
pub(crate) fn parse_integer(text: &str) -> Option<i64> {
    if text.is_empty() || !text.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    text.parse::<i64>().ok()
}

fn is_decimal(text: &str) -> bool {
    regex!(r"^\d*\.\d+$").is_match(text)
}

fn parse_hour_minute(text: &str) -> Option<(u32, u32)> {
    let caps = regex!(r"^(\d{1,2}):(\d{2})$").captures(text)?;
    let hour = caps.get(1)?.as_str().parse().ok()?;
    let minute = caps.get(2)?.as_str().parse().ok()?;
    Some((hour, minute))
}

#[cfg(test)]
mod tests {
    use super::*;
    use once_cell::sync::Lazy;

    static COLORS: Lazy<HashSet<&'static str>> = Lazy::new(|| HashSet::from(["red", "green"]));

    fn word(text: &str) -> Token {
        Token::new(0, text.len(), text, TokenKind::Word)
    }

    fn num(text: &str) -> Token {
        Token::new(0, text.len(), text, TokenKind::Number)
    }

    #[test]
    fn word_set_ignores_case_unless_exact() {
        assert!(Condition::word_set(&COLORS).satisfies(&word("RED")));
        assert!(!Condition::word_set_exact(&COLORS).satisfies(&word("RED")));
        assert!(Condition::word_set_exact(&COLORS).satisfies(&word("red")));
        assert!(!Condition::word_set(&COLORS).satisfies(&word("blue")));
    }

    #[test]
    fn integer_range_is_inclusive_and_rejects_non_numbers() {
        let c = Condition::int_range(80, 200);
        assert!(c.satisfies(&num("80")));
        assert!(c.satisfies(&num("200")));
        assert!(!c.satisfies(&num("79")));
        assert!(!c.satisfies(&num("201")));
        assert!(!c.satisfies(&word("eighty")));
        assert!(!c.satisfies(&num("-90")));
        assert!(!c.satisfies(&num("")));
        assert!(!c.satisfies(&num("99999999999999999999999")));
    }

    #[test]
    fn numbers_and_decimals() {
        assert!(Condition::DecimalValue.satisfies(&num("0.5")));
        assert!(Condition::DecimalValue.satisfies(&num(".25")));
        assert!(!Condition::DecimalValue.satisfies(&num("5")));
        assert!(!Condition::DecimalValue.satisfies(&num("5.")));
        assert!(Condition::NumberValue.satisfies(&num("5")));
        assert!(Condition::NumberValue.satisfies(&num("2.5")));
        assert!(!Condition::NumberValue.satisfies(&word("five")));

        let range = Token::new(0, 5, "1 - 5", TokenKind::Range);
        assert!(Condition::NumberValue.satisfies(&range));
        assert!(Condition::RangeValue.satisfies(&range));
        assert!(!Condition::RangeValue.satisfies(&num("5")));
    }

    #[test]
    fn punctuation_needs_the_whole_token() {
        assert!(Condition::punct('/').satisfies(&word("/")));
        assert!(!Condition::punct('/').satisfies(&word("//")));
        assert!(!Condition::punct('/').satisfies(&word("")));
    }

    #[test]
    fn roman_numerals() {
        assert!(Condition::RomanNumeral.satisfies(&word("III")));
        assert!(Condition::RomanNumeral.satisfies(&word("iv")));
        assert!(!Condition::RomanNumeral.satisfies(&word("IIIQ")));
        assert!(!Condition::RomanNumeral.satisfies(&word("")));
        assert!(Condition::RomanNumeral.satisfies(&Token::new(0, 2, "IV", TokenKind::RomanNumeral)));
    }

    #[test]
    fn hour_minute_and_day_night() {
        let c = Condition::hour_minute(1, 12, 0, 59);
        assert!(c.satisfies(&num("10:30")));
        assert!(c.satisfies(&num("9:05")));
        assert!(!c.satisfies(&num("13:00")));
        assert!(!c.satisfies(&num("10:60")));
        assert!(!c.satisfies(&num("1030")));

        assert!(Condition::DayNightWord.satisfies(&word("PM")));
        assert!(Condition::DayNightWord.satisfies(&word("a.m.")));
        assert!(!Condition::DayNightWord.satisfies(&word("morning")));
    }

    #[test]
    fn composites_follow_boolean_logic() {
        let sep = Condition::punct('/') | Condition::punct('-');
        assert!(sep.satisfies(&word("-")));
        assert!(!sep.satisfies(&word(",")));

        let neither = !Condition::punct('/') & !Condition::punct('-');
        assert!(neither.satisfies(&word("report")));
        assert!(!neither.satisfies(&word("/")));

        let year_not_day = Condition::int_range(1, 2999) & !Condition::int_range(1, 31);
        assert!(year_not_day.satisfies(&num("2002")));
        assert!(!year_not_day.satisfies(&num("15")));
    }
}
