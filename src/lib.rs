#[macro_use]
mod macros;
mod api;
pub mod engine;
pub mod recognizers;
pub mod tokenizer;

pub use api::{
    Annotation, AnnotateDetails, AnnotateResult, AnnotateResultVerbose, Annotator, Options, RecognizerSet,
    UnknownRecognizer, annotate, annotate_tokens, annotate_verbose, annotate_verbose_with, annotate_with,
};
pub use engine::OverrideSet;
pub use recognizers::{
    DateRecognizer, FractionRecognizer, MeasurementRecognizer, NegationRecognizer, PersonTitleRecognizer,
    RangeRecognizer, Recognizer, RecognizerKind, RomanNumeralRecognizer, StatusIndicatorRecognizer, TimeRecognizer,
};
pub use tokenizer::tokenize;

// --- Tokens -----------------------------------------------------------------

/// Lexical class of a token, assigned by the tokenizer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    Word,
    Punctuation,
    Number,
    Newline,
    /// Clitic split off a word, e.g. `n't` or `'s`.
    Contraction,
    Symbol,
    /// Numeric range merged upstream and spliced in as one token.
    Range,
    /// Roman numeral recognized upstream and spliced in as one token.
    RomanNumeral,
}

/// A token of the source document. `begin`/`end` are offsets into that document.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Token {
    pub begin: usize,
    pub end: usize,
    pub text: String,
    pub kind: TokenKind,
}

impl Token {
    pub fn new(begin: usize, end: usize, text: impl Into<String>, kind: TokenKind) -> Self {
        Token { begin, end, text: text.into(), kind }
    }
}

// --- Spans ------------------------------------------------------------------

/// A recognized `[begin, end)` interval of the source document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Span {
    pub begin: usize,
    pub end: usize,
}

impl Span {
    pub fn new(begin: usize, end: usize) -> Self {
        Span { begin, end }
    }
}

/// Kind of status indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Status {
    /// "history", "hx", "h/o"
    History,
    /// "possible", "probable", "likely"
    Probable,
    /// "family history", "fh", "fx"
    FamilyHistory,
}

impl Status {
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::History => "history",
            Status::Probable => "probable",
            Status::FamilyHistory => "family_history",
        }
    }
}

/// A span tagged with the status it indicates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StatusSpan {
    pub begin: usize,
    pub end: usize,
    pub status: Status,
}

impl StatusSpan {
    pub fn span(&self) -> Span {
        Span::new(self.begin, self.end)
    }
}
