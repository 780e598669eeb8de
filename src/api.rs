use crate::engine::{OverrideSet, RecognizerMetrics, RunMetrics, Scan, covered_text};
use crate::recognizers::{
    DateRecognizer, FractionRecognizer, MeasurementRecognizer, NegationRecognizer, PersonTitleRecognizer,
    RangeRecognizer, Recognizer, RecognizerKind, RomanNumeralRecognizer, StatusIndicatorRecognizer, TimeRecognizer,
};
use crate::{Span, Status, Token, TokenKind, tokenize};
use std::cmp::Ordering;
use std::str::FromStr;
use std::time::{Duration, Instant};
use thiserror::Error;
use tracing::debug;

bitflags::bitflags! {
    /// Which recognizers an annotation run executes.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct RecognizerSet: u16 {
        const DATE             = 1 << 0;
        const TIME             = 1 << 1;
        const FRACTION         = 1 << 2;
        const ROMAN_NUMERAL    = 1 << 3;
        const PERSON_TITLE     = 1 << 4;
        const MEASUREMENT      = 1 << 5;
        const RANGE            = 1 << 6;
        const STATUS_INDICATOR = 1 << 7;
        const NEGATION         = 1 << 8;
    }
}

impl Default for RecognizerSet {
    fn default() -> Self {
        RecognizerSet::all()
    }
}

impl From<RecognizerKind> for RecognizerSet {
    fn from(kind: RecognizerKind) -> Self {
        match kind {
            RecognizerKind::Date => RecognizerSet::DATE,
            RecognizerKind::Time => RecognizerSet::TIME,
            RecognizerKind::Fraction => RecognizerSet::FRACTION,
            RecognizerKind::RomanNumeral => RecognizerSet::ROMAN_NUMERAL,
            RecognizerKind::PersonTitle => RecognizerSet::PERSON_TITLE,
            RecognizerKind::Measurement => RecognizerSet::MEASUREMENT,
            RecognizerKind::Range => RecognizerSet::RANGE,
            RecognizerKind::StatusIndicator => RecognizerSet::STATUS_INDICATOR,
            RecognizerKind::Negation => RecognizerSet::NEGATION,
        }
    }
}

impl FromIterator<RecognizerKind> for RecognizerSet {
    fn from_iter<I: IntoIterator<Item = RecognizerKind>>(iter: I) -> Self {
        iter.into_iter().fold(RecognizerSet::empty(), |set, kind| set | RecognizerSet::from(kind))
    }
}

impl RecognizerSet {
    pub fn includes(&self, kind: RecognizerKind) -> bool {
        self.contains(kind.into())
    }
}

/// A recognizer name that does not match any known recognizer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown recognizer `{0}`")]
pub struct UnknownRecognizer(pub String);

impl FromStr for RecognizerKind {
    type Err = UnknownRecognizer;

    /// Accepts the snake_case name (`roman_numeral`), case-insensitively and
    /// with `-` in place of `_`. `status` is short for `status_indicator`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase().replace('-', "_");
        if wanted == "status" {
            return Ok(RecognizerKind::StatusIndicator);
        }
        RecognizerKind::ALL
            .into_iter()
            .find(|kind| kind.name() == wanted)
            .ok_or_else(|| UnknownRecognizer(s.trim().to_string()))
    }
}

impl FromStr for RecognizerSet {
    type Err = UnknownRecognizer;

    /// Comma-separated recognizer names, or `all`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut set = RecognizerSet::empty();
        for part in s.split(',').map(str::trim).filter(|p| !p.is_empty()) {
            if part.eq_ignore_ascii_case("all") {
                set = RecognizerSet::all();
            } else {
                set |= RecognizerSet::from(part.parse::<RecognizerKind>()?);
            }
        }
        Ok(set)
    }
}

/// Options that select what an annotation run does.
#[derive(Debug, Clone, Default)]
pub struct Options {
    pub recognizers: RecognizerSet,
}

/// One recognized span, typed by the recognizer that found it.
///
/// `begin`/`end` are byte offsets into the annotated text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Annotation {
    pub kind: RecognizerKind,
    /// Covered text.
    pub body: String,
    pub begin: usize,
    pub end: usize,
    /// Set for status indicators only.
    pub status: Option<Status>,
}

impl Annotation {
    pub fn name(&self) -> &'static str {
        self.kind.name()
    }

    pub fn span(&self) -> Span {
        Span::new(self.begin, self.end)
    }
}

/// Result from [`annotate`] and [`annotate_with`].
#[derive(Debug, Clone)]
pub struct AnnotateResult {
    pub text: String,
    /// Annotations ordered by position.
    pub annotations: Vec<Annotation>,
    pub elapsed: Duration,
}

/// Additional details returned by [`annotate_verbose`] and [`annotate_verbose_with`].
#[derive(Debug, Clone)]
pub struct AnnotateDetails {
    pub tokens: Vec<Token>,
    pub metrics: RunMetrics,
}

#[derive(Debug, Clone)]
pub struct AnnotateResultVerbose {
    pub text: String,
    pub annotations: Vec<Annotation>,
    pub elapsed: Duration,
    pub details: AnnotateDetails,
}

/// All nine recognizers, ready to run over many documents.
///
/// Recognizers run in [`RecognizerKind::ALL`] order. Roman numeral spans are
/// spliced into the range scan as `TokenKind::RomanNumeral` overrides, and
/// range spans into the measurement scan as `TokenKind::Range` overrides. A
/// recognizer that feeds an enabled one runs even when its own annotations
/// are not requested.
#[derive(Debug, Clone, Default)]
pub struct Annotator {
    date: DateRecognizer,
    time: TimeRecognizer,
    fraction: FractionRecognizer,
    roman_numeral: RomanNumeralRecognizer,
    person_title: PersonTitleRecognizer,
    measurement: MeasurementRecognizer,
    range: RangeRecognizer,
    status: StatusIndicatorRecognizer,
    negation: NegationRecognizer,
}

impl Annotator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Tokenize `text` and run the enabled recognizers over it.
    pub fn annotate(&mut self, text: &str, options: &Options) -> AnnotateResult {
        let started = Instant::now();
        let tokens = tokenize(text);
        let (annotations, _) = self.run(Some(text), &tokens, options);
        AnnotateResult { text: text.to_string(), annotations, elapsed: started.elapsed() }
    }

    /// Run the enabled recognizers over tokens produced elsewhere.
    ///
    /// Annotation bodies are rebuilt from the covered tokens.
    pub fn annotate_tokens(&mut self, tokens: &[Token], options: &Options) -> Vec<Annotation> {
        self.run(None, tokens, options).0
    }

    /// Like [`Annotator::annotate`], also returning tokens and per-recognizer metrics.
    pub fn annotate_verbose(&mut self, text: &str, options: &Options) -> AnnotateResultVerbose {
        let started = Instant::now();
        let tokens = tokenize(text);
        let tokenize_elapsed = started.elapsed();

        let (annotations, recognizers) = self.run(Some(text), &tokens, options);
        let elapsed = started.elapsed();

        let metrics = RunMetrics { total: elapsed, tokenize: tokenize_elapsed, tokens: tokens.len(), recognizers };
        AnnotateResultVerbose {
            text: text.to_string(),
            annotations,
            elapsed,
            details: AnnotateDetails { tokens, metrics },
        }
    }

    fn run(
        &mut self,
        text: Option<&str>,
        tokens: &[Token],
        options: &Options,
    ) -> (Vec<Annotation>, Vec<RecognizerMetrics>) {
        let enabled = options.recognizers;
        let wants_ranges = enabled.intersects(RecognizerSet::RANGE | RecognizerSet::MEASUREMENT);
        let mut out = Collector { text, tokens, annotations: Vec::new(), metrics: Vec::new() };
        let mut numerals = OverrideSet::new();
        let mut ranges = OverrideSet::new();

        for kind in RecognizerKind::ALL {
            let feeds_another = match kind {
                RecognizerKind::RomanNumeral => wants_ranges,
                RecognizerKind::Range => enabled.includes(RecognizerKind::Measurement),
                _ => false,
            };
            if !enabled.includes(kind) && !feeds_another {
                continue;
            }

            let started = Instant::now();
            match kind {
                RecognizerKind::RomanNumeral => {
                    let scan = self.roman_numeral.run(tokens);
                    if feeds_another {
                        numerals = OverrideSet::from_spans(tokens, scan.spans.iter().copied(), TokenKind::RomanNumeral);
                    }
                    if enabled.includes(kind) {
                        out.push(kind, scan, started.elapsed(), plain);
                    }
                }
                RecognizerKind::Range => {
                    let scan = self.range.run_with_overrides(tokens, &numerals);
                    if feeds_another {
                        ranges = OverrideSet::from_spans(tokens, scan.spans.iter().copied(), TokenKind::Range);
                    }
                    if enabled.includes(kind) {
                        out.push(kind, scan, started.elapsed(), plain);
                    }
                }
                RecognizerKind::Measurement => {
                    out.push(kind, self.measurement.run_with_overrides(tokens, &ranges), started.elapsed(), plain)
                }
                RecognizerKind::Date => out.push(kind, self.date.run(tokens), started.elapsed(), plain),
                RecognizerKind::Time => out.push(kind, self.time.run(tokens), started.elapsed(), plain),
                RecognizerKind::Fraction => out.push(kind, self.fraction.run(tokens), started.elapsed(), plain),
                RecognizerKind::PersonTitle => out.push(kind, self.person_title.run(tokens), started.elapsed(), plain),
                RecognizerKind::StatusIndicator => {
                    out.push(kind, self.status.run(tokens), started.elapsed(), |s| (s.span(), Some(s.status)))
                }
                RecognizerKind::Negation => out.push(kind, self.negation.run(tokens), started.elapsed(), plain),
            }
        }

        out.annotations.sort_by(by_position);
        (out.annotations, out.metrics)
    }
}

fn plain(span: &Span) -> (Span, Option<Status>) {
    (*span, None)
}

fn by_position(a: &Annotation, b: &Annotation) -> Ordering {
    a.begin
        .cmp(&b.begin)
        .then(a.end.cmp(&b.end))
        .then(a.kind.cmp(&b.kind))
        .then(a.status.cmp(&b.status))
}

/// Accumulates annotations and metrics while the recognizers run.
struct Collector<'a> {
    text: Option<&'a str>,
    tokens: &'a [Token],
    annotations: Vec<Annotation>,
    metrics: Vec<RecognizerMetrics>,
}

impl Collector<'_> {
    fn push<S>(
        &mut self,
        kind: RecognizerKind,
        scan: Scan<S>,
        duration: Duration,
        parts: impl Fn(&S) -> (Span, Option<Status>),
    ) {
        debug!(
            recognizer = %kind,
            spans = scan.spans.len(),
            fed = scan.stats.tokens_fed,
            skipped = scan.stats.tokens_skipped,
            elapsed_us = duration.as_micros() as u64,
            "recognizer run"
        );

        for found in &scan.spans {
            let (span, status) = parts(found);
            let body = self
                .text
                .and_then(|t| t.get(span.begin..span.end))
                .map(str::to_string)
                .or_else(|| covered_text(self.tokens, span))
                .unwrap_or_default();
            self.annotations.push(Annotation { kind, body, begin: span.begin, end: span.end, status });
        }

        self.metrics.push(RecognizerMetrics { kind, duration, spans: scan.spans.len(), stats: scan.stats });
    }
}

/// Annotate `text` with every recognizer.
///
/// # Example
/// ```
/// use clinlex::annotate;
///
/// let out = annotate("Patient denies chest pain. Took 2 mg.");
/// let names: Vec<&str> = out.annotations.iter().map(|a| a.name()).collect();
/// assert_eq!(names, ["negation", "measurement"]);
/// ```
pub fn annotate(text: &str) -> AnnotateResult {
    annotate_with(text, &Options::default())
}

pub fn annotate_with(text: &str, options: &Options) -> AnnotateResult {
    Annotator::new().annotate(text, options)
}

pub fn annotate_tokens(tokens: &[Token], options: &Options) -> Vec<Annotation> {
    Annotator::new().annotate_tokens(tokens, options)
}

pub fn annotate_verbose(text: &str) -> AnnotateResultVerbose {
    annotate_verbose_with(text, &Options::default())
}

/// Annotate `text` and return per-recognizer counters and timings as well.
pub fn annotate_verbose_with(text: &str, options: &Options) -> AnnotateResultVerbose {
    Annotator::new().annotate_verbose(text, options)
}
