//! Override tokens and stream splicing.
//!
//! Some recognizers consume composite tokens produced upstream: a numeric range
//! such as `1 - 5` that has already been recognized should reach the measurement
//! machines as one atomic token, otherwise `5 teaspoons` alone would match.
//!
//! ```text
//! raw:       [1] [-] [5] [teaspoons]
//! override:  [1 - 5]                       keyed by begin offset of "1"
//! fed:       [1 - 5] [teaspoons]
//! ```
//!
//! `Splicer` walks the raw tokens. When a raw token starts where an override
//! starts, the override is fed instead and every following raw token with
//! `begin < override.end` is skipped. The first raw token at or past the
//! override end is always fed raw, even when another override starts there:
//!
//! ```text
//! raw:       [1] [-] [2] [3] [-] [5] [mg]
//! override:  [1 - 2]     [3 - 5]
//! fed:       [1 - 2] [3] [-] [5] [mg]
//! ```

use crate::{Span, Token, TokenKind};
use std::collections::HashMap;

/// Composite tokens keyed by their `begin` offset.
#[derive(Debug, Clone, Default)]
pub struct OverrideSet {
    by_begin: HashMap<usize, Token>,
}

impl OverrideSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an override; an existing one at the same `begin` is replaced and returned.
    pub fn insert(&mut self, token: Token) -> Option<Token> {
        self.by_begin.insert(token.begin, token)
    }

    pub fn get(&self, begin: usize) -> Option<&Token> {
        self.by_begin.get(&begin)
    }

    pub fn len(&self) -> usize {
        self.by_begin.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_begin.is_empty()
    }

    /// Turn recognized spans into composite tokens of `kind`.
    ///
    /// The composite text is rebuilt from the covered raw tokens, keeping the
    /// width of the gaps between them. Spans that cover no token are dropped.
    /// Of several spans starting at the same offset the widest one wins, so
    /// the result does not depend on the order `spans` yields them in.
    pub fn from_spans<I>(tokens: &[Token], spans: I, kind: TokenKind) -> Self
    where
        I: IntoIterator<Item = Span>,
    {
        let mut set = OverrideSet::new();
        for span in spans {
            if set.get(span.begin).is_some_and(|held| held.end >= span.end) {
                continue;
            }
            if let Some(text) = covered_text(tokens, span) {
                set.insert(Token::new(span.begin, span.end, text, kind));
            }
        }
        set
    }
}

impl FromIterator<Token> for OverrideSet {
    fn from_iter<I: IntoIterator<Item = Token>>(iter: I) -> Self {
        let mut set = OverrideSet::new();
        set.extend(iter);
        set
    }
}

impl Extend<Token> for OverrideSet {
    fn extend<I: IntoIterator<Item = Token>>(&mut self, iter: I) {
        for token in iter {
            self.insert(token);
        }
    }
}

/// Text of the tokens lying inside `span`, separated by as many spaces as
/// their offsets are apart. `None` when no token lies inside the span.
pub fn covered_text(tokens: &[Token], span: Span) -> Option<String> {
    let mut text = String::new();
    let mut last_end: Option<usize> = None;
    for token in tokens.iter().filter(|t| t.begin >= span.begin && t.end <= span.end) {
        if let Some(end) = last_end {
            text.extend(std::iter::repeat_n(' ', token.begin.saturating_sub(end)));
        }
        text.push_str(&token.text);
        last_end = Some(token.end);
    }
    last_end.map(|_| text)
}

/// One position handed to the machines.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Fed<'a> {
    /// Index of the raw token this position starts at.
    pub index: usize,
    /// The token actually fed: the raw token or the override replacing it.
    pub token: &'a Token,
    /// Index of the first raw token after this position.
    pub resume: usize,
    pub spliced: bool,
}

/// Iterator over raw tokens with overrides substituted.
pub(crate) struct Splicer<'a> {
    tokens: &'a [Token],
    overrides: Option<&'a OverrideSet>,
    pos: usize,
    /// The previous position was an override; the next raw token is fed as is.
    leaving_override: bool,
    skipped: usize,
    spliced: usize,
}

impl<'a> Splicer<'a> {
    pub fn new(tokens: &'a [Token], overrides: Option<&'a OverrideSet>) -> Self {
        Splicer { tokens, overrides, pos: 0, leaving_override: false, skipped: 0, spliced: 0 }
    }

    /// Raw tokens hidden behind overrides so far.
    pub fn skipped(&self) -> usize {
        self.skipped
    }

    /// Overrides fed so far.
    pub fn spliced(&self) -> usize {
        self.spliced
    }
}

impl<'a> Iterator for Splicer<'a> {
    type Item = Fed<'a>;

    fn next(&mut self) -> Option<Fed<'a>> {
        let index = self.pos;
        let raw = self.tokens.get(index)?;
        let leaving_override = std::mem::take(&mut self.leaving_override);

        if let Some(composite) = self.overrides.filter(|_| !leaving_override).and_then(|o| o.get(raw.begin)) {
            let mut resume = index + 1;
            while self.tokens.get(resume).is_some_and(|t| t.begin < composite.end) {
                resume += 1;
            }
            self.skipped += resume - index - 1;
            self.spliced += 1;
            self.pos = resume;
            self.leaving_override = true;
            return Some(Fed { index, token: composite, resume, spliced: true });
        }

        self.pos += 1;
        Some(Fed { index, token: raw, resume: index + 1, spliced: false })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw() -> Vec<Token> {
        // "1 - 5 teaspoons"
        vec![
            Token::new(0, 1, "1", TokenKind::Number),
            Token::new(2, 3, "-", TokenKind::Punctuation),
            Token::new(4, 5, "5", TokenKind::Number),
            Token::new(6, 15, "teaspoons", TokenKind::Word),
        ]
    }

    #[test]
    fn without_overrides_every_token_is_fed() {
        let tokens = raw();
        let fed: Vec<&str> = Splicer::new(&tokens, None).map(|f| f.token.text.as_str()).collect();
        assert_eq!(fed, ["1", "-", "5", "teaspoons"]);
    }

    #[test]
    fn override_replaces_the_run_it_covers() {
        let tokens = raw();
        let overrides: OverrideSet = [Token::new(0, 5, "1 - 5", TokenKind::Range)].into_iter().collect();
        let mut splicer = Splicer::new(&tokens, Some(&overrides));

        let first = splicer.next().unwrap();
        assert_eq!(first.token.text, "1 - 5");
        assert!(first.spliced);
        assert_eq!((first.index, first.resume), (0, 3));

        let second = splicer.next().unwrap();
        assert_eq!(second.token.text, "teaspoons");
        assert_eq!((second.index, second.resume), (3, 4));
        assert!(splicer.next().is_none());
        assert_eq!(splicer.skipped(), 2);
        assert_eq!(splicer.spliced(), 1);
    }

    #[test]
    fn override_not_aligned_with_a_token_is_ignored() {
        let tokens = raw();
        let overrides: OverrideSet = [Token::new(1, 5, "- 5", TokenKind::Range)].into_iter().collect();
        assert_eq!(Splicer::new(&tokens, Some(&overrides)).count(), 4);
    }

    #[test]
    fn token_after_an_override_is_fed_raw() {
        // "1 - 2 3 - 5 mg"
        let tokens: Vec<Token> = [(0, "1"), (2, "-"), (4, "2"), (6, "3"), (8, "-"), (10, "5"), (12, "mg")]
            .into_iter()
            .map(|(begin, text)| Token::new(begin, begin + text.len(), text, TokenKind::Word))
            .collect();
        let overrides: OverrideSet =
            [Token::new(0, 5, "1 - 2", TokenKind::Range), Token::new(6, 11, "3 - 5", TokenKind::Range)]
                .into_iter()
                .collect();

        let mut splicer = Splicer::new(&tokens, Some(&overrides));
        let fed: Vec<&str> = splicer.by_ref().map(|f| f.token.text.as_str()).collect();
        assert_eq!(fed, ["1 - 2", "3", "-", "5", "mg"]);
        assert_eq!(splicer.spliced(), 1);
        assert_eq!(splicer.skipped(), 2);
    }

    #[test]
    fn from_spans_keeps_the_widest_span_per_begin() {
        let tokens = raw();
        for spans in [[Span::new(0, 5), Span::new(0, 15)], [Span::new(0, 15), Span::new(0, 5)]] {
            let set = OverrideSet::from_spans(&tokens, spans, TokenKind::Range);
            assert_eq!(set.len(), 1);
            assert_eq!(set.get(0).map(|t| t.text.as_str()), Some("1 - 5 teaspoons"));
        }
    }

    #[test]
    fn from_spans_rebuilds_text_with_gaps() {
        let tokens = raw();
        let set = OverrideSet::from_spans(&tokens, [Span::new(0, 5), Span::new(20, 30)], TokenKind::Range);
        assert_eq!(set.len(), 1);
        let composite = set.get(0).unwrap();
        assert_eq!(composite.text, "1 - 5");
        assert_eq!(composite.kind, TokenKind::Range);
        assert_eq!(composite.end, 5);
    }
}
