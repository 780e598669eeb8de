//! Demo tokenizer.
//!
//! Token production normally happens upstream; this one exists so the CLI and
//! the tests can feed plain text to the recognizers. It is ASCII-minded: every
//! non-ASCII character becomes a one-character `Symbol` token.
//!
//! ```text
//! "BP 110/80, pt. can't sleep"
//!  BP | 110 | / | 80 | , | pt | . | ca | n't | sleep
//! ```
//!
//! - letters and digits glued to letters form a `Word`
//! - digit runs form a `Number`, with an optional `.digits` fraction
//! - a word ending in `n` before `'t` gives up the `n` to the `n't` clitic
//! - `'` followed by letters is a `Contraction` (`'s`, `'ll`)
//! - each punctuation character is its own token
//! - `\n`, `\r\n` and `\r` become `Newline` tokens; other whitespace separates
//!
//! Offsets are byte offsets into the input.

use crate::{Token, TokenKind};

const PUNCTUATION: &[char] = &['.', ',', ';', ':', '!', '?', '/', '-', '(', ')', '[', ']', '{', '}', '\'', '"'];

pub fn tokenize(text: &str) -> Vec<Token> {
    let bytes = text.as_bytes();
    let mut tokens = Vec::new();
    let mut pos = 0;

    while let Some(c) = text[pos..].chars().next() {
        let start = pos;
        match c {
            '\r' | '\n' => {
                pos += if bytes[pos..].starts_with(b"\r\n") { 2 } else { 1 };
                tokens.push(Token::new(start, pos, &text[start..pos], TokenKind::Newline));
            }
            c if c.is_whitespace() => pos += c.len_utf8(),
            '0'..='9' => {
                pos = digits_end(bytes, pos);
                if bytes.get(pos) == Some(&b'.') && bytes.get(pos + 1).is_some_and(u8::is_ascii_digit) {
                    pos = digits_end(bytes, pos + 1);
                }
                tokens.push(Token::new(start, pos, &text[start..pos], TokenKind::Number));
            }
            c if c.is_ascii_alphabetic() => {
                while bytes.get(pos).is_some_and(u8::is_ascii_alphanumeric) {
                    pos += 1;
                }
                let word_end = if pos - start > 1 && clitic_nt_at(bytes, pos) { pos - 1 } else { pos };
                tokens.push(Token::new(start, word_end, &text[start..word_end], TokenKind::Word));
                if word_end < pos {
                    pos += 2;
                    tokens.push(Token::new(word_end, pos, &text[word_end..pos], TokenKind::Contraction));
                }
            }
            '\'' if bytes.get(pos + 1).is_some_and(u8::is_ascii_alphabetic) => {
                pos += 1;
                while bytes.get(pos).is_some_and(u8::is_ascii_alphabetic) {
                    pos += 1;
                }
                tokens.push(Token::new(start, pos, &text[start..pos], TokenKind::Contraction));
            }
            c => {
                pos += c.len_utf8();
                let kind = if PUNCTUATION.contains(&c) { TokenKind::Punctuation } else { TokenKind::Symbol };
                tokens.push(Token::new(start, pos, &text[start..pos], kind));
            }
        }
    }

    tokens
}

fn digits_end(bytes: &[u8], mut pos: usize) -> usize {
    while bytes.get(pos).is_some_and(u8::is_ascii_digit) {
        pos += 1;
    }
    pos
}

/// A word ending at `end` whose last letter is `n`, followed by `'t`.
fn clitic_nt_at(bytes: &[u8], end: usize) -> bool {
    let n = bytes[end - 1];
    (n == b'n' || n == b'N')
        && bytes.get(end) == Some(&b'\'')
        && bytes.get(end + 1).is_some_and(|t| *t == b't' || *t == b'T')
        && !bytes.get(end + 2).is_some_and(u8::is_ascii_alphanumeric)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(text: &str) -> Vec<String> {
        tokenize(text).into_iter().map(|t| t.text).collect()
    }

    fn kinds(text: &str) -> Vec<TokenKind> {
        tokenize(text).into_iter().map(|t| t.kind).collect()
    }

    #[test]
    fn splits_numbers_words_and_punctuation() {
        assert_eq!(texts("BP 110/80, pt. stable"), ["BP", "110", "/", "80", ",", "pt", ".", "stable"]);
        assert_eq!(
            kinds("BP 110/80"),
            [TokenKind::Word, TokenKind::Number, TokenKind::Punctuation, TokenKind::Number]
        );
    }

    #[test]
    fn decimals_stay_whole() {
        assert_eq!(texts("0.5 mg and 3. then"), ["0.5", "mg", "and", "3", ".", "then"]);
    }

    #[test]
    fn negative_clitic_is_split_off() {
        assert_eq!(texts("can't"), ["ca", "n't"]);
        assert_eq!(texts("Doesn't"), ["Does", "n't"]);
        assert_eq!(kinds("don't")[1], TokenKind::Contraction);
        assert_eq!(texts("patient's"), ["patient", "'s"]);
    }

    #[test]
    fn offsets_point_into_the_input() {
        let text = "no  fever\r\ntoday";
        for token in tokenize(text) {
            assert_eq!(&text[token.begin..token.end], token.text);
        }
        assert_eq!(
            kinds(text),
            [TokenKind::Word, TokenKind::Word, TokenKind::Newline, TokenKind::Word]
        );
    }

    #[test]
    fn non_ascii_becomes_a_symbol() {
        let tokens = tokenize("37°C");
        assert_eq!(tokens[1].kind, TokenKind::Symbol);
        assert_eq!(tokens[1].text, "°");
        assert_eq!(tokens[2].text, "C");
    }

    #[test]
    fn empty_and_blank_input() {
        assert!(tokenize("").is_empty());
        assert!(tokenize("  \t ").is_empty());
    }
}
