//! Negation cues.
//!
//! Three machines run side by side:
//!
//! - aspectual: negative verbs (`denies`), particles after a modal or regular
//!   verb (`did not`, `has no`), and the `rule out` collocation
//! - nominal: negative determiners and prepositions, optionally followed by a
//!   generic clinical noun (`no evidence`, `without`)
//! - adjectival: negative adjectives followed by a preposition (`negative for`)
//!
//! Every cue ends on a non-terminal end, so the word that follows a cue (the
//! negated finding) is never part of the span: `denies chest pain` yields
//! `denies`.

use super::{Recognizer, RecognizerKind};
use crate::engine::{Condition, Machine, MachineBuilder, Scan, Scanner};
use crate::{Span, Token};
use once_cell::sync::Lazy;
use std::collections::HashSet;

static MODAL_VERBS: Lazy<HashSet<&'static str>> =
    word_set!["can", "ca", "will", "must", "could", "would", "should", "shall", "did"];

static NEG_PARTICLES: Lazy<HashSet<&'static str>> = word_set!["not", "n't", "'t"];

static NEG_COLLOCATIONS: Lazy<HashSet<&'static str>> = word_set!["rule", "rules", "ruled", "ruling", "rule-out"];

static NEG_COLLOCATION_PARTICLES: Lazy<HashSet<&'static str>> = word_set!["out"];

static REG_VERBS: Lazy<HashSet<&'static str>> = word_set![
    "reveal", "reveals", "revealed", "revealing", "have", "had", "has", "feel", "feels", "felt", "feeling",
    "complain", "complains", "complained", "complaining", "demonstrate", "demonstrates", "demonstrated",
    "demonstrating", "appear", "appears", "appeared", "appearing", "caused", "cause", "causing", "causes", "find",
    "finds", "found", "discover", "discovered", "discovers",
];

static NEG_VERBS: Lazy<HashSet<&'static str>> = word_set![
    "deny", "denies", "denied", "denying", "fail", "fails", "failed", "failing", "decline", "declines", "declined",
    "declining", "exclude", "excludes", "excluding", "excluded",
];

static NEG_PREPOSITIONS: Lazy<HashSet<&'static str>> = word_set!["without", "absent", "none"];

static NEG_DETERMINERS: Lazy<HashSet<&'static str>> = word_set!["no", "any", "neither", "nor", "never"];

static REG_NOUNS: Lazy<HashSet<&'static str>> = word_set![
    "evidence", "indication", "indications", "sign", "signs", "symptoms", "symptom", "sx", "dx", "diagnosis",
    "history", "hx", "findings",
];

static REG_PREPOSITIONS: Lazy<HashSet<&'static str>> = word_set!["of", "in", "for", "with"];

static NEG_ADJECTIVES: Lazy<HashSet<&'static str>> = word_set!["unremarkable", "unlikely", "negative"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NegationMachine {
    Aspectual,
    Nominal,
    Adjectival,
}

#[derive(Debug, Clone)]
pub struct NegationRecognizer {
    machines: [Machine<NegationMachine>; 3],
}

impl NegationRecognizer {
    pub fn new() -> Self {
        NegationRecognizer { machines: [aspectual_machine(), nominal_machine(), adjectival_machine()] }
    }
}

impl Default for NegationRecognizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Recognizer for NegationRecognizer {
    type Output = Span;

    fn kind(&self) -> RecognizerKind {
        RecognizerKind::Negation
    }

    fn run(&mut self, tokens: &[Token]) -> Scan<Span> {
        Scanner::new(&mut self.machines).run(tokens, None, |_, span| span)
    }
}

fn aspectual_machine() -> Machine<NegationMachine> {
    let mut b = MachineBuilder::new("aspectual negation");
    let start = b.start();
    let reg_modal = b.state("REG_MODAL");
    let neg_part = b.state("NEG_PART");
    let neg_verb = b.state("NEG_VERB");
    let neg_colloc = b.state("NEG_COLLOC");
    let neg_col_part = b.state("NEG_COLPART");
    let any = b.state("ANY");
    let nt_end = b.non_terminal_end("NON_TERMINAL_END");

    let neg_part_or_det = || Condition::word_set(&NEG_PARTICLES) | Condition::word_set(&NEG_DETERMINERS);
    let colloc = || Condition::word_set(&NEG_COLLOCATIONS);

    transitions!(b, start => [
        Condition::word_set(&NEG_VERBS) => neg_verb,
        colloc() => neg_colloc,
        Condition::word_set(&MODAL_VERBS) | Condition::word_set(&REG_VERBS) => reg_modal,
        neg_part_or_det() => neg_part,
        Condition::Any => start,
    ]);
    transitions!(b, reg_modal => [
        colloc() => neg_colloc,
        neg_part_or_det() => neg_part,
        Condition::Any => any,
    ]);
    transitions!(b, neg_colloc => [
        Condition::word_set(&NEG_COLLOCATION_PARTICLES) => neg_col_part,
        Condition::Any => start,
    ]);
    transitions!(b, neg_col_part => [Condition::Any => nt_end]);
    transitions!(b, any => [neg_part_or_det() => neg_part, Condition::Any => start]);
    transitions!(b, neg_part => [!colloc() => nt_end, Condition::Any => start]);
    transitions!(b, neg_verb => [!colloc() => nt_end, Condition::Any => start]);

    b.build(NegationMachine::Aspectual)
}

fn nominal_machine() -> Machine<NegationMachine> {
    let mut b = MachineBuilder::new("nominal negation");
    let start = b.start();
    let neg_prep = b.state("NEG_PREP");
    let neg_det = b.state("NEG_DET");
    let reg_noun = b.state("REG_NOUN");
    let nt_end = b.non_terminal_end("NON_TERMINAL_END");

    transitions!(b, start => [
        Condition::word_set(&NEG_DETERMINERS) => neg_det,
        Condition::word_set(&NEG_PREPOSITIONS) => neg_prep,
        Condition::Any => start,
    ]);
    transitions!(b, neg_prep => [Condition::Any => nt_end]);
    transitions!(b, neg_det => [Condition::word_set(&REG_NOUNS) => reg_noun, Condition::Any => nt_end]);
    transitions!(b, reg_noun => [Condition::Any => nt_end]);

    b.build(NegationMachine::Nominal)
}

fn adjectival_machine() -> Machine<NegationMachine> {
    let mut b = MachineBuilder::new("adjectival negation");
    let start = b.start();
    let neg_adj = b.state("NEG_ADJ");
    let reg_prep = b.state("REG_PREP");
    let nt_end = b.non_terminal_end("NON_TERMINAL_END");

    transitions!(b, start => [Condition::word_set(&NEG_ADJECTIVES) => neg_adj, Condition::Any => start]);
    transitions!(b, neg_adj => [Condition::word_set(&REG_PREPOSITIONS) => reg_prep, Condition::Any => start]);
    transitions!(b, reg_prep => [Condition::Any => nt_end]);

    b.build(NegationMachine::Adjectival)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::TokenKind;

    fn words(text: &str) -> Vec<Token> {
        let mut out = Vec::new();
        let mut offset = 0;
        for w in text.split(' ') {
            out.push(Token::new(offset, offset + w.len(), w, TokenKind::Word));
            offset += w.len() + 1;
        }
        out
    }

    fn hits_by_role(text: &str) -> Vec<(NegationMachine, String)> {
        let mut rec = NegationRecognizer::new();
        let scan = Scanner::new(&mut rec.machines).run(&words(text), None, |role, span| (role, span));
        let mut out: Vec<(NegationMachine, String)> =
            scan.spans.into_iter().map(|(role, s)| (role, text[s.begin..s.end].to_string())).collect();
        out.sort_by_key(|(role, s)| (*role as u8, s.clone()));
        out
    }

    #[test]
    fn no_is_picked_up_by_two_machines() {
        assert_eq!(
            hits_by_role("no fever today"),
            [(NegationMachine::Aspectual, "no".to_string()), (NegationMachine::Nominal, "no".to_string())]
        );
    }

    #[test]
    fn nominal_takes_the_generic_noun() {
        let hits = hits_by_role("there is no evidence of infection");
        assert!(hits.contains(&(NegationMachine::Nominal, "no evidence".to_string())));
    }

    #[test]
    fn adjectival_needs_a_preposition() {
        assert_eq!(
            hits_by_role("negative for malignancy"),
            [(NegationMachine::Adjectival, "negative for".to_string())]
        );
        assert!(hits_by_role("negative result seen").is_empty());
    }

    #[test]
    fn rule_out_collocation() {
        assert_eq!(
            hits_by_role("will rule out pneumonia"),
            [(NegationMachine::Aspectual, "will rule out".to_string())]
        );
    }
}
