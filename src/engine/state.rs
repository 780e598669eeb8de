//! Automaton states.
//!
//! A `State` is a named node holding an ordered transition list. Lookup is
//! **first listed wins**: specific guards are declared before broader ones and
//! every list ends with an `Any` fallback, which makes `next` a total function.
//!
//! ```text
//! DAY_NUM:  '/'              -> DAY_YEAR_SEP
//!           '-'              -> DAY_YEAR_SEP
//!           !'/' & !'-'      -> NON_TERMINAL_END
//!           Any              -> START
//! ```

use super::condition::Condition;
use crate::Token;

/// Index of a state inside its owning `Machine`.
pub type StateId = usize;

bitflags::bitflags! {
    /// Role flags carried by a state.
    ///
    /// `NON_TERMINAL_END` is always set together with `END`: the machine has
    /// matched, but the token that led here is not part of the match.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct StateFlags: u8 {
        const START            = 1 << 0;
        const END              = 1 << 1;
        const NON_TERMINAL_END = 1 << 2;
    }
}

#[derive(Debug, Clone)]
pub struct Transition {
    pub condition: Condition,
    pub target: StateId,
}

#[derive(Debug, Clone)]
pub struct State {
    name: &'static str,
    flags: StateFlags,
    transitions: Vec<Transition>,
}

impl State {
    pub(crate) fn new(name: &'static str, flags: StateFlags) -> Self {
        State { name, flags, transitions: Vec::new() }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn flags(&self) -> StateFlags {
        self.flags
    }

    pub fn is_start(&self) -> bool {
        self.flags.contains(StateFlags::START)
    }

    pub fn is_end(&self) -> bool {
        self.flags.contains(StateFlags::END)
    }

    pub fn is_non_terminal_end(&self) -> bool {
        self.flags.contains(StateFlags::NON_TERMINAL_END)
    }

    pub fn transitions(&self) -> &[Transition] {
        &self.transitions
    }

    /// True when the last transition is the unconditional fallback.
    pub fn is_total(&self) -> bool {
        self.transitions.last().is_some_and(|t| t.condition.is_any())
    }

    pub(crate) fn push(&mut self, condition: Condition, target: StateId) {
        self.transitions.push(Transition { condition, target });
    }

    /// Target of the first transition whose condition holds for `token`.
    ///
    /// Only `None` for a state that was never closed with an `Any` fallback,
    /// which `MachineBuilder::build` rules out.
    pub fn next(&self, token: &Token) -> Option<StateId> {
        self.transitions.iter().find(|t| t.condition.satisfies(token)).map(|t| t.target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::TokenKind;

    #[test]
    fn first_listed_transition_wins() {
        let mut state = State::new("S", StateFlags::empty());
        state.push(Condition::int_range(1, 12), 1);
        state.push(Condition::int_range(1, 31), 2);
        state.push(Condition::Any, 0);

        let tok = |t: &str| Token::new(0, t.len(), t, TokenKind::Number);
        assert_eq!(state.next(&tok("10")), Some(1));
        assert_eq!(state.next(&tok("20")), Some(2));
        assert_eq!(state.next(&tok("x")), Some(0));
        assert!(state.is_total());
    }

    #[test]
    fn open_state_is_not_total() {
        let mut state = State::new("S", StateFlags::empty());
        assert!(!state.is_total());
        state.push(Condition::punct('.'), 0);
        assert!(!state.is_total());
        assert_eq!(state.next(&Token::new(0, 1, "x", TokenKind::Word)), None);
    }
}
