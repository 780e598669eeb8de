//! Deterministic automata and their builder.
//!
//! A `Machine` owns its states and a `current` pointer. It never remembers
//! tokens: the scanner reconstructs match boundaries from the flags of the
//! states it lands in.
//!
//! Machines are assembled once, through `MachineBuilder`:
//!
//! ```text
//! let mut b = MachineBuilder::new("blood pressure");
//! let start = b.start();
//! let systolic = b.state("SYSTOLIC");
//! let end = b.end("END");
//! transitions!(b, start => [Condition::int_range(80, 200) => systolic, Condition::Any => start]);
//! ...
//! let machine = b.build(Role::BloodPressure);
//! ```
//!
//! `build` closes every state that does not already end with an `Any`
//! transition by appending `Any -> START`, so a built machine always has a
//! total transition function.

use super::condition::Condition;
use super::state::{State, StateFlags, StateId};
use crate::Token;

#[derive(Debug, Clone)]
pub struct Machine<R = ()> {
    name: &'static str,
    role: R,
    states: Vec<State>,
    start: StateId,
    current: StateId,
}

impl<R: Copy> Machine<R> {
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Tag identifying this machine inside its recognizer.
    pub fn role(&self) -> R {
        self.role
    }

    pub fn states(&self) -> &[State] {
        &self.states
    }

    pub fn current(&self) -> &State {
        &self.states[self.current]
    }

    /// Move along the first matching transition and return the new state.
    pub fn step(&mut self, token: &Token) -> &State {
        let next = self.states[self.current].next(token);
        debug_assert!(next.is_some(), "state {} of {} has no matching transition", self.current().name(), self.name);
        self.current = next.unwrap_or(self.start);
        &self.states[self.current]
    }

    pub fn reset(&mut self) {
        self.current = self.start;
    }
}

/// Incremental construction of a `Machine`.
#[derive(Debug)]
pub struct MachineBuilder {
    name: &'static str,
    states: Vec<State>,
}

impl MachineBuilder {
    /// Create a builder whose first state is `START`.
    pub fn new(name: &'static str) -> Self {
        MachineBuilder { name, states: vec![State::new("START", StateFlags::START)] }
    }

    pub fn start(&self) -> StateId {
        0
    }

    pub fn state(&mut self, name: &'static str) -> StateId {
        self.add(name, StateFlags::empty())
    }

    pub fn end(&mut self, name: &'static str) -> StateId {
        self.add(name, StateFlags::END)
    }

    /// An end state whose triggering token is excluded from the match.
    pub fn non_terminal_end(&mut self, name: &'static str) -> StateId {
        self.add(name, StateFlags::END | StateFlags::NON_TERMINAL_END)
    }

    pub fn on(&mut self, from: StateId, condition: Condition, to: StateId) -> &mut Self {
        self.states[from].push(condition, to);
        self
    }

    pub fn build<R>(mut self, role: R) -> Machine<R> {
        let start = self.start();
        for state in &mut self.states {
            if !state.is_total() {
                state.push(Condition::Any, start);
            }
        }
        Machine { name: self.name, role, states: self.states, start, current: start }
    }

    fn add(&mut self, name: &'static str, flags: StateFlags) -> StateId {
        self.states.push(State::new(name, flags));
        self.states.len() - 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::TokenKind;

    fn tok(text: &str) -> Token {
        Token::new(0, text.len(), text, TokenKind::Word)
    }

    fn ab_machine() -> Machine {
        let mut b = MachineBuilder::new("ab");
        let start = b.start();
        let a = b.state("A");
        let end = b.end("END");
        transitions!(b, start => [Condition::text("a") => a, Condition::Any => start]);
        transitions!(b, a => [Condition::text("b") => end]);
        b.build(())
    }

    #[test]
    fn build_closes_every_state() {
        let m = ab_machine();
        assert!(m.states().iter().all(State::is_total));
        // END had no transitions; it now falls back to START.
        assert_eq!(m.states()[2].next(&tok("zzz")), Some(0));
    }

    #[test]
    fn step_and_reset() {
        let mut m = ab_machine();
        assert!(m.current().is_start());
        assert_eq!(m.step(&tok("a")).name(), "A");
        assert!(m.step(&tok("B")).is_end());
        m.reset();
        assert!(m.current().is_start());
        // unmatched token in A goes back to START through the appended fallback
        m.step(&tok("a"));
        assert!(m.step(&tok("c")).is_start());
    }

    #[test]
    fn non_terminal_end_is_also_an_end() {
        let mut b = MachineBuilder::new("nt");
        let nt = b.non_terminal_end("NT");
        let start = b.start();
        b.on(start, Condition::Any, nt);
        let mut m = b.build(());
        let state = m.step(&tok("x"));
        assert!(state.is_end());
        assert!(state.is_non_terminal_end());
    }
}
