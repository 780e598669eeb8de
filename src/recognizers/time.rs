//! Clock times with a meridiem: `10 pm`, `9:30 a.m.`, `11:45pm`.
//!
//! The hour and minute may arrive as separate tokens (`9` `:` `30`) or as one
//! `HH:MM` token. A trailing period after the meridiem is part of the match;
//! anything else after it ends the match without being included.

use super::{Recognizer, RecognizerKind};
use crate::engine::{Condition, Machine, MachineBuilder, Scan, Scanner};
use crate::{Span, Token};
use std::slice;

#[derive(Debug, Clone)]
pub struct TimeRecognizer {
    machine: Machine,
}

impl TimeRecognizer {
    pub fn new() -> Self {
        TimeRecognizer { machine: time_machine() }
    }
}

impl Default for TimeRecognizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Recognizer for TimeRecognizer {
    type Output = Span;

    fn kind(&self) -> RecognizerKind {
        RecognizerKind::Time
    }

    fn run(&mut self, tokens: &[Token]) -> Scan<Span> {
        Scanner::new(slice::from_mut(&mut self.machine)).run(tokens, None, |_, span| span)
    }
}

fn time_machine() -> Machine {
    let mut b = MachineBuilder::new("time");
    let start = b.start();
    let hour_num = b.state("HOUR_NUM");
    let colon = b.state("COLON");
    let hour_min = b.state("HOUR_MIN");
    let a_or_p = b.state("A_OR_P");
    let a_or_p_period = b.state("A_OR_P_PERIOD");
    let meridiem = b.state("DAY_NIGHT");
    let end = b.end("END");
    let nt_end = b.non_terminal_end("NON_TERMINAL_END");

    // "a.m." is tokenized as a . m .
    let a_or_p_letter = || Condition::text("a") | Condition::text("p");

    transitions!(b, start => [
        Condition::int_range(1, 12) => hour_num,
        Condition::hour_minute(1, 12, 0, 59) => hour_min,
        Condition::Any => start,
    ]);
    transitions!(b, hour_num => [
        Condition::punct(':') => colon,
        Condition::DayNightWord => meridiem,
        a_or_p_letter() => a_or_p,
    ]);
    transitions!(b, colon => [Condition::int_range(0, 59) => hour_min]);
    transitions!(b, hour_min => [Condition::DayNightWord => meridiem, a_or_p_letter() => a_or_p]);
    transitions!(b, a_or_p => [Condition::punct('.') => a_or_p_period]);
    transitions!(b, a_or_p_period => [Condition::text("m") => meridiem]);
    transitions!(b, meridiem => [Condition::punct('.') => end, Condition::Any => nt_end]);

    b.build(())
}
