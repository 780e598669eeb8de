//! Calendar dates.
//!
//! Two machines share one scan:
//!
//! ```text
//! numeric:  MM (/|-) DD (/|-) YYYY      10/15/2002, 3-4-99
//!           MM (/|-) DD <other>         10/15 report   (non-terminal end)
//! textual:  Month[.] DD[,] YYYY         Jan. 15, 2002
//!           Month YYYY                  June 2002
//!           Month DD <other>            March 3 visit  (non-terminal end)
//! ```

use super::{Recognizer, RecognizerKind};
use crate::engine::{Condition, Machine, MachineBuilder, Scan, Scanner};
use crate::{Span, Token};
use once_cell::sync::Lazy;
use std::collections::HashSet;

const MONTH: (i64, i64) = (1, 12);
const DAY: (i64, i64) = (1, 31);
const YEAR: (i64, i64) = (1, 2999);

static MONTH_FULL_NAMES: Lazy<HashSet<&'static str>> = word_set![
    "january", "february", "march", "april", "may", "june", "july", "august", "september", "october", "november",
    "december",
];

static MONTH_SHORT_NAMES: Lazy<HashSet<&'static str>> =
    word_set!["jan", "feb", "mar", "apr", "may", "jun", "jul", "aug", "sep", "sept", "oct", "nov", "dec"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DateMachine {
    Numeric,
    Textual,
}

#[derive(Debug, Clone)]
pub struct DateRecognizer {
    machines: [Machine<DateMachine>; 2],
}

impl DateRecognizer {
    pub fn new() -> Self {
        DateRecognizer { machines: [numeric_machine(), textual_machine()] }
    }
}

impl Default for DateRecognizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Recognizer for DateRecognizer {
    type Output = Span;

    fn kind(&self) -> RecognizerKind {
        RecognizerKind::Date
    }

    fn run(&mut self, tokens: &[Token]) -> Scan<Span> {
        Scanner::new(&mut self.machines).run(tokens, None, |_, span| span)
    }
}

fn month() -> Condition {
    Condition::int_range(MONTH.0, MONTH.1)
}

fn day() -> Condition {
    Condition::int_range(DAY.0, DAY.1)
}

fn year() -> Condition {
    Condition::int_range(YEAR.0, YEAR.1)
}

fn separator() -> Condition {
    Condition::punct('/') | Condition::punct('-')
}

fn numeric_machine() -> Machine<DateMachine> {
    let mut b = MachineBuilder::new("numeric date");
    let start = b.start();
    let month_num = b.state("MONTH_NUM");
    let month_day_sep = b.state("MONTH_DAY_SEP");
    let day_num = b.state("DAY_NUM");
    let day_year_sep = b.state("DAY_YEAR_SEP");
    let end = b.end("END");
    let nt_end = b.non_terminal_end("NON_TERMINAL_END");

    transitions!(b, start => [month() => month_num, Condition::Any => start]);
    transitions!(b, month_num => [separator() => month_day_sep]);
    transitions!(b, month_day_sep => [day() => day_num]);
    transitions!(b, day_num => [
        separator() => day_year_sep,
        !Condition::punct('/') & !Condition::punct('-') => nt_end,
    ]);
    transitions!(b, day_year_sep => [year() => end]);

    b.build(DateMachine::Numeric)
}

fn textual_machine() -> Machine<DateMachine> {
    let mut b = MachineBuilder::new("textual date");
    let start = b.start();
    let month_full = b.state("MONTH_FULL_TEXT");
    let month_short = b.state("MONTH_SHORT_TEXT");
    let period = b.state("PERIOD");
    let day_num = b.state("DAY_NUM");
    let comma = b.state("COMMA");
    let end = b.end("END");
    let nt_end = b.non_terminal_end("NON_TERMINAL_END");

    let year_not_day = || year() & !day();

    transitions!(b, start => [
        Condition::word_set(&MONTH_FULL_NAMES) => month_full,
        Condition::word_set(&MONTH_SHORT_NAMES) => month_short,
        Condition::Any => start,
    ]);
    transitions!(b, month_full => [day() => day_num, year_not_day() => end]);
    transitions!(b, month_short => [
        day() => day_num,
        Condition::punct('.') => period,
        year_not_day() => end,
    ]);
    transitions!(b, period => [day() => day_num, year_not_day() => end]);
    transitions!(b, day_num => [
        year() => end,
        Condition::punct(',') => comma,
        !Condition::punct(',') & !year() => nt_end,
    ]);
    transitions!(b, comma => [year() => end]);

    b.build(DateMachine::Textual)
}
