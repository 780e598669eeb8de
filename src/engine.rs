//! Finite-state matching engine.
//!
//! The engine is a small automaton framework: conditions guard transitions,
//! states hold ordered transition lists, machines walk those lists one token
//! at a time, and the scanner drives several machines over a token stream and
//! collects the spans they recognize.
//!
//! ## How the parts work together
//!
//! ```text
//! vocabularies (static) ──┐
//!                         │  MachineBuilder::build         (machine.rs)
//!                         └──────────────┬─────────────
//!                                        │ Machine<Role> (states + current)
//! tokens ── Splicer ─────────────────────┼─ override substitution (splice.rs)
//!                                        v
//!                               Scanner::run (scanner.rs)
//!                                 - step every machine
//!                                 - track match starts
//!                                 - emit on end states, reset
//!                                        │
//!                                        v
//!                              Scan { spans: HashSet<S>, stats }
//! ```
//!
//! ## Responsibilities by module
//!
//! - `condition.rs`: the closed set of token predicates and their combinators.
//! - `state.rs`: named states, flags (`StateFlags`), first-match transition lookup.
//! - `machine.rs`: `Machine` and `MachineBuilder`; the builder closes every
//!   transition table so stepping is total.
//! - `splice.rs`: `OverrideSet` and the iterator substituting composite tokens.
//! - `scanner.rs`: the shared scan loop and its start/end bookkeeping.
//! - `metrics.rs`: counters and timings collected during runs.
//!
//! ## Debugging
//!
//! The scanner emits a `trace` event per match (target `clinlex::engine::scanner`).
//! Run the CLI with `RUST_LOG=clinlex=trace` to see them.

#[path = "engine/condition.rs"]
mod condition;
#[path = "engine/machine.rs"]
mod machine;
#[path = "engine/metrics.rs"]
mod metrics;
#[path = "engine/scanner.rs"]
mod scanner;
#[path = "engine/splice.rs"]
mod splice;
#[path = "engine/state.rs"]
mod state;

pub use condition::Condition;
pub use machine::{Machine, MachineBuilder};
pub use metrics::{RecognizerMetrics, RunMetrics, ScanStats};
pub use scanner::{Scan, Scanner, StartTracking};
pub use splice::{OverrideSet, covered_text};
pub use state::{State, StateFlags, StateId, Transition};
