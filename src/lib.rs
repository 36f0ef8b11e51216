//! This crate provides the core logic for a single-tape Turing machine simulator.
//! It includes the growable tape, the ordered rule table with wildcard matching, the
//! execution engine, loaders for the line-oriented program format and recorders for
//! observing a run.

pub mod analyzer;
pub mod encoder;
pub mod loader;
pub mod machine;
pub mod parser;
pub mod programs;
pub mod recorder;
pub mod rules;
pub mod tape;
pub mod types;

/// Re-exports the `Rule` enum from the parser module, used by the `pest` grammar.
pub use crate::parser::Rule;
/// Re-exports the analysis entry points from the analyzer module.
pub use analyzer::{analyze, lint, AnalysisError, AnalysisWarning};
/// Re-exports the encoding functions from the encoder module.
pub use encoder::{encode, encode_rule_table};
/// Re-exports the `ProgramLoader` struct from the loader module.
pub use loader::ProgramLoader;
/// Re-exports the `TuringMachine` struct from the machine module.
pub use machine::TuringMachine;
/// Re-exports the `parse` function from the parser module.
pub use parser::parse;
/// Re-exports `ProgramInfo`, `ProgramManager`, and `PROGRAMS` from the programs module.
pub use programs::{ProgramInfo, ProgramManager, PROGRAMS};
/// Re-exports the observation hook and the recorders built on it.
pub use recorder::{History, Observer, Transcript};
pub use rules::RuleTable;
pub use tape::Tape;
/// Re-exports various types related to program definition and execution from the types module.
pub use types::{
    Direction, Halt, Mode, Outcome, Program, StateId, Step, Transition, TuringMachineError,
    DEFAULT_BLANK_SYMBOL, MAX_EXECUTION_STEPS, MAX_PROGRAM_SIZE, WILDCARD_SYMBOL,
};
